//! Builders for VDF documents used as test input.

use std::fmt::Write as _;

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[derive(Debug, Clone)]
enum DepotFixture {
    Manifest {
        id: String,
        gid: String,
        size: String,
    },
    NoManifest {
        id: String,
    },
}

/// Builds an app-info payload in the shape the public endpoint returns.
///
/// ```rust,no_run
/// use permascript::test_utils::AppInfoBuilder;
///
/// let text = AppInfoBuilder::new(10)
///     .name("Game")
///     .depot(11, 100, 5000)
///     .depot_without_manifest(12)
///     .dlc(&[30, 40])
///     .build();
/// assert!(text.contains("\"listofdlc\""));
/// ```
#[derive(Debug, Clone)]
pub struct AppInfoBuilder {
    app_id: u32,
    name: Option<String>,
    nested_name: Option<String>,
    depots: Vec<DepotFixture>,
    dlc: Option<String>,
}

impl AppInfoBuilder {
    pub fn new(app_id: u32) -> Self {
        Self {
            app_id,
            name: None,
            nested_name: None,
            depots: Vec::new(),
            dlc: None,
        }
    }

    /// Set `common.name`.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set `appinfo.common.name`, which takes precedence over `common.name`.
    pub fn appinfo_name(mut self, name: &str) -> Self {
        self.nested_name = Some(name.to_string());
        self
    }

    /// Add a depot with a public manifest.
    pub fn depot(self, depot_id: u32, gid: u64, size: u64) -> Self {
        self.raw_depot(&depot_id.to_string(), &gid.to_string(), &size.to_string())
    }

    /// Add a depot whose manifest fields are given verbatim.
    pub fn raw_depot(mut self, depot_id: &str, gid: &str, size: &str) -> Self {
        self.depots.push(DepotFixture::Manifest {
            id: depot_id.to_string(),
            gid: gid.to_string(),
            size: size.to_string(),
        });
        self
    }

    /// Add a depot entry that has no `manifests` block.
    pub fn depot_without_manifest(mut self, depot_id: u32) -> Self {
        self.depots.push(DepotFixture::NoManifest {
            id: depot_id.to_string(),
        });
        self
    }

    /// Set `extended.listofdlc` from ids.
    pub fn dlc(self, ids: &[u32]) -> Self {
        let list = ids.iter().map(u32::to_string).collect::<Vec<_>>().join(",");
        self.dlc_list(&list)
    }

    /// Set `extended.listofdlc` verbatim.
    pub fn dlc_list(mut self, list: &str) -> Self {
        self.dlc = Some(list.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n{{", quote(&self.app_id.to_string()));
        let _ = writeln!(out, "\t\"appid\"\t\t{}", quote(&self.app_id.to_string()));

        if let Some(name) = &self.nested_name {
            let _ = writeln!(out, "\t\"appinfo\"\n\t{{\n\t\t\"common\"\n\t\t{{");
            let _ = writeln!(out, "\t\t\t\"name\"\t\t{}\n\t\t}}\n\t}}", quote(name));
        }
        if let Some(name) = &self.name {
            let _ = writeln!(out, "\t\"common\"\n\t{{\n\t\t\"name\"\t\t{}\n\t}}", quote(name));
        }
        if let Some(list) = &self.dlc {
            let _ = writeln!(out, "\t\"extended\"\n\t{{\n\t\t\"listofdlc\"\t\t{}\n\t}}", quote(list));
        }

        let _ = writeln!(out, "\t\"depots\"\n\t{{");
        for depot in &self.depots {
            match depot {
                DepotFixture::Manifest {
                    id,
                    gid,
                    size,
                } => {
                    let _ = writeln!(out, "\t\t{}\n\t\t{{\n\t\t\t\"manifests\"\n\t\t\t{{", quote(id));
                    let _ = writeln!(out, "\t\t\t\t\"public\"\n\t\t\t\t{{");
                    let _ = writeln!(out, "\t\t\t\t\t\"gid\"\t\t{}", quote(gid));
                    let _ = writeln!(out, "\t\t\t\t\t\"size\"\t\t{}", quote(size));
                    let _ = writeln!(out, "\t\t\t\t}}\n\t\t\t}}\n\t\t}}");
                }
                DepotFixture::NoManifest {
                    id,
                } => {
                    let _ = writeln!(out, "\t\t{}\n\t\t{{\n\t\t\t\"maxsize\"\t\t\"0\"\n\t\t}}", quote(id));
                }
            }
        }
        let _ = writeln!(out, "\t\t\"branches\"\n\t\t{{\n\t\t\t\"public\"\n\t\t\t{{");
        let _ = writeln!(out, "\t\t\t\t\"buildid\"\t\t\"1\"\n\t\t\t}}\n\t\t}}\n\t}}");
        out.push_str("}\n");
        out
    }
}

/// Builds a `config.vdf` key store.
#[derive(Debug, Clone, Default)]
pub struct KeyStoreBuilder {
    keys: Vec<(String, String)>,
    uppercase_path: bool,
}

impl KeyStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, depot_id: &str, key: &str) -> Self {
        self.keys.push((depot_id.to_string(), key.to_string()));
        self
    }

    /// Spell the path as `Software/Valve/Steam/Depots` like older clients do.
    pub fn uppercase_path(mut self) -> Self {
        self.uppercase_path = true;
        self
    }

    pub fn build(&self) -> String {
        let [software, valve, steam, depots] = if self.uppercase_path {
            ["Software", "Valve", "Steam", "Depots"]
        } else {
            ["software", "valve", "steam", "depots"]
        };

        let mut out = String::from("\"InstallConfigStore\"\n{\n");
        let _ = writeln!(out, "\t{}\n\t{{\n\t\t{}\n\t\t{{\n\t\t\t{}\n\t\t\t{{", quote(software), quote(valve), quote(steam));
        let _ = writeln!(out, "\t\t\t\t\"BaseInstallFolder_1\"\t\t\"D:\\\\Games\\\\Steam\"");
        let _ = writeln!(out, "\t\t\t\t{}\n\t\t\t\t{{", quote(depots));
        for (depot_id, key) in &self.keys {
            let _ = writeln!(out, "\t\t\t\t\t{}\n\t\t\t\t\t{{", quote(depot_id));
            let _ = writeln!(out, "\t\t\t\t\t\t\"DecryptionKey\"\t\t{}", quote(key));
            let _ = writeln!(out, "\t\t\t\t\t}}");
        }
        let _ = writeln!(out, "\t\t\t\t}}\n\t\t\t}}\n\t\t}}\n\t}}");
        out.push_str("}\n");
        out
    }
}
