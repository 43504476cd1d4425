//! `permascript resolve <APPID>`: print the depot records without writing anything.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use super::common::{CommandContext, resolve_with_keys};
use super::report::render_table;
use crate::resolver::DepotResolver;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Show what an app id resolves to.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Steam app id to resolve
    app_id: u32,

    /// Also look up decryption keys in the local key store
    #[arg(long)]
    keys: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl ResolveCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let fetcher = ctx.fetcher()?;
        let spinner = ctx.spinner();

        let records = if self.keys {
            let steam = ctx.steam()?;
            resolve_with_keys(&fetcher, self.app_id, &steam, &spinner).await?.0
        } else {
            spinner.set_message(format!("Resolving app {}", self.app_id));
            let resolved = DepotResolver::new(&fetcher).resolve(self.app_id).await;
            spinner.finish_and_clear();
            resolved?
        };

        match self.format {
            OutputFormat::Table => print!("{}", render_table(self.app_id, &records)),
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
                println!("{json}");
            }
        }
        Ok(())
    }
}
