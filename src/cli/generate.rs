//! `permascript generate <APPID>`: resolve, look up keys and write the bundle.
//!
//! # Examples
//!
//! ```bash
//! permascript generate 730                  # bundle in the configured output dir
//! permascript generate 730 -o ~/bundles     # explicit output root
//! permascript --appinfo-dir ./saved generate 730
//! ```

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common::{CommandContext, generate_bundle};
use super::report::render_generate;

/// Generate the unlock script and manifest bundle for one app.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Steam app id to resolve
    app_id: u32,

    /// Output root; the bundle goes to `<DIR>/<APPID>/`
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let fetcher = ctx.fetcher()?;
        let steam = ctx.steam()?;
        let output_root = ctx.output_root(self.output.as_deref())?;

        let outcome =
            generate_bundle(&fetcher, self.app_id, &steam, &output_root, &ctx.spinner()).await?;
        print!("{}", render_generate(&outcome));
        Ok(())
    }
}
