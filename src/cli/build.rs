//! Build command implementation

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::plan::{self, OutputArgs};
use crate::config::{BuildEnv, Mode};
use crate::select::SelectAll;

/// Rewrite the host configuration for a production build
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Do not prepend the polyfill to entries
    #[arg(long)]
    pub no_polyfill: bool,
}

impl BuildCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        let mut env = BuildEnv::from_env();
        env.mode = Mode::Production;
        if self.no_polyfill {
            env.polyfill = false;
        }

        eprintln!("{} Planning production build...", "→".blue());

        plan::run(config_path, env, &self.output, &SelectAll).await
    }
}
