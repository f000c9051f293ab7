//! Development command implementation

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::plan::{self, OutputArgs};
use crate::config::{BuildEnv, Mode, DEFAULT_PORT};
use crate::select::{EntrySelector, FixedSelection, TerminalSelector};

/// Rewrite the host configuration for development
#[derive(Args, Debug)]
pub struct DevCommand {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Port the dev server runs on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Entries to build, skipping the interactive prompt
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Do not prepend the polyfill to entries
    #[arg(long)]
    pub no_polyfill: bool,
}

impl DevCommand {
    pub async fn execute(&self, config_path: &str) -> Result<()> {
        let mut env = BuildEnv::from_env();
        env.mode = Mode::Development;
        env.port = self.port;
        if self.no_polyfill {
            env.polyfill = false;
        }

        eprintln!(
            "{} Planning development build for {}",
            "→".blue(),
            format!("http://localhost:{}", self.port).cyan().underline()
        );

        let selector: Box<dyn EntrySelector> = if self.select.is_empty() {
            Box::new(TerminalSelector)
        } else {
            Box::new(FixedSelection(self.select.clone()))
        };

        plan::run(config_path, env, &self.output, &*selector).await
    }
}
