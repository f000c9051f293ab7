//! Command-line interface for component-mpa
//!
//! Provides the main CLI structure using clap with subcommands for:
//! - `build`: Production build configuration
//! - `dev`: Development build configuration with entry selection
//! - `init`: Project scaffolding

mod build;
mod dev;
mod init;
mod plan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

pub use build::BuildCommand;
pub use dev::DevCommand;
pub use init::InitCommand;
pub use plan::OutputArgs;

/// Multi-page application mode for the Component build tool
#[derive(Parser, Debug)]
#[command(name = "component-mpa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to mpa.toml config file
    #[arg(short, long, global = true, default_value = "mpa.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite the host configuration for a production build
    Build(BuildCommand),

    /// Rewrite the host configuration for development
    Dev(DevCommand),

    /// Initialize a new multi-page project
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        print_banner();

        match &self.command {
            Commands::Build(cmd) => cmd.execute(&self.config).await,
            Commands::Dev(cmd) => cmd.execute(&self.config).await,
            Commands::Init(cmd) => cmd.execute().await,
        }
    }
}

/// Print the banner
fn print_banner() {
    eprintln!(
        "\n{} {} {}\n",
        "⚡".cyan(),
        "Component MPA".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
