//! Shared driver for `build` and `dev`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::info;

use crate::assets::{BundledAssets, ASSETS_DIR};
use crate::config::{BuildEnv, Config};
use crate::pipeline::{BuildConfig, MpaPlugin, ProjectPaths};
use crate::select::EntrySelector;
use crate::utils::relative_path;

/// Where the host configuration comes from and where the result goes
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Host build configuration (JSON) to rewrite
    #[arg(long)]
    pub host_config: Option<PathBuf>,

    /// Write the rewritten configuration to this file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print the rewritten configuration as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Load, activate, apply, report.
pub async fn run(
    config_path: &str,
    env: BuildEnv,
    output: &OutputArgs,
    selector: &dyn EntrySelector,
) -> Result<()> {
    let start = Instant::now();

    info!("Loading configuration from {}", config_path);
    let config = Config::load(config_path)?;

    let host_path = output
        .host_config
        .clone()
        .or_else(|| config.host_config_path());
    let host = load_host_config(host_path.as_deref())?;

    let plugin = MpaPlugin::activate(
        &config.mpa,
        ProjectPaths::from_config(&config),
        env,
        host.version.as_deref(),
    )?;

    BundledAssets::materialize(config.root.join(ASSETS_DIR))
        .context("Failed to write bundled templates")?;

    let result = tokio::select! {
        result = plugin.apply(host, selector) => result?,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("Cancelled"),
    };

    print_summary(&config.root, &result, start.elapsed().as_secs_f64());

    if let Some(out) = &output.out {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(out, json)
            .with_context(|| format!("Failed to write build configuration: {}", out.display()))?;
        eprintln!("  {} Wrote {}\n", "✓".green(), out.display().to_string().cyan());
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

fn load_host_config(path: Option<&Path>) -> Result<BuildConfig> {
    let Some(path) = path else {
        return Ok(BuildConfig::default());
    };

    info!("Loading host configuration from {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read host configuration: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse host configuration: {}", path.display()))
}

fn print_summary(root: &Path, config: &BuildConfig, seconds: f64) {
    eprintln!(
        "\n{} Planned {} entr{} and {} document(s) in {:.2}s\n",
        "✓".green().bold(),
        config.entry.len(),
        if config.entry.len() == 1 { "y" } else { "ies" },
        config.documents.len(),
        seconds
    );

    for (name, spec) in &config.entry {
        let sources: Vec<String> = spec
            .sources()
            .into_iter()
            .map(|s| relative_path(root, Path::new(s)))
            .collect();
        eprintln!(
            "  {} {} {}",
            "•".dimmed(),
            name.cyan(),
            sources.join(", ").dimmed()
        );
    }

    for doc in &config.documents {
        eprintln!(
            "  {} {} {}",
            "•".dimmed(),
            doc.filename.cyan(),
            relative_path(root, &doc.template).dimmed()
        );
    }

    eprintln!();
}
