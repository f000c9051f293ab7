//! MPA pipeline
//!
//! The plugin rewrites the host's build configuration in four stages, run
//! in a fixed order. Each stage takes the configuration by value and
//! returns the new one.

mod build_config;

use std::path::PathBuf;

use once_cell::sync::Lazy;
use semver::{Version, VersionReq};
use serde_json::{json, Map};
use tracing::{debug, info, warn};

use crate::assets::BundledAssets;
use crate::compose::Composer;
use crate::config::{BuildEnv, Config, MpaOptions};
use crate::entry;
use crate::error::{MpaError, Result};
use crate::select::{self, EntrySelector};

pub use build_config::*;

/// Host versions MPA mode works with
static SUPPORTED_HOST: Lazy<VersionReq> =
    Lazy::new(|| VersionReq::parse(">=2.4.3, <3.0.0").unwrap());

/// Aliases the host adds for single-page apps; pages bring their own.
const DEFAULT_ALIASES: [&str; 6] = [
    "react",
    "react-dom",
    "react-router",
    "react-router-dom",
    "react-router-config",
    "history",
];

/// Project locations the plugin works with
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    /// Project root
    pub root: PathBuf,

    /// Pages directory
    pub pages: PathBuf,

    /// Bundled templates and polyfill
    pub assets: BundledAssets,
}

impl ProjectPaths {
    /// Paths for a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            root: config.root.clone(),
            pages: config.pages_dir(),
            assets: BundledAssets::for_root(&config.root),
        }
    }
}

/// An activated MPA plugin
#[derive(Debug, Clone)]
pub struct MpaPlugin {
    options: MpaOptions,
    paths: ProjectPaths,
    env: BuildEnv,
}

impl MpaPlugin {
    /// Validate options and the host version.
    pub fn activate(
        raw_options: &serde_json::Value,
        paths: ProjectPaths,
        env: BuildEnv,
        host_version: Option<&str>,
    ) -> Result<Self> {
        if let Some(version) = host_version {
            check_host_version(version)?;
        }

        let options = MpaOptions::from_value(raw_options)?;

        warn!(
            "MPA mode uses the host only as a bundler, so routing, global styles and scripts, \
             the app runtime file and runtimePublicPath are not supported"
        );
        debug!("Activated with {:?}", options);

        Ok(Self {
            options,
            paths,
            env,
        })
    }

    /// Run every stage over the host configuration.
    pub async fn apply(
        &self,
        config: BuildConfig,
        selector: &dyn EntrySelector,
    ) -> Result<BuildConfig> {
        let config = self.modify_default_config(config);
        let config = self.modify_build_config(config, selector).await?;
        let config = self.chain_build_config(config);
        Ok(self.modify_build_options(config))
    }

    /// Turn off conventional routing and the host's HTML and route
    /// middleware.
    pub fn modify_default_config(&self, mut config: BuildConfig) -> BuildConfig {
        config.routes = Some(Vec::new());
        config.toggles = HostToggles {
            html: false,
            route_middleware: false,
        };
        config
    }

    /// Replace entries and add page documents.
    pub async fn modify_build_config(
        &self,
        mut config: BuildConfig,
        selector: &dyn EntrySelector,
    ) -> Result<BuildConfig> {
        let dev_reload = config.first_entry_script().map(str::to_string);

        let entries = entry::resolve(
            &self.paths.pages,
            self.options.entry.as_ref(),
            self.options.deep_page_entry,
        )?;
        let entries = select::prune(entries, &self.options, &self.env, selector).await?;

        let composition = Composer::new(&self.options, &self.env, &self.paths.assets, &self.paths.root)
            .compose(entries, dev_reload.as_deref())?;

        info!(
            "Composed {} entries and {} documents",
            composition.entries.len(),
            composition.documents.len()
        );

        config.entry = composition.entries;
        config.documents.extend(composition.documents);

        for alias in DEFAULT_ALIASES {
            config.resolve.alias.shift_remove(alias);
        }

        Ok(config)
    }

    /// Loader rule for imported HTML, chunk naming and vendor splitting.
    pub fn chain_build_config(&self, mut config: BuildConfig) -> BuildConfig {
        let mut options = Map::new();
        options.insert("name".to_string(), json!(self.options.html_name()));

        config.module_rules.push(ModuleRule {
            name: "html".to_string(),
            test: r"\.html?$".to_string(),
            loader: "file-loader".to_string(),
            options,
        });

        config.output.chunk_filename = Some("[name].js".to_string());

        if let Some(split_chunks) = self.options.split_chunks.to_optimization() {
            config.optimization.split_chunks = Some(split_chunks);
        }

        config
    }

    /// Keep HTML and templates away from the URL loader.
    pub fn modify_build_options(&self, mut config: BuildConfig) -> BuildConfig {
        config
            .url_loader_excludes
            .extend([r"\.html?$".to_string(), r"\.ejs?$".to_string()]);
        config
    }
}

fn check_host_version(version: &str) -> Result<()> {
    let parsed = Version::parse(version).map_err(|e| {
        MpaError::Configuration(format!("Cannot parse host version '{}': {}", version, e))
    })?;

    if SUPPORTED_HOST.matches(&parsed) {
        Ok(())
    } else {
        Err(MpaError::Configuration(format!(
            "Your host version is {}, >=2.4.3 and <3 is required.",
            version
        )))
    }
}
