//! Configuration handling for component-mpa
//!
//! Parses `mpa.toml`: project layout under `[project]`, plugin options
//! under `[mpa]`.

mod env;
mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use env::*;
pub use schema::*;

/// Default configuration file name
pub const CONFIG_FILE: &str = "mpa.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project layout
    #[serde(default)]
    pub project: ProjectConfig,

    /// Raw plugin options, validated when the plugin is activated
    #[serde(default)]
    pub mpa: Value,

    /// Root directory (computed from config file location)
    #[serde(skip)]
    pub root: PathBuf,
}

/// Project layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Pages directory, relative to the root
    #[serde(default = "default_pages")]
    pub pages: String,

    /// Host build configuration (JSON) to rewrite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_config: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            host_config: None,
        }
    }
}

fn default_pages() -> String {
    "src/pages".to_string()
}

/// On-disk shape; the `[mpa]` table stays TOML until converted
#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    project: ProjectConfig,

    #[serde(default)]
    mpa: Option<toml::Table>,
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let canonical_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let content = fs::read_to_string(&canonical_path)
            .with_context(|| format!("Failed to read config file: {}", canonical_path.display()))?;

        let root = canonical_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_toml(&content, root)
    }

    /// Parse configuration text with an explicit root
    pub fn from_toml(content: &str, root: PathBuf) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;

        let mpa = match file.mpa {
            Some(table) => serde_json::to_value(table)
                .context("Failed to convert [mpa] options to JSON")?,
            None => Value::Null,
        };

        Ok(Self {
            project: file.project,
            mpa,
            root,
        })
    }

    /// Create a default configuration rooted at `root`
    pub fn default_config(root: impl Into<PathBuf>) -> Self {
        Self {
            project: ProjectConfig::default(),
            mpa: Value::Null,
            root: root.into(),
        }
    }

    /// Absolute pages directory
    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(&self.project.pages)
    }

    /// Absolute path of the host configuration file, if any
    pub fn host_config_path(&self) -> Option<PathBuf> {
        self.project.host_config.as_ref().map(|p| self.root.join(p))
    }
}
