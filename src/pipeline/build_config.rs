//! Host build configuration
//!
//! The part of the host's configuration MPA mode reads or rewrites, as a
//! plain value. Hosts hand it over as JSON and get the rewritten value back.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::compose::DocumentDescriptor;
use crate::entry::EntryMap;

/// Build configuration of the host tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfig {
    /// Host version, when the host reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Route table; an empty list turns off conventional routing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Value>>,

    /// Bundle entries
    pub entry: EntryMap,

    /// HTML documents to generate
    pub documents: Vec<DocumentDescriptor>,

    /// Module rules, in order
    pub module_rules: Vec<ModuleRule>,

    pub output: OutputConfig,

    pub optimization: OptimizationConfig,

    pub resolve: ResolveConfig,

    /// Patterns of files the URL loader must leave alone
    pub url_loader_excludes: Vec<String>,

    /// Host features MPA mode switches off
    pub toggles: HostToggles,
}

/// A loader rule for matching files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRule {
    /// Rule name
    pub name: String,

    /// Regular expression over file paths
    pub test: String,

    /// Loader applied to matching files
    pub loader: String,

    #[serde(default)]
    pub options: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Module aliases
    pub alias: IndexMap<String, String>,
}

/// Host features controlled by the plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostToggles {
    /// Host's own HTML generation
    pub html: bool,

    /// Host's route middleware in the dev server
    pub route_middleware: bool,
}

impl Default for HostToggles {
    fn default() -> Self {
        Self {
            html: true,
            route_middleware: true,
        }
    }
}

impl BuildConfig {
    /// First source of the host's own first entry (its dev client, in
    /// development)
    pub fn first_entry_script(&self) -> Option<&str> {
        self.entry.values().next().and_then(|spec| spec.first_source())
    }
}
