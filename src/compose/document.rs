//! Document descriptors
//!
//! A descriptor carries everything the HTML template engine needs to write
//! one page: template, output file name, chunks to inject, and the
//! remaining options as template context.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MpaError, Result};

/// Chunk list token replaced with the page's own name
pub const PAGE_PLACEHOLDER: &str = "<%= page %>";

/// Parameters for generating one HTML document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    /// Template file
    pub template: PathBuf,

    /// Output file name
    pub filename: String,

    /// Chunks whose scripts are injected, in order
    #[serde(default)]
    pub chunks: Vec<String>,

    /// Whether scripts are injected at all
    #[serde(default = "default_true")]
    pub inject: bool,

    /// Entry names, for the entry list document
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<String>,

    /// Everything else, handed to the template as is
    #[serde(default, flatten)]
    pub context: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl DocumentDescriptor {
    /// Lift the typed keys out of merged page options.
    ///
    /// `template`, `filename`, `chunks` and `inject` become fields; every
    /// other key stays in the context. Chunk placeholders are replaced with
    /// `page`.
    pub fn from_options(page: &str, mut options: Map<String, Value>) -> Result<Self> {
        let template = match options.remove("template") {
            Some(Value::String(template)) => PathBuf::from(template),
            other => return Err(invalid(page, "template", "string", other)),
        };

        let filename = match options.remove("filename") {
            Some(Value::String(filename)) if !filename.is_empty() => filename,
            other => return Err(invalid(page, "filename", "non-empty string", other)),
        };

        let chunks = match options.remove("chunks") {
            None => Vec::new(),
            Some(Value::Array(items)) => {
                let mut chunks = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(chunk) if chunk == PAGE_PLACEHOLDER => {
                            chunks.push(page.to_string())
                        }
                        Value::String(chunk) => chunks.push(chunk),
                        other => {
                            return Err(invalid(page, "chunks", "array of strings", Some(other)))
                        }
                    }
                }
                chunks
            }
            other => return Err(invalid(page, "chunks", "array of strings", other)),
        };

        let inject = match options.remove("inject") {
            None => true,
            Some(Value::Bool(inject)) => inject,
            other => return Err(invalid(page, "inject", "boolean", other)),
        };

        Ok(Self {
            template,
            filename,
            chunks,
            inject,
            entries: Vec::new(),
            context: options,
        })
    }

    /// Development index listing every entry; scripts are not injected.
    pub fn entry_list(template: PathBuf, filename: impl Into<String>, entries: Vec<String>) -> Self {
        Self {
            template,
            filename: filename.into(),
            chunks: Vec::new(),
            inject: false,
            entries,
            context: Map::new(),
        }
    }
}

fn invalid(page: &str, key: &str, expected: &str, found: Option<Value>) -> MpaError {
    let found = found
        .map(|v| v.to_string())
        .unwrap_or_else(|| "nothing".to_string());
    MpaError::validation(format!(
        "html.{} for page '{}' should be {}, but got {}",
        key, page, expected, found
    ))
}
