//! Activation option schema
//!
//! Options arrive as loosely typed JSON (converted from the `[mpa]` table of
//! `mpa.toml`, or handed over directly by a host). They are checked against
//! the schema below, collecting every violation, and only then deserialized
//! into [`MpaOptions`].

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::entry::{self, EntryMap};
use crate::error::{MpaError, Result};

/// Validated plugin options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MpaOptions {
    /// Explicit entry map; when absent the pages directory is scanned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryMap>,

    /// File name pattern for `.html` files imported by pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_name: Option<String>,

    /// Descend into subdirectories of the pages directory
    #[serde(default)]
    pub deep_page_entry: bool,

    /// Vendor chunk splitting
    #[serde(default)]
    pub split_chunks: SplitChunks,

    /// Document generation options, also used as template context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<Map<String, Value>>,

    /// Interactive entry selection in development
    #[serde(default)]
    pub select_entry: SelectEntry,
}

impl MpaOptions {
    /// Validate raw options and turn them into typed options.
    ///
    /// A missing or `null` value means "no options".
    pub fn from_value(raw: &Value) -> Result<Self> {
        if raw.is_null() {
            return Ok(Self::default());
        }

        let errors = validate(raw);
        if !errors.is_empty() {
            return Err(MpaError::Validation { errors });
        }

        let options: MpaOptions = serde_json::from_value(raw.clone())
            .map_err(|e| MpaError::validation(e.to_string()))?;

        if let Some(entries) = &options.entry {
            entry::check_entry_map(entries)?;
        }

        Ok(options)
    }

    /// Name pattern for the `html` module rule
    pub fn html_name(&self) -> &str {
        self.html_name.as_deref().unwrap_or("[name].[ext]")
    }
}

/// `splitChunks`: `true` for the vendors preset, or an explicit object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SplitChunks {
    Enabled(bool),
    Custom(Map<String, Value>),
}

impl Default for SplitChunks {
    fn default() -> Self {
        SplitChunks::Enabled(false)
    }
}

impl SplitChunks {
    /// Only a literal `true` puts the shared `vendors` chunk on every page.
    pub fn is_preset(&self) -> bool {
        matches!(self, SplitChunks::Enabled(true))
    }

    /// Optimization settings for the host, if splitting is on
    pub fn to_optimization(&self) -> Option<Value> {
        match self {
            SplitChunks::Enabled(false) => None,
            SplitChunks::Enabled(true) => Some(json!({
                "chunks": "all",
                "name": "vendors",
                "minChunks": 2,
            })),
            SplitChunks::Custom(options) => Some(Value::Object(options.clone())),
        }
    }
}

/// `selectEntry`: `true` for the default prompt, or prompt overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectEntry {
    Enabled(bool),
    Prompt(PromptOptions),
}

impl Default for SelectEntry {
    fn default() -> Self {
        SelectEntry::Enabled(false)
    }
}

impl SelectEntry {
    /// Prompt settings when selection is requested
    pub fn prompt(&self) -> Option<PromptOptions> {
        match self {
            SelectEntry::Enabled(false) => None,
            SelectEntry::Enabled(true) => Some(PromptOptions::default()),
            SelectEntry::Prompt(prompt) => Some(prompt.clone()),
        }
    }
}

/// Settings for the entry selection prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptOptions {
    #[serde(default = "default_message")]
    pub message: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            message: default_message(),
            page_size: default_page_size(),
        }
    }
}

fn default_message() -> String {
    "Please select your entry pages".to_string()
}

fn default_page_size() -> usize {
    18
}

/// JSON schema of the activation options
static OPTIONS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "entry": {
                "type": "object",
                "additionalProperties": {
                    "anyOf": [
                        { "type": "string" },
                        {
                            "type": "array",
                            "items": { "type": ["string", "object"] },
                        },
                    ],
                },
            },
            "htmlName": {
                "type": "string",
                "minLength": 1,
            },
            "deepPageEntry": {
                "type": "boolean",
            },
            "splitChunks": {
                "anyOf": [
                    { "type": "boolean" },
                    { "type": "object" },
                ],
            },
            "html": {
                "type": "object",
                "properties": {
                    "template": {
                        "type": "string",
                        "minLength": 1,
                        "pattern": ".ejs$",
                    },
                },
            },
            "selectEntry": {
                "anyOf": [
                    { "type": "boolean" },
                    { "type": "object" },
                ],
            },
        },
    })
});

static OPTIONS_VALIDATOR: Lazy<std::result::Result<Validator, String>> =
    Lazy::new(|| jsonschema::validator_for(&OPTIONS_SCHEMA).map_err(|e| e.to_string()));

/// Check raw options against the schema, returning every violation as
/// `<path> <message>`.
pub fn validate(raw: &Value) -> Vec<String> {
    let validator = match OPTIONS_VALIDATOR.as_ref() {
        Ok(validator) => validator,
        Err(e) => return vec![format!("options schema failed to compile: {}", e)],
    };

    validator
        .iter_errors(raw)
        .map(|error| {
            let path = data_path(&error.instance_path().to_string());
            if path.is_empty() {
                error.to_string()
            } else {
                format!("{} {}", path, error)
            }
        })
        .collect()
}

/// `/html/template` -> `.html.template`
fn data_path(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| format!(".{}", segment.replace("~1", "/").replace("~0", "~")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn is_valid(raw: Value) -> bool {
        validate(&raw).is_empty()
    }

    #[test]
    fn test_entry() {
        assert!(is_valid(json!({ "entry": {} })));
        assert!(!is_valid(json!({ "entry": "src/pages/a.js" })));
        assert!(is_valid(json!({
            "entry": { "a": "a.js", "b": ["b.js", { "title": "B" }] }
        })));
        assert!(!is_valid(json!({ "entry": { "a": 1 } })));
        assert!(!is_valid(json!({ "entry": { "a": ["a.js", 2] } })));
    }

    #[test]
    fn test_html_name() {
        assert!(is_valid(json!({ "htmlName": "foo" })));
        assert!(!is_valid(json!({ "htmlName": "" })));
        assert!(!is_valid(json!({ "htmlName": 3 })));
    }

    #[test]
    fn test_deep_page_entry() {
        assert!(is_valid(json!({ "deepPageEntry": true })));
        assert!(!is_valid(json!({ "deepPageEntry": "yes" })));
    }

    #[test]
    fn test_split_chunks() {
        assert!(is_valid(json!({ "splitChunks": true })));
        assert!(is_valid(json!({ "splitChunks": {} })));
        assert!(is_valid(json!({ "splitChunks": { "foo": "bar" } })));
        assert!(!is_valid(json!({ "splitChunks": "vendors" })));
    }

    #[test]
    fn test_html_template_extension() {
        assert!(is_valid(json!({ "html": {} })));
        assert!(is_valid(json!({ "html": { "template": "document.ejs" } })));
        assert!(!is_valid(json!({ "html": { "template": "document.html" } })));
        assert!(is_valid(json!({ "html": { "foo": "bar" } })));
    }

    #[test]
    fn test_select_entry() {
        assert!(is_valid(json!({ "selectEntry": true })));
        assert!(is_valid(json!({ "selectEntry": {} })));
        assert!(!is_valid(json!({ "selectEntry": 1 })));
    }

    #[test]
    fn test_reports_every_violation() {
        let errors = validate(&json!({
            "htmlName": "",
            "html": { "template": "document.html" },
            "routes": [],
        }));

        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("routes")));
        assert!(errors
            .iter()
            .any(|e| e.starts_with(".htmlName ") && e.contains("shorter than 1")));
        assert!(errors
            .iter()
            .any(|e| e.starts_with(".html.template ") && e.contains(".ejs$")));
    }

    #[test]
    fn test_data_path() {
        assert_eq!(data_path(""), "");
        assert_eq!(data_path("/html/template"), ".html.template");
        assert_eq!(data_path("/entry/shop~1list"), ".entry.shop/list");
    }

    #[test]
    fn test_from_value_types_options() {
        let options = MpaOptions::from_value(&json!({
            "deepPageEntry": true,
            "splitChunks": true,
            "html": { "title": "Shop" },
            "selectEntry": { "pageSize": 5 },
        }))
        .unwrap();

        assert!(options.deep_page_entry);
        assert!(options.split_chunks.is_preset());
        assert_eq!(options.html.unwrap()["title"], "Shop");
        let prompt = options.select_entry.prompt().unwrap();
        assert_eq!(prompt.page_size, 5);
        assert_eq!(prompt.message, "Please select your entry pages");
    }

    #[test]
    fn test_from_value_rejects_invalid_options() {
        let err = MpaOptions::from_value(&json!({ "html": "yes" })).unwrap_err();
        assert!(matches!(err, MpaError::Validation { .. }));
        assert!(err.to_string().contains("1. .html "));
    }

    #[test]
    fn test_null_means_defaults() {
        let options = MpaOptions::from_value(&Value::Null).unwrap();
        assert_eq!(options, MpaOptions::default());
        assert_eq!(options.html_name(), "[name].[ext]");
        assert!(options.select_entry.prompt().is_none());
    }

    #[test]
    fn test_split_chunks_optimization() {
        assert_eq!(SplitChunks::Enabled(false).to_optimization(), None);
        assert_eq!(
            SplitChunks::Enabled(true).to_optimization(),
            Some(json!({ "chunks": "all", "name": "vendors", "minChunks": 2 }))
        );

        let custom = SplitChunks::Custom(
            json!({ "chunks": "all", "minSize": 0 })
                .as_object()
                .cloned()
                .unwrap(),
        );
        assert!(!custom.is_preset());
        assert_eq!(
            custom.to_optimization(),
            Some(json!({ "chunks": "all", "minSize": 0 }))
        );
    }
}
