//! Page entries
//!
//! An entry names one bundle starting point and the source files that make
//! it up. Entries come either from explicit options or from scanning the
//! pages directory.

mod discover;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{MpaError, Result};

pub use discover::{resolve, PAGE_EXTENSIONS};

/// Page name -> entry, in configuration or discovery order
pub type EntryMap = IndexMap<String, EntrySpec>;

/// Sources of a single entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntrySpec {
    /// A single source path
    Single(String),
    /// Source paths, optionally closed by a template context object
    Sequence(Vec<EntryItem>),
}

/// One element of an entry sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryItem {
    Path(String),
    Context(Map<String, Value>),
}

impl EntrySpec {
    /// Build an entry from plain source paths
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EntrySpec::Sequence(
            sources
                .into_iter()
                .map(|s| EntryItem::Path(s.into()))
                .collect(),
        )
    }

    /// Source paths, skipping any context object
    pub fn sources(&self) -> Vec<&str> {
        match self {
            EntrySpec::Single(path) => vec![path.as_str()],
            EntrySpec::Sequence(items) => items
                .iter()
                .filter_map(|item| match item {
                    EntryItem::Path(path) => Some(path.as_str()),
                    EntryItem::Context(_) => None,
                })
                .collect(),
        }
    }

    /// First source path
    pub fn first_source(&self) -> Option<&str> {
        self.sources().into_iter().next()
    }

    /// Detach a trailing context object from the source paths.
    pub fn into_parts(self) -> (Vec<String>, Option<Map<String, Value>>) {
        match self {
            EntrySpec::Single(path) => (vec![path], None),
            EntrySpec::Sequence(mut items) => {
                let context = match items.last() {
                    Some(EntryItem::Context(_)) => match items.pop() {
                        Some(EntryItem::Context(context)) => Some(context),
                        _ => None,
                    },
                    _ => None,
                };
                let sources = items
                    .into_iter()
                    .filter_map(|item| match item {
                        EntryItem::Path(path) => Some(path),
                        EntryItem::Context(_) => None,
                    })
                    .collect();
                (sources, context)
            }
        }
    }

    /// Check the shape of an entry: at least one non-empty path, and a
    /// context object only in last position.
    pub fn check(&self, name: &str) -> Result<()> {
        if let EntrySpec::Sequence(items) = self {
            let last = items.len().saturating_sub(1);
            if items
                .iter()
                .enumerate()
                .any(|(i, item)| matches!(item, EntryItem::Context(_)) && i != last)
            {
                return Err(MpaError::validation(format!(
                    ".entry['{}'] may only end with a context object",
                    name
                )));
            }
        }

        let sources = self.sources();
        if sources.is_empty() {
            return Err(MpaError::validation(format!(
                ".entry['{}'] should have at least one source path",
                name
            )));
        }
        if sources.iter().any(|s| s.is_empty()) {
            return Err(MpaError::validation(format!(
                ".entry['{}'] should not contain empty paths",
                name
            )));
        }

        Ok(())
    }
}

/// Check every entry of an explicit map, reporting all problems at once.
pub fn check_entry_map(entries: &EntryMap) -> Result<()> {
    let mut errors = Vec::new();

    for (name, spec) in entries {
        if name.is_empty() {
            errors.push(".entry should not contain an empty page name".to_string());
            continue;
        }
        if let Err(MpaError::Validation { errors: found }) = spec.check(name) {
            errors.extend(found);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(MpaError::Validation { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn spec(value: Value) -> EntrySpec {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_deserialize_shapes() {
        assert_eq!(spec(json!("a.js")), EntrySpec::Single("a.js".to_string()));
        assert_eq!(spec(json!(["a.js", "b.js"])), EntrySpec::from_sources(["a.js", "b.js"]));
    }

    #[test]
    fn test_into_parts_strips_trailing_context() {
        let (sources, context) = spec(json!(["a.js", "b.js", { "title": "A" }])).into_parts();

        assert_eq!(sources, vec!["a.js".to_string(), "b.js".to_string()]);
        assert_eq!(context.unwrap()["title"], "A");
    }

    #[test]
    fn test_into_parts_without_context() {
        let (sources, context) = spec(json!("a.js")).into_parts();
        assert_eq!(sources, vec!["a.js".to_string()]);
        assert!(context.is_none());
    }

    #[test]
    fn test_first_source_skips_nothing_but_context() {
        let entry = spec(json!(["src/a.tsx", { "title": "A" }]));
        assert_eq!(entry.first_source(), Some("src/a.tsx"));
        assert_eq!(entry.sources(), vec!["src/a.tsx"]);
    }

    #[test]
    fn test_check_rejects_bad_entries() {
        assert!(spec(json!([{ "title": "A" }])).check("a").is_err());
        assert!(spec(json!([{ "title": "A" }, "a.js"])).check("a").is_err());
        assert!(spec(json!([])).check("a").is_err());
        assert!(spec(json!("")).check("a").is_err());
        assert!(spec(json!(["a.js", { "title": "A" }])).check("a").is_ok());
    }

    #[test]
    fn test_check_entry_map_collects_errors() {
        let entries: EntryMap = serde_json::from_value(json!({
            "": "x.js",
            "a": [],
            "b": "b.js",
        }))
        .unwrap();

        match check_entry_map(&entries) {
            Err(MpaError::Validation { errors }) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
