//! Per-entry artifact composition
//!
//! Turns resolved entries into final bundle source lists and, when HTML
//! generation is on, one document descriptor per page plus the development
//! entry list.

mod document;

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::assets::BundledAssets;
use crate::config::{BuildEnv, MpaOptions};
use crate::entry::{EntryMap, EntrySpec};
use crate::error::Result;

pub use document::{DocumentDescriptor, PAGE_PLACEHOLDER};

/// Marker identifying the host's hot reload client script
pub const HOT_CLIENT_MARKER: &str = "webpackHotDevClient.js";

/// Name of the shared chunk produced by the `splitChunks: true` preset
pub const VENDORS_CHUNK: &str = "vendors";

/// Extension of page templates placed next to a page
pub const TEMPLATE_EXTENSION: &str = "ejs";

/// Output of a composition run
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Entries with their final source lists
    pub entries: EntryMap,

    /// Page documents, then the entry list when present
    pub documents: Vec<DocumentDescriptor>,
}

/// Composes entries for one build
pub struct Composer<'a> {
    options: &'a MpaOptions,
    env: &'a BuildEnv,
    assets: &'a BundledAssets,
    root: &'a Path,
}

impl<'a> Composer<'a> {
    /// `root` anchors relative entry paths when looking for page templates.
    pub fn new(
        options: &'a MpaOptions,
        env: &'a BuildEnv,
        assets: &'a BundledAssets,
        root: &'a Path,
    ) -> Self {
        Self {
            options,
            env,
            assets,
            root,
        }
    }

    /// Compose every entry in order.
    ///
    /// `dev_reload` is the host's first entry script; it is only prepended
    /// in development and when it is the hot reload client.
    pub fn compose(&self, entries: EntryMap, dev_reload: Option<&str>) -> Result<Composition> {
        let dev_reload = dev_reload.filter(|script| {
            self.env.is_development() && script.contains(HOT_CLIENT_MARKER)
        });

        let mut composed = EntryMap::with_capacity(entries.len());
        let mut documents = Vec::new();

        for (name, spec) in entries {
            spec.check(&name)?;
            let (sources, context) = spec.into_parts();

            if let Some(html) = &self.options.html {
                documents.push(self.page_document(&name, html, &sources, context)?);
            }

            let mut final_sources = Vec::with_capacity(sources.len() + 2);
            if self.env.polyfill {
                final_sources.push(self.assets.polyfill.display().to_string());
            }
            if let Some(script) = dev_reload {
                final_sources.push(script.to_string());
            }
            final_sources.extend(sources);

            debug!("Entry {}: {:?}", name, final_sources);
            composed.insert(name, EntrySpec::from_sources(final_sources));
        }

        if self.env.is_development() && self.options.html.is_some() {
            documents.push(self.entry_list(&composed));
        }

        Ok(Composition {
            entries: composed,
            documents,
        })
    }

    fn page_document(
        &self,
        name: &str,
        html: &Map<String, Value>,
        sources: &[String],
        context: Option<Map<String, Value>>,
    ) -> Result<DocumentDescriptor> {
        let chunks = if self.options.split_chunks.is_preset() {
            json!([VENDORS_CHUNK, name])
        } else {
            json!([name])
        };

        let mut options = Map::new();
        options.insert(
            "template".to_string(),
            json!(self.assets.document_template.display().to_string()),
        );
        options.insert("filename".to_string(), json!(format!("{}.html", name)));
        options.insert("chunks".to_string(), chunks);

        // Each page gets its own copy of the shared options.
        options.extend(html.clone());
        if let Some(context) = context {
            options.extend(context);
        }

        if let Some(template) = sources.first().and_then(|s| self.sibling_template(s)) {
            debug!("Using page template {} for {}", template.display(), name);
            options.insert("template".to_string(), json!(template.display().to_string()));
        }

        DocumentDescriptor::from_options(name, options)
    }

    /// `pages/foo.tsx` -> `pages/foo.ejs`, when that file exists
    fn sibling_template(&self, source: &str) -> Option<PathBuf> {
        let template = Path::new(source).with_extension(TEMPLATE_EXTENSION);
        self.root.join(&template).is_file().then_some(template)
    }

    fn entry_list(&self, entries: &EntryMap) -> DocumentDescriptor {
        let names: Vec<String> = entries.keys().cloned().collect();

        let filename = if entries.contains_key("index") {
            let filename = "__index.html";
            warn!(
                "Since we already have index.html, checkout http://localhost:{}/{} for entry list.",
                self.env.port, filename
            );
            filename
        } else {
            "index.html"
        };

        DocumentDescriptor::entry_list(self.assets.entry_list_template.clone(), filename, names)
    }
}
