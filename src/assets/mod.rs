//! Files shipped with the plugin
//!
//! The default document template, the entry list template and the polyfill
//! entry are embedded in the binary and written into the project on demand,
//! so descriptors can point the host at real files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Directory (relative to the project root) the assets are written to
pub const ASSETS_DIR: &str = ".component-mpa";

const DOCUMENT_TEMPLATE: (&str, &str) = ("document.ejs", include_str!("../../templates/document.ejs"));
const ENTRY_LIST_TEMPLATE: (&str, &str) = ("entryList.ejs", include_str!("../../templates/entryList.ejs"));
const POLYFILL: (&str, &str) = ("polyfill.js", include_str!("../../templates/polyfill.js"));

/// Locations of the bundled assets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundledAssets {
    /// Template used when a page has none of its own
    pub document_template: PathBuf,

    /// Template of the development entry list
    pub entry_list_template: PathBuf,

    /// Script prepended to every entry
    pub polyfill: PathBuf,
}

impl BundledAssets {
    /// Asset paths inside `dir`, without touching the file system
    pub fn at(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            document_template: dir.join(DOCUMENT_TEMPLATE.0),
            entry_list_template: dir.join(ENTRY_LIST_TEMPLATE.0),
            polyfill: dir.join(POLYFILL.0),
        }
    }

    /// Asset paths for a project root
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        Self::at(root.as_ref().join(ASSETS_DIR))
    }

    /// Write the assets into `dir`, leaving up-to-date files alone.
    pub fn materialize(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for (name, content) in [DOCUMENT_TEMPLATE, ENTRY_LIST_TEMPLATE, POLYFILL] {
            let path = dir.join(name);
            if fs::read_to_string(&path).map(|c| c == content).unwrap_or(false) {
                continue;
            }
            debug!("Writing bundled asset: {}", path.display());
            fs::write(&path, content)?;
        }

        Ok(Self::at(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_writes_assets() {
        let dir = tempfile::tempdir().unwrap();
        let assets = BundledAssets::materialize(dir.path().join(ASSETS_DIR)).unwrap();

        assert_eq!(assets, BundledAssets::for_root(dir.path()));
        assert!(fs::read_to_string(&assets.document_template)
            .unwrap()
            .contains("<div id=\"root\"></div>"));
        assert!(fs::read_to_string(&assets.entry_list_template)
            .unwrap()
            .contains("htmlWebpackPlugin.options.entries"));
        assert!(assets.polyfill.is_file());
    }

    #[test]
    fn test_materialize_restores_modified_files() {
        let dir = tempfile::tempdir().unwrap();
        let assets = BundledAssets::materialize(dir.path()).unwrap();
        fs::write(&assets.polyfill, "// edited").unwrap();

        BundledAssets::materialize(dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&assets.polyfill).unwrap(), POLYFILL.1);
    }
}
