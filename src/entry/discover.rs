//! Page discovery
//!
//! Scans the pages directory for script files and turns each one into an
//! entry named after its path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use super::{EntryMap, EntrySpec};
use crate::error::{MpaError, Result};
use crate::utils::path_to_module_id;

/// Script extensions recognized as pages
pub const PAGE_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];

/// Resolve the entries of a build.
///
/// An explicit map is returned as is. Otherwise `pages_root` is listed,
/// descending into subdirectories when `deep` is set.
pub fn resolve(pages_root: &Path, explicit: Option<&EntryMap>, deep: bool) -> Result<EntryMap> {
    if let Some(entries) = explicit {
        debug!("Using {} explicit entries", entries.len());
        return Ok(entries.clone());
    }

    info!(
        "options.entry is not set, finding pages in {}",
        pages_root.display()
    );

    let mut entries = EntryMap::new();

    for relative in list_pages(pages_root, deep)? {
        let absolute = pages_root.join(&relative);
        let Some(source) = absolute.to_str() else {
            warn!("Skipping page with a non UTF-8 path: {}", absolute.display());
            continue;
        };

        let name = page_name(&relative);
        debug!("Found page: {} -> {}", name, source);

        if entries.contains_key(&name) {
            warn!("Page '{}' is defined more than once, using {}", name, source);
        }
        entries.insert(name, EntrySpec::from_sources([source.to_string()]));
    }

    if entries.is_empty() {
        warn!("No pages found in {}", pages_root.display());
    }

    Ok(entries)
}

/// Page files under `root`, relative to it, in sorted walk order.
///
/// Symbolic links are neither pages nor descended into.
fn list_pages(root: &Path, deep: bool) -> Result<Vec<PathBuf>> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(MpaError::Configuration(format!(
                "pages path is not a directory: {}",
                root.display()
            )))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(MpaError::Configuration(format!(
                "pages directory not found: {}",
                root.display()
            )))
        }
        Err(e) => return Err(e.into()),
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if deep { usize::MAX } else { 1 })
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !entry.file_type().is_dir() || is_visible_dir(entry));

    let mut pages = Vec::new();
    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() || !is_page_file(entry.path()) {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            pages.push(relative.to_path_buf());
        }
    }

    Ok(pages)
}

/// Hidden and double-underscore directories are never entered.
fn is_visible_dir(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    !name.starts_with('.') && !name.starts_with("__")
}

fn is_page_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);

    !hidden
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| PAGE_EXTENSIONS.contains(&ext))
            .unwrap_or(false)
}

/// `about/team.tsx` -> `about/team`
fn page_name(relative: &Path) -> String {
    path_to_module_id(&relative.with_extension(""))
}

fn walk_error(err: walkdir::Error) -> MpaError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(io) => MpaError::FileSystem(io),
        None => MpaError::Configuration(message),
    }
}
