//! Utility functions and helpers

use std::path::Path;

/// Get a path relative to `from`, for display
pub fn relative_path(from: &Path, to: &Path) -> String {
    pathdiff::diff_paths(to, from)
        .map(|p| path_to_module_id(&p))
        .unwrap_or_else(|| path_to_module_id(to))
}

/// Convert a file path to a `/`-separated identifier
pub fn path_to_module_id(path: &Path) -> String {
    path.display()
        .to_string()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_module_id() {
        assert_eq!(path_to_module_id(Path::new("shop/detail/item")), "shop/detail/item");
        assert_eq!(path_to_module_id(Path::new("./index")), "./index");
        assert_eq!(path_to_module_id(Path::new("/app/src")), "/app/src");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/app"), Path::new("/app/src/pages/a.js")),
            "src/pages/a.js"
        );
        assert_eq!(relative_path(Path::new("/app"), Path::new("/lib/x.js")), "../lib/x.js");
    }
}
