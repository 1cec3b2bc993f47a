//! Product image paths.

use std::path::{Component, Path, PathBuf};

/// Route prefix product images are served under.
pub(crate) const IMAGE_ROUTE: &str = "/api/products/images/";

/// Catalog image paths are stored as the seed files wrote them; strip the
/// first of these prefixes to get a path relative to the upload directory.
const IMAGE_PREFIXES: [&str; 3] = ["../assets/images/", "assets/images/", "images/"];

/// Normalise a stored image path to one relative to the upload directory.
pub(crate) fn clean_image_path(path: &str) -> String {
    let path = path.replace('\\', "/");

    IMAGE_PREFIXES
        .iter()
        .find_map(|prefix| path.split_once(prefix).map(|(_, rest)| rest.to_string()))
        .unwrap_or(path)
}

/// Public URL of a stored image path; empty when the product has no image.
pub(crate) fn image_url(path: &str) -> String {
    let cleaned = clean_image_path(path.trim());

    if cleaned.is_empty() {
        return String::new();
    }

    format!("{IMAGE_ROUTE}{cleaned}")
}

/// Join a requested image path onto `root`, refusing anything that could
/// escape it.
pub(crate) fn resolve_image_path(root: &Path, requested: &str) -> Option<PathBuf> {
    let requested = Path::new(requested);

    let mut components = requested.components().peekable();

    components.peek()?;

    if components.all(|component| matches!(component, Component::Normal(_))) {
        Some(root.join(requested))
    } else {
        None
    }
}
