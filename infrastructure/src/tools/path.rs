//! Path resolution shared by the file tools.

use crew_domain::util::normalize_path;
use std::path::{Path, PathBuf};

/// Resolve a model-supplied path: relative paths are joined onto the
/// project root, absolute paths are kept. The result is lexically
/// normalized (`.` and `..` removed) without touching the filesystem.
pub(crate) fn resolve(project_root: &Path, raw: &str) -> PathBuf {
    let raw = Path::new(raw.trim());
    let joined = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        project_root.join(raw)
    };
    normalize_path(&joined)
}

/// Whether `path` lies inside `root` after normalization of both.
pub(crate) fn is_within(root: &Path, path: &Path) -> bool {
    normalize_path(path).starts_with(normalize_path(root))
}

/// [`is_within`], then the same check on the real filesystem: the deepest
/// existing ancestor of `path` (the path itself when it exists) is
/// canonicalized, so a symlink inside the root cannot point the write
/// elsewhere. A dangling symlink is rejected.
pub(crate) fn is_contained(root: &Path, path: &Path) -> bool {
    if !is_within(root, path) {
        return false;
    }
    let Ok(real_root) = root.canonicalize() else {
        // Nothing exists under a missing root yet
        return true;
    };

    let path = normalize_path(path);
    let Some(existing) = path.ancestors().find(|p| p.symlink_metadata().is_ok()) else {
        return true;
    };
    match existing.canonicalize() {
        Ok(real) => real.starts_with(&real_root),
        Err(_) => false,
    }
}
