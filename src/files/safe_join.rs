//! Path-safety boundary
//!
//! Joins an untrusted relative filename under a trusted base directory.
//! Unsafe input is rejected, never sanitized.

use std::path::{Path, PathBuf};

/// Separators other than `/` that some platforms accept
const ALT_SEPARATORS: &[char] = &['\\'];

/// Join `filename` under `base`, or `None` when the name could escape it
pub fn safe_join(base: &Path, filename: &str) -> Option<PathBuf> {
    let normalized = normalize(filename);

    if normalized.contains(ALT_SEPARATORS) {
        return None;
    }
    if normalized.starts_with('/') || normalized == ".." || normalized.starts_with("../") {
        return None;
    }
    if normalized == "." {
        return Some(base.to_path_buf());
    }

    Some(base.join(normalized))
}

/// Lexical POSIX normalization: collapses `//`, `.` and `name/..`
///
/// Leading `..` segments of a relative path are kept so the caller can
/// see the traversal.
fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().map_or(false, |last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            name => parts.push(name),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a//b/./c"), "a/b/c");
        assert_eq!(normalize("a/../b"), "b");
        assert_eq!(normalize("a/../../b"), "../b");
        assert_eq!(normalize("/../etc"), "/etc");
        assert_eq!(normalize(""), ".");
    }

    #[test]
    fn test_plain_name_joined() {
        let base = Path::new("/srv/models/m1");
        assert_eq!(
            safe_join(base, "wind.nc"),
            Some(PathBuf::from("/srv/models/m1/wind.nc"))
        );
    }

    #[test]
    fn test_traversal_rejected() {
        let base = Path::new("/srv/models/m1");
        assert_eq!(safe_join(base, ".."), None);
        assert_eq!(safe_join(base, "a/../../b"), None);
        assert_eq!(safe_join(base, "/etc/passwd"), None);
    }

    #[test]
    fn test_inner_traversal_normalized() {
        let base = Path::new("/srv");
        assert_eq!(safe_join(base, "a/../b.txt"), Some(PathBuf::from("/srv/b.txt")));
    }
}
