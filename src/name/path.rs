//! Absolute path normalization and path arithmetic over decoded segments.

use super::error::{NameError, NameResult};

pub(crate) const ROOT_PATH: &str = "/";

/// Normalizes an already-decoded path: empty and `.` segments are dropped and
/// `..` pops its parent. A `..` with nothing left to pop underflows, and so
/// does a path whose trailing `..` pops its last segment (`/a/..`).
pub(crate) fn normalize_path(decoded: &str) -> NameResult<String> {
    let mut out: Vec<&str> = Vec::new();
    let mut ends_with_parent = false;
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if out.pop().is_none() {
                    return Err(NameError::underflow(decoded));
                }
                ends_with_parent = true;
            }
            other => {
                out.push(other);
                ends_with_parent = false;
            }
        }
    }
    if ends_with_parent && out.is_empty() {
        return Err(NameError::underflow(decoded));
    }
    Ok(join_segments(&out))
}

pub(crate) fn join_segments(segments: &[&str]) -> String {
    if segments.is_empty() {
        ROOT_PATH.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

pub(crate) fn parent_path(path: &str) -> Option<String> {
    if path == ROOT_PATH {
        return None;
    }
    let parts = segments(path);
    Some(join_segments(&parts[..parts.len().saturating_sub(1)]))
}

/// Relative path from `base` to `target`, both normalized. `.` when equal.
pub(crate) fn relative_path(base: &str, target: &str) -> String {
    let from = segments(base);
    let to = segments(target);
    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat("..").take(from.len() - common));
    parts.extend(to[common..].iter().copied());
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_segments_and_empty_segments() {
        assert_eq!(normalize_path("/a/./b/../c").unwrap(), "/a/c");
        assert_eq!(normalize_path("//a///b/").unwrap(), "/a/b");
        assert_eq!(normalize_path("").unwrap(), "/");
        assert_eq!(normalize_path("/a/b/..").unwrap(), "/a");
        assert_eq!(normalize_path("/a/../b").unwrap(), "/b");
        assert_eq!(normalize_path("/a/b/../../c/").unwrap(), "/c");
    }

    #[test]
    fn underflow_is_an_error() {
        assert!(normalize_path("/a/..").is_err());
        assert!(normalize_path("/a/b/../..").is_err());
        assert!(normalize_path("/..").is_err());
        assert!(normalize_path("/a/../").is_err());
        assert!(normalize_path("/a/../../b").is_err());
    }

    #[test]
    fn computes_parent_and_relative_paths() {
        assert_eq!(parent_path("/a/b").as_deref(), Some("/a"));
        assert_eq!(parent_path("/a").as_deref(), Some("/"));
        assert_eq!(parent_path("/"), None);
        assert_eq!(relative_path("/a/b", "/a/b/c/d"), "c/d");
        assert_eq!(relative_path("/a/b", "/a/x"), "../x");
        assert_eq!(relative_path("/a", "/a"), ".");
    }
}
