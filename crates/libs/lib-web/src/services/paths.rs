//! # Path Rewriting
//!
//! Pass-through routes keep everything after the resource prefix:
//!
//! ```text
//! /api/challenges/42/participants?status=active
//!     → /challenges/42/participants?status=active
//! ```

use axum::http::Uri;
use percent_encoding::percent_decode_str;

/// Swap `inbound` for `outbound` at the start of `uri`'s path, keeping the
/// suffix segments and the query string verbatim.
///
/// Returns `None` when the path is not under `inbound` (a prefix must end at a
/// segment boundary: `/api/challengesX` is not under `/api/challenges`).
pub fn rewrite_prefix(uri: &Uri, inbound: &str, outbound: &str) -> Option<String> {
    let suffix = uri.path().strip_prefix(inbound)?;
    if !(suffix.is_empty() || suffix.starts_with('/')) {
        return None;
    }

    let mut rewritten = format!("{}{}", outbound, suffix);
    if let Some(query) = uri.query() {
        rewritten.push('?');
        rewritten.push_str(query);
    }
    Some(rewritten)
}

/// True if any segment of `path` is `.` or `..` once percent-decoded.
///
/// The backend URL parser resolves dot segments, percent-encoded ones and
/// backslash separators included, so a pass-through path containing one could
/// climb out of its namespace.
pub fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| {
        percent_decode_str(segment)
            .decode_utf8_lossy()
            .split(['/', '\\'])
            .any(|part| part == "." || part == "..")
    })
}

/// Append a raw query string to a backend path.
pub fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path.to_string(),
    }
}

/// Reject path identifiers that would escape their segment.
pub fn is_safe_segment(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '?', '#']) && id != "." && id != ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_keeps_suffix_and_query() {
        let uri: Uri = "/api/challenges/42/participants?status=active&page=2".parse().unwrap();
        assert_eq!(
            rewrite_prefix(&uri, "/api/challenges", "/challenges").as_deref(),
            Some("/challenges/42/participants?status=active&page=2")
        );

        let uri: Uri = "/api/challenges".parse().unwrap();
        assert_eq!(
            rewrite_prefix(&uri, "/api/challenges", "/challenges").as_deref(),
            Some("/challenges")
        );
    }

    #[test]
    fn test_rewrite_requires_segment_boundary() {
        let uri: Uri = "/api/challengesX".parse().unwrap();
        assert_eq!(rewrite_prefix(&uri, "/api/challenges", "/challenges"), None);

        let uri: Uri = "/api/signals".parse().unwrap();
        assert_eq!(rewrite_prefix(&uri, "/api/challenges", "/challenges"), None);
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/users", Some("role=admin")), "/users?role=admin");
        assert_eq!(with_query("/users", Some("")), "/users");
        assert_eq!(with_query("/users", None), "/users");
    }

    #[test]
    fn test_dot_segments_detected() {
        assert!(has_dot_segment("/api/challenges/../users"));
        assert!(has_dot_segment("/api/challenges/%2e%2E/signals"));
        assert!(has_dot_segment("/api/challenges/.%2e"));
        assert!(has_dot_segment("/api/challenges/42/%2E"));
        assert!(has_dot_segment("/api/challenges/..%2Fusers"));
        assert!(has_dot_segment("/api/challenges/..\\users"));

        assert!(!has_dot_segment("/api/challenges/42/participants"));
        assert!(!has_dot_segment("/api/challenges/v1.2/...rules"));
        assert!(!has_dot_segment("/api/challenges"));
    }

    #[test]
    fn test_safe_segment() {
        assert!(is_safe_segment("abc-123"));
        assert!(!is_safe_segment("../admin"));
        assert!(!is_safe_segment(".."));
        assert!(!is_safe_segment(""));
    }
}
