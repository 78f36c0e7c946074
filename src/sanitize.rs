//! Path sanitization for flat artifact names.

use std::path::Path;

/// Token substituted for every path separator.
const SEPARATOR_TOKEN: &str = "__";

/// Flatten a path into a string safe for use as a filename component.
///
/// Every `/` and `\` is replaced with a double underscore; no other
/// characters are altered. The function is total: any path produces
/// a result, and the same path always produces the same result.
///
/// # Examples
///
/// ```
/// use tikzex::sanitize::sanitize_path;
/// use std::path::Path;
///
/// assert_eq!(sanitize_path(Path::new("src/diagrams/network.tex")), "src__diagrams__network.tex");
/// ```
pub fn sanitize_path(path: &Path) -> String {
    path.to_string_lossy().replace(['/', '\\'], SEPARATOR_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_filename_unchanged() {
        assert_eq!(sanitize_path(Path::new("network.tex")), "network.tex");
    }

    #[test]
    fn test_forward_slashes_replaced() {
        assert_eq!(
            sanitize_path(Path::new("a/b/c.tex")),
            "a__b__c.tex"
        );
    }

    #[test]
    fn test_backslashes_replaced() {
        assert_eq!(
            sanitize_path(Path::new(r"docs\figures\flow.md")),
            "docs__figures__flow.md"
        );
    }

    #[test]
    fn test_absolute_path() {
        assert_eq!(
            sanitize_path(Path::new("/home/user/doc.tex")),
            "__home__user__doc.tex"
        );
    }

    #[test]
    fn test_deterministic() {
        let p = Path::new("x/y/z.tex");
        assert_eq!(sanitize_path(p), sanitize_path(p));
    }

    #[test]
    fn test_no_raw_separator_in_output() {
        let out = sanitize_path(Path::new("deep/tree/with\\mixed/seps.tex"));
        assert!(!out.contains('/'));
        assert!(!out.contains('\\'));
    }

    #[test]
    fn test_distinct_paths_stay_distinct() {
        let a = sanitize_path(Path::new("a/b.tex"));
        let b = sanitize_path(Path::new("a/c.tex"));
        assert_ne!(a, b);
    }
}
