//! Derives the lookup key of a composed template from its page path.

use crate::path::SourcePath;

/// Strips the leading segment (the directory all templates live under) and
/// the extension: `views/admin/index.html` becomes `admin/index`. A path with
/// a single segment keeps it, so `about.html` becomes `about`. Returns `None`
/// when nothing is left.
pub fn key_of(path: &SourcePath, extension: &str) -> Option<String> {
    let segments = match path.segments() {
        [] => return None,
        [only] => std::slice::from_ref(only),
        [_, rest @ ..] => rest,
    };
    let joined = segments.join("/");
    let key = joined.strip_suffix(extension).unwrap_or(&joined);
    if key.is_empty() || key.ends_with('/') {
        None
    } else {
        Some(key.to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn key(path: &str) -> Option<String> {
        key_of(&SourcePath::parse(path), ".html")
    }

    #[test]
    fn test_key_strips_root_and_extension() {
        assert_eq!(key("views/admin/index.html").as_deref(), Some("admin/index"));
        assert_eq!(key("views/about.html").as_deref(), Some("about"));
        assert_eq!(key("templates/a/b/c/d.html").as_deref(), Some("a/b/c/d"));
    }

    #[test]
    fn test_key_any_root_segment() {
        for root in &["views", "templates", "x"] {
            assert_eq!(key(&format!("{}/a/b.html", root)).as_deref(), Some("a/b"));
        }
    }

    #[test]
    fn test_key_single_segment() {
        assert_eq!(key("about.html").as_deref(), Some("about"));
    }

    #[test]
    fn test_key_custom_extension() {
        assert_eq!(
            key_of(&SourcePath::parse("views/mail/welcome.tmpl"), ".tmpl").as_deref(),
            Some("mail/welcome")
        );
    }

    #[test]
    fn test_key_empty() {
        assert_eq!(key(""), None);
        assert_eq!(key("views/.html"), None);
    }
}
