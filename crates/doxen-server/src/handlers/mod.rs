//! HTTP request handlers.

pub(crate) mod navigation;
pub(crate) mod pages;
pub(crate) mod root;

/// Convert a tree key (without leading slash) to a URL path (with leading slash).
pub(crate) fn to_url_path(key: &str) -> String {
    if key.is_empty() {
        "/".to_owned()
    } else {
        format!("/{key}")
    }
}

/// Normalize a requested page into a tree key.
pub(crate) fn to_key(page: &str) -> &str {
    page.trim_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_url_path() {
        assert_eq!(to_url_path(""), "/");
        assert_eq!(to_url_path("domain/billing"), "/domain/billing");
    }

    #[test]
    fn test_to_key() {
        assert_eq!(to_key("/guide/"), "guide");
        assert_eq!(to_key("/"), "");
        assert_eq!(to_key("a/b"), "a/b");
    }
}
