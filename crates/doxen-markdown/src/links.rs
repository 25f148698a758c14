//! Link and image source classification.

use std::borrow::Cow;

/// True for URLs that leave the documentation tree.
fn is_external(url: &str) -> bool {
    url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with("data:")
}

/// True for image sources resolved next to the document file.
pub(crate) fn is_document_relative(src: &str) -> bool {
    !src.is_empty() && !is_external(src) && !src.starts_with('/') && !src.starts_with('#')
}

/// Remove markdown backslash escapes from a link destination.
///
/// `images/a\_b.png` → `images/a_b.png`. A backslash before anything other
/// than ASCII punctuation is kept.
pub fn unescape_destination(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && next.is_ascii_punctuation()
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Destination of an inline image or link exactly as written in `source`.
///
/// `source` is the markdown text of the element and `dest_url` the
/// destination the parser reported. Returns `None` when no written
/// destination unescapes to `dest_url`, as for reference-style images.
pub(crate) fn raw_destination<'a>(source: &'a str, dest_url: &str) -> Option<&'a str> {
    source
        .match_indices("](")
        .filter_map(|(pos, opener)| scan_destination(&source[pos + opener.len()..]))
        .find(|raw| unescape_destination(raw) == dest_url)
}

/// Scan a link destination at the start of `text`.
fn scan_destination(text: &str) -> Option<&str> {
    let text = text.trim_start_matches([' ', '\t', '\r', '\n']);

    if let Some(rest) = text.strip_prefix('<') {
        let mut escaped = false;
        for (i, c) in rest.char_indices() {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '>' => return Some(&rest[..i]),
                '<' | '\n' => return None,
                _ => {}
            }
        }
        return None;
    }

    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' if depth == 0 => return Some(&text[..i]),
            ')' => depth -= 1,
            c if c.is_ascii_whitespace() || c.is_ascii_control() => return Some(&text[..i]),
            _ => {}
        }
    }
    Some(text)
}

/// Resolve a markdown link to a page key.
///
/// - `./sibling.md` in base `domain` → `domain/sibling`
/// - `../other.md` in base `domain/billing` → `domain/other`
/// - `adr/index.md` in base `domain` → `domain/adr`
/// - `/guide.md` → `guide`
///
/// Returns `None` for external, fragment-only and non-markdown links.
/// The fragment (including `#`) is returned separately.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
pub(crate) fn resolve_page_link<'a>(url: &'a str, base_key: &str) -> Option<(String, &'a str)> {
    if is_external(url) || url.starts_with('#') {
        return None;
    }

    let (path_part, fragment) = url.find('#').map_or((url, ""), |pos| url.split_at(pos));
    if !path_part.ends_with(".md") {
        return None;
    }

    let resolved = match path_part.strip_prefix('/') {
        Some(absolute) => resolve_relative(absolute, ""),
        None => resolve_relative(path_part, base_key),
    };

    let clean = resolved.strip_suffix(".md").unwrap_or(&resolved);
    let clean = if clean == "index" {
        ""
    } else {
        clean.strip_suffix("/index").unwrap_or(clean)
    };

    Some((clean.to_owned(), fragment))
}

/// Resolve a relative path against a base key treated as a directory.
fn resolve_relative(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            // Popping past the root stays at the root
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolve_page_link_relative() {
        assert_eq!(
            resolve_page_link("adr-101/index.md", "domains/billing"),
            Some(("domains/billing/adr-101".to_owned(), ""))
        );
        assert_eq!(
            resolve_page_link("./sibling.md", "domain"),
            Some(("domain/sibling".to_owned(), ""))
        );
    }

    #[test]
    fn test_resolve_page_link_parent() {
        assert_eq!(
            resolve_page_link("../other.md#usage", "domains/billing"),
            Some(("domains/other".to_owned(), "#usage"))
        );
    }

    #[test]
    fn test_resolve_page_link_absolute_and_root_index() {
        assert_eq!(
            resolve_page_link("/guide.md", "deep/base"),
            Some(("guide".to_owned(), ""))
        );
        assert_eq!(
            resolve_page_link("../index.md", "domain"),
            Some((String::new(), ""))
        );
    }

    #[test]
    fn test_resolve_page_link_ignores_non_pages() {
        assert_eq!(resolve_page_link("https://example.com/a.md", "x"), None);
        assert_eq!(resolve_page_link("#section", "x"), None);
        assert_eq!(resolve_page_link("file.pdf", "x"), None);
    }

    #[test]
    fn test_is_document_relative() {
        assert!(is_document_relative("images/diagram.png"));
        assert!(is_document_relative("../shared/logo.png"));
        assert!(!is_document_relative("/static/logo.png"));
        assert!(!is_document_relative("https://example.com/a.png"));
        assert!(!is_document_relative("data:image/png;base64,AAAA"));
        assert!(!is_document_relative(""));
    }

    #[test]
    fn test_unescape_destination() {
        assert_eq!(unescape_destination("images/a.png"), "images/a.png");
        assert_eq!(unescape_destination(r"images/a\_b.png"), "images/a_b.png");
        assert_eq!(unescape_destination(r"a\\\_b"), r"a\_b");
        assert_eq!(unescape_destination(r"dir\name"), r"dir\name");
    }

    #[test]
    fn test_raw_destination_keeps_escapes() {
        assert_eq!(
            raw_destination(r"![d](images/a\_b.png)", "images/a_b.png"),
            Some(r"images/a\_b.png")
        );
        assert_eq!(
            raw_destination(r#"![d]( images/x.png "Title")"#, "images/x.png"),
            Some("images/x.png")
        );
    }

    #[test]
    fn test_raw_destination_angle_brackets_and_parens() {
        assert_eq!(
            raw_destination("![d](<images/a b.png>)", "images/a b.png"),
            Some("images/a b.png")
        );
        assert_eq!(
            raw_destination("![d](img/chart(1).png)", "img/chart(1).png"),
            Some("img/chart(1).png")
        );
    }

    #[test]
    fn test_raw_destination_skips_links_in_alt() {
        assert_eq!(
            raw_destination(r"![see [x](y) here](img/\*x.png)", "img/*x.png"),
            Some(r"img/\*x.png")
        );
    }

    #[test]
    fn test_raw_destination_reference_style() {
        assert_eq!(raw_destination("![d][logo]", "images/logo.png"), None);
    }
}
