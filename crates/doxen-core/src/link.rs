//! URL construction for page and signal links.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in query values. Slashes stay readable.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Build `<base>?do=<component>-<signal>&page=<page>&<params>`.
#[must_use]
pub fn signal_link(
    base_url: &str,
    component: &str,
    signal: &str,
    page: &str,
    params: &[(&str, &str)],
) -> String {
    let mut url = format!(
        "{base_url}?do={}-{}&page={}",
        encode(component),
        encode(signal),
        encode(page)
    );
    for (name, value) in params {
        url.push('&');
        url.push_str(&encode(name));
        url.push('=');
        url.push_str(&encode(value));
    }
    url
}

/// Build the URL of the page at `key`. The root page maps to `base_url`.
#[must_use]
pub fn page_link(base_url: &str, key: &str) -> String {
    if key.is_empty() {
        base_url.to_owned()
    } else {
        format!("{base_url}?page={}", encode(key))
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
