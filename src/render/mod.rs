// src/render/mod.rs

//! Helpers applied at the render boundary to anything that came from the sheet.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Display;

static SAFE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(https?://|/|images/|\./)").expect("safe url pattern"));

/// Escape text for insertion into HTML element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    html_escape::encode_quoted_attribute(s).into_owned()
}

/// `escape_html` for any displayable value; `None` renders as nothing.
pub fn escape_display<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => escape_html(&v.to_string()),
        None => String::new(),
    }
}

/// Allow only http(s) URLs and site-relative paths (`/`, `images/`, `./`).
///
/// Anything else (`javascript:`, `data:`, `vbscript:`, garbage) becomes `""`,
/// which callers treat as "omit this link or image".
pub fn sanitize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || !SAFE_URL.is_match(url) {
        return String::new();
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_characters_are_neutralized() {
        let raw = "<script>alert('x') & \"y\"</script>";
        let out = escape_html(raw);
        for ch in ['<', '>', '"', '\''] {
            assert!(!out.contains(ch), "{:?} left in {}", ch, out);
        }
        assert!(out.starts_with("&lt;script&gt;"));
        assert!(out.contains("&amp;"));
        assert!(out.contains("&quot;y&quot;"));
        assert_eq!(html_escape::decode_html_entities(&out), raw);
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("Dubai, UAE"), "Dubai, UAE");
    }

    #[test]
    fn display_values_are_stringified() {
        assert_eq!(escape_display(Some(42)), "42");
        assert_eq!(escape_display(Some("a<b")), "a&lt;b");
        assert_eq!(escape_display::<&str>(None), "");
    }

    #[test]
    fn dangerous_schemes_are_rejected() {
        assert_eq!(sanitize_url("javascript:alert(1)"), "");
        assert_eq!(sanitize_url("  JavaScript:alert(1)"), "");
        assert_eq!(sanitize_url("data:text/html;base64,xx"), "");
        assert_eq!(sanitize_url("vbscript:msgbox"), "");
        assert_eq!(sanitize_url("www.example.com"), "");
        assert_eq!(sanitize_url(""), "");
    }

    #[test]
    fn web_urls_and_site_paths_pass() {
        assert_eq!(sanitize_url("https://example.com"), "https://example.com");
        assert_eq!(sanitize_url("HTTP://example.com/x"), "HTTP://example.com/x");
        assert_eq!(sanitize_url("/about"), "/about");
        assert_eq!(sanitize_url(" images/team/a.jpg "), "images/team/a.jpg");
        assert_eq!(sanitize_url("./careers.html"), "./careers.html");
    }
}
