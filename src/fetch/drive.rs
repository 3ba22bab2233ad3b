// src/fetch/drive.rs

use once_cell::sync::Lazy;
use regex::Regex;

const DIRECT_MARKER: &str = "uc?export=view";

/// File-id extractors, tried in order: `/file/d/<id>`, `id=<id>`, `/d/<id>`.
static FILE_ID_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"/file/d/([a-zA-Z0-9_-]+)").expect("file/d pattern"),
        Regex::new(r"id=([a-zA-Z0-9_-]+)").expect("id= pattern"),
        Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("d/ pattern"),
    ]
});

/// Rewrite a Google Drive share link into a directly loadable image URL.
///
/// Returns `None` for empty input ("no image"). Links that are already direct,
/// or that are not Drive links at all (e.g. `images/team/x.jpg`), come back as-is.
pub fn convert_drive_url(url: &str) -> Option<String> {
    if url.is_empty() {
        return None;
    }
    if url.contains(DIRECT_MARKER) {
        return Some(url.to_string());
    }

    for re in FILE_ID_PATTERNS.iter() {
        if let Some(id) = re.captures(url).and_then(|caps| caps.get(1)) {
            return Some(format!(
                "https://drive.google.com/uc?export=view&id={}",
                id.as_str()
            ));
        }
    }

    Some(url.to_string())
}
