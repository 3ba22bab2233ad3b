// src/process/mod.rs

pub mod keys;
pub mod split;

use tracing::debug;

use crate::fetch::drive::convert_drive_url;
use crate::schema::Record;
use keys::to_camel_case;
use split::split_line;

/// Columns whose key mentions a photo or image hold a picture URL.
fn is_image_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.contains("photo") || key.contains("image")
}

/// Parse exported sheet CSV into records, one per non-blank data line.
///
/// - Line 0 is the header; input with fewer than two lines yields nothing.
/// - Headers are trimmed and camelCased; empty ones drop the column.
/// - Missing trailing values become `""`, surplus values are ignored.
/// - Photo/image columns are passed through `convert_drive_url`.
pub fn parse_csv(text: &str) -> Vec<Record> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    // (column index, key, rewrite as image url)
    let columns: Vec<(usize, String, bool)> = split_line(lines[0])
        .into_iter()
        .enumerate()
        .filter_map(|(idx, header)| {
            let header = header.trim();
            if header.is_empty() {
                return None;
            }
            let key = to_camel_case(header);
            if key.is_empty() {
                return None;
            }
            let image = is_image_key(&key);
            Some((idx, key, image))
        })
        .collect();

    let mut records = Vec::with_capacity(lines.len() - 1);
    let mut blank = 0usize;

    for line in &lines[1..] {
        let line = line.trim();
        if line.is_empty() {
            blank += 1;
            continue;
        }

        let values = split_line(line);
        let mut record = Record::new();
        for (idx, key, image) in &columns {
            let raw = values.get(*idx).map(String::as_str).unwrap_or("");
            let value = if *image {
                convert_drive_url(raw).unwrap_or_default()
            } else {
                raw.to_string()
            };
            record.insert(key.clone(), value);
        }
        records.push(record);
    }

    debug!(
        columns = columns.len(),
        rows = records.len(),
        blank,
        "parsed sheet csv"
    );
    records
}
