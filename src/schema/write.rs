// src/schema/write.rs

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use super::types::Dataset;
use crate::process::keys::to_camel_case;

/// Column headers each tab of the published sheet is expected to carry.
pub fn sheet_headers(ds: Dataset) -> &'static [&'static str] {
    match ds {
        Dataset::Team => &["name", "role", "department", "photo", "linkedin", "bio"],
        Dataset::Webinars => &[
            "Title",
            "Date",
            "Time",
            "Speakers",
            "Description",
            "Full Description",
            "Agenda",
            "Key Takeaways",
            "Target Audience",
            "Prerequisites",
            "Event Type",
            "Duration",
            "Location",
            "Price",
            "Banner Image",
            "Tags",
            "CPD Credits",
            "Featured",
            "Status",
            "Register Link",
            "Recording Link",
            "Agenda Details",
        ],
        Dataset::Training => &[
            "title",
            "category",
            "description",
            "duration",
            "format",
            "price",
            "priceNote",
            "image",
            "badge",
            "featured",
            "nextSession",
        ],
        Dataset::Trainers => &["name", "title", "photo", "bio"],
        Dataset::Jobs => &[
            "title",
            "department",
            "location",
            "type",
            "description",
            "requirements",
            "applyLink",
        ],
        Dataset::Practices => &[
            "name",
            "tagline",
            "homeDescription",
            "description",
            "services",
            "icon",
        ],
        Dataset::Industries => &["name", "description", "practices", "icon"],
    }
}

/// Record keys a consumer can rely on once `ds` has been parsed.
pub fn expected_keys(ds: Dataset) -> Vec<String> {
    sheet_headers(ds).iter().map(|h| to_camel_case(h)).collect()
}

#[derive(Debug, Serialize)]
struct ColumnSpec {
    header: &'static str,
    key: String,
}

const INSTRUCTIONS: &str = "\
WEBSITE DATA SHEET

Publishing
  1. Import these tabs into one spreadsheet (one tab per CSV file, named after the file).
  2. File > Share > Publish to web > Entire Document.
  3. Copy the document id from https://docs.google.com/spreadsheets/d/<ID>/edit
     and set it as sheet_id (or SHEETFEED_SHEET_ID).

Conventions
  - Keep the header row exactly as written; headers become camelCase record keys.
  - List cells (agenda, keyTakeaways, tags, services, practices) are pipe-separated.
  - agendaDetails: Part title::bullet;;bullet|Part title::bullet
  - featured: true or false. Only one webinar should be featured.
  - Webinar status: upcoming or recorded.
  - Training badge: new, popular or empty.
  - An empty Jobs tab (header only) hides the job listings.

Images
  - Local paths such as images/team/first-last.jpg are preferred.
  - Google Drive share links in photo/image columns are rewritten to direct links.
";

/// One CSV row, quoted where needed, `\n`-terminated.
fn csv_row(cells: &[&str]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(cells).context("writing csv row")?;
    wtr.into_inner()
        .map_err(|e| e.into_error())
        .context("flushing csv row")
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("template path has no file name")?;
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));
    let mut tmp = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    tmp.write_all(contents)
        .with_context(|| format!("writing {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
    Ok(())
}

/// Write one header-only CSV per tab, `Instructions.txt` and a `columns.json`
/// manifest into `dir`. Returns the written paths.
pub fn write_templates<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::with_capacity(Dataset::ALL.len() + 2);
    let mut manifest: BTreeMap<&'static str, Vec<ColumnSpec>> = BTreeMap::new();

    for ds in Dataset::ALL {
        let headers = sheet_headers(ds);
        let path = dir.join(format!("{}.csv", ds.sheet_name()));
        write_atomic(&path, &csv_row(headers)?)?;
        written.push(path);

        manifest.insert(
            ds.sheet_name(),
            headers
                .iter()
                .map(|&header| ColumnSpec {
                    header,
                    key: to_camel_case(header),
                })
                .collect(),
        );
    }

    let path = dir.join("Instructions.txt");
    write_atomic(&path, INSTRUCTIONS.as_bytes())?;
    written.push(path);

    let path = dir.join("columns.json");
    let mut json = serde_json::to_vec_pretty(&manifest).context("serializing column manifest")?;
    json.push(b'\n');
    write_atomic(&path, &json)?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "wrote sheet templates");
    Ok(written)
}
