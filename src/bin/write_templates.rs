//! write_templates.rs
//!
//! Writes one header-only CSV per spreadsheet tab, an `Instructions.txt`
//! and a `columns.json` manifest (header → record key) into a directory,
//! default `templates/`. Import the CSVs into the spreadsheet to create
//! tabs the loader can read.

use anyhow::Result;
use sheetfeed::{logging, schema::write_templates};
use std::env;
use tracing::info;

fn main() -> Result<()> {
    logging::init();
    let dir = env::args().nth(1).unwrap_or_else(|| "templates".to_string());

    let written = write_templates(&dir)?;
    for path in &written {
        info!("wrote {}", path.display());
    }
    info!("{} files in {}", written.len(), dir);
    Ok(())
}
