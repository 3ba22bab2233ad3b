// src/schema/mod.rs

pub mod fallback;
pub mod types;
pub mod write;

pub use fallback::demo_records;
pub use types::{Dataset, Record};
pub use write::{expected_keys, sheet_headers, write_templates};
