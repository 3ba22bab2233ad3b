// src/lib.rs

pub mod cache;
pub mod config;
pub mod fetch;
pub mod loader;
pub mod logging;
pub mod process;
pub mod render;
pub mod schema;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::Config;
pub use loader::DataLoader;
pub use schema::{Dataset, Record};
