// src/cache/session.rs

//! Session-scoped flags. They outlive the in-memory cache (a reload of the
//! host) but not the session itself.

use anyhow::{Context, Result};
use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::warn;

pub trait SessionStore: Send + Sync {
    fn set_flag(&self, name: &str);
    fn has_flag(&self, name: &str) -> bool;
    /// Read and clear in one step.
    fn take_flag(&self, name: &str) -> bool;
}

/// Flags kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySession {
    flags: Mutex<HashSet<String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn set_flag(&self, name: &str) {
        self.flags
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.to_string());
    }

    fn has_flag(&self, name: &str) -> bool {
        self.flags
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(name)
    }

    fn take_flag(&self, name: &str) -> bool {
        self.flags
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name)
    }
}

/// Flags stored as marker files in a session directory, so they survive a
/// restart that reuses the same directory. I/O failures read as "not set".
#[derive(Debug, Clone)]
pub struct FileSession {
    dir: PathBuf,
}

impl FileSession {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating session directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn flag_path(&self, name: &str) -> PathBuf {
        let safe: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.flag", safe))
    }
}

impl SessionStore for FileSession {
    fn set_flag(&self, name: &str) {
        let path = self.flag_path(name);
        if let Err(e) = fs::write(&path, b"1") {
            warn!(path = %path.display(), error = %e, "could not persist session flag");
        }
    }

    fn has_flag(&self, name: &str) -> bool {
        self.flag_path(name).is_file()
    }

    fn take_flag(&self, name: &str) -> bool {
        let path = self.flag_path(name);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not clear session flag");
                false
            }
        }
    }
}
