// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf, time::Duration};
use tracing::debug;
use url::Url;

/// Placeholder left in fresh checkouts until a real sheet is wired in.
pub const PLACEHOLDER_SHEET_ID: &str = "YOUR_GOOGLE_SHEET_ID_HERE";

/// Loader configuration. Every field has a default; a YAML file and then
/// `SHEETFEED_*` environment variables may override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Document id of the published spreadsheet.
    pub sheet_id: String,
    /// Prefix the sheet id is appended to.
    pub base_url: String,
    /// Relay that takes the URL-encoded target appended to it.
    pub relay_prefix: String,
    /// Force the relay on or off. Unset means "on when `host` is local".
    pub use_relay: Option<bool>,
    /// Host the site is served from; empty when not known.
    pub host: String,
    pub cache_ttl_secs: u64,
    /// Page query parameter that clears the cache on `initialize`.
    pub refresh_param: String,
    /// Session flag that clears the cache on the next `initialize`.
    pub session_flag: String,
    /// Keep session flags on disk here instead of in memory.
    pub session_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_id: "1M0Pjn2PqD3977Wg0ZSk6iDu3wfYdL8zZAKIIPbb6R58".to_string(),
            base_url: "https://docs.google.com/spreadsheets/d/".to_string(),
            relay_prefix: "https://corsproxy.io/?".to_string(),
            use_relay: None,
            host: String::new(),
            cache_ttl_secs: 5 * 60,
            refresh_param: "refresh".to_string(),
            session_flag: "sheetsForceRefresh".to_string(),
            session_dir: None,
            request_timeout_secs: None,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Defaults, then `SHEETFEED_CONFIG` (YAML) if set, then individual
    /// `SHEETFEED_*` variables.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match env::var("SHEETFEED_CONFIG") {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| env::var(key).ok())?;
        debug!(?cfg, "configuration loaded");
        Ok(cfg)
    }

    /// Overlay values from a `SHEETFEED_*` lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("SHEETFEED_SHEET_ID") {
            self.sheet_id = v;
        }
        if let Some(v) = lookup("SHEETFEED_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("SHEETFEED_RELAY_PREFIX") {
            self.relay_prefix = v;
        }
        if let Some(v) = lookup("SHEETFEED_USE_RELAY") {
            self.use_relay = Some(
                parse_bool(&v).with_context(|| format!("SHEETFEED_USE_RELAY={:?}", v))?,
            );
        }
        if let Some(v) = lookup("SHEETFEED_HOST") {
            self.host = v;
        }
        if let Some(v) = lookup("SHEETFEED_CACHE_TTL_SECS") {
            self.cache_ttl_secs = v
                .trim()
                .parse()
                .with_context(|| format!("SHEETFEED_CACHE_TTL_SECS={:?}", v))?;
        }
        if let Some(v) = lookup("SHEETFEED_SESSION_DIR") {
            self.session_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("SHEETFEED_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = Some(
                v.trim()
                    .parse()
                    .with_context(|| format!("SHEETFEED_REQUEST_TIMEOUT_SECS={:?}", v))?,
            );
        }
        Ok(())
    }

    /// Take `host` from the page being served when none is configured.
    pub fn adopt_page_host(&mut self, page: &Url) {
        if !self.host.is_empty() {
            return;
        }
        if let Some(host) = page.host_str() {
            self.host = host.to_string();
        }
    }

    /// Whether requests go through the relay.
    pub fn relay_enabled(&self) -> bool {
        self.use_relay
            .unwrap_or_else(|| matches!(self.host.as_str(), "localhost" | "127.0.0.1"))
    }

    pub fn is_configured(&self) -> bool {
        let id = self.sheet_id.trim();
        !id.is_empty() && id != PLACEHOLDER_SHEET_ID
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn relay_follows_host_unless_forced() {
        let mut cfg = Config::default();
        assert!(!cfg.relay_enabled());
        cfg.host = "localhost".into();
        assert!(cfg.relay_enabled());
        cfg.host = "www.example.com".into();
        assert!(!cfg.relay_enabled());
        cfg.use_relay = Some(true);
        assert!(cfg.relay_enabled());
        cfg.host = "127.0.0.1".into();
        cfg.use_relay = Some(false);
        assert!(!cfg.relay_enabled());
    }

    #[test]
    fn page_host_turns_on_the_relay_only_when_unset() {
        let local = Url::parse("http://localhost:8000/jobs.html?refresh").unwrap();
        let public = Url::parse("https://www.example.com/").unwrap();

        let mut cfg = Config::default();
        cfg.adopt_page_host(&local);
        assert_eq!(cfg.host, "localhost");
        assert!(cfg.relay_enabled());

        let mut cfg = Config {
            host: "www.example.com".into(),
            ..Config::default()
        };
        cfg.adopt_page_host(&local);
        assert_eq!(cfg.host, "www.example.com");
        assert!(!cfg.relay_enabled());

        let mut cfg = Config::default();
        cfg.adopt_page_host(&public);
        assert!(!cfg.relay_enabled());
    }

    #[test]
    fn placeholder_sheet_is_not_configured() {
        let mut cfg = Config::default();
        assert!(cfg.is_configured());
        cfg.sheet_id = PLACEHOLDER_SHEET_ID.into();
        assert!(!cfg.is_configured());
        cfg.sheet_id = "  ".into();
        assert!(!cfg.is_configured());
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() -> Result<()> {
        let mut f = NamedTempFile::new()?;
        writeln!(f, "sheet_id: abc\nhost: www.example.com\ncache_ttl_secs: 60")?;
        let cfg = Config::from_yaml_file(f.path())?;
        assert_eq!(cfg.sheet_id, "abc");
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(60));
        assert_eq!(cfg.refresh_param, "refresh");
        assert!(!cfg.relay_enabled());
        Ok(())
    }

    #[test]
    fn env_overrides_are_applied_and_validated() -> Result<()> {
        let vars: HashMap<&str, &str> = [
            ("SHEETFEED_SHEET_ID", "xyz"),
            ("SHEETFEED_USE_RELAY", "off"),
            ("SHEETFEED_REQUEST_TIMEOUT_SECS", "15"),
        ]
        .into_iter()
        .collect();
        let mut cfg = Config::default();
        cfg.apply_overrides(|k| vars.get(k).map(|v| v.to_string()))?;
        assert_eq!(cfg.sheet_id, "xyz");
        assert_eq!(cfg.use_relay, Some(false));
        assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));

        let bad = Config::default()
            .apply_overrides(|k| (k == "SHEETFEED_CACHE_TTL_SECS").then(|| "soon".to_string()));
        assert!(bad.is_err());
        Ok(())
    }
}
