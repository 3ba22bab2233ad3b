// src/loader.rs

use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::{form_urlencoded, Url};

use crate::{
    cache::{Clock, FileSession, MemorySession, SessionStore, SheetCache, SystemClock},
    config::Config,
    fetch::{
        drive::convert_drive_url,
        urls::{sheet_csv_url, wrap_relay},
        SheetClient,
    },
    process::parse_csv,
    schema::{demo_records, Dataset, Record},
};

/// What `initialize` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub cache_cleared: bool,
    /// The page URL with the refresh parameter removed, when it was present.
    /// The host should show this URL in place of the original without reloading.
    pub clean_url: Option<Url>,
}

/// Resolves datasets: fresh cache, then network, then stale cache, then
/// placeholder records. `load` never fails.
pub struct DataLoader {
    config: Config,
    client: SheetClient,
    cache: SheetCache,
    session: Arc<dyn SessionStore>,
}

impl DataLoader {
    /// Build a loader from configuration, using the system clock. Session
    /// flags go to `config.session_dir` when set, otherwise memory.
    pub fn new(config: Config) -> Result<Self> {
        let client = SheetClient::new(config.request_timeout())?;
        let session: Arc<dyn SessionStore> = match &config.session_dir {
            Some(dir) => Arc::new(FileSession::new(dir)?),
            None => Arc::new(MemorySession::new()),
        };
        Ok(Self::with_parts(config, client, Arc::new(SystemClock), session))
    }

    pub fn with_parts(
        config: Config,
        client: SheetClient,
        clock: Arc<dyn Clock>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        let cache = SheetCache::new(config.cache_ttl(), clock);
        Self {
            config,
            client,
            cache,
            session,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &SheetCache {
        &self.cache
    }

    /// Run the startup invalidation checks once, before the first load.
    ///
    /// 1) the refresh query parameter on `page_url` clears the cache and is
    ///    stripped from the returned URL;
    /// 2) the session force-refresh flag clears the cache and is consumed.
    pub fn initialize(&self, page_url: Option<&Url>) -> InitOutcome {
        let mut outcome = InitOutcome {
            cache_cleared: false,
            clean_url: None,
        };

        if let Some(url) = page_url {
            let param = self.config.refresh_param.as_str();
            if url.query_pairs().any(|(k, _)| k == param) {
                self.cache.clear();
                outcome.cache_cleared = true;
                outcome.clean_url = Some(strip_query_param(url, param));
                info!(param, "cache cleared by page parameter");
            }
        }

        if self.session.take_flag(&self.config.session_flag) {
            self.cache.clear();
            outcome.cache_cleared = true;
            info!(flag = %self.config.session_flag, "cache cleared by session flag");
        }

        outcome
    }

    /// Export URL for `ds`, with a fresh cache-buster and the relay applied
    /// when enabled.
    pub fn request_url(&self, ds: Dataset) -> Result<Url> {
        let url = sheet_csv_url(
            &self.config.base_url,
            &self.config.sheet_id,
            ds.sheet_name(),
            self.cache.now().timestamp_millis(),
        )?;
        if self.config.relay_enabled() {
            wrap_relay(&self.config.relay_prefix, &url)
        } else {
            Ok(url)
        }
    }

    async fn fetch(&self, ds: Dataset) -> Result<Vec<Record>> {
        let url = self.request_url(ds)?;
        info!(dataset = %ds, %url, "fetching sheet");
        let text = self.client.get_text(&url).await?;
        Ok(parse_csv(&text))
    }

    /// Resolve `ds`. Always returns something, possibly empty; an empty
    /// result is passed through as-is for the caller to interpret.
    #[instrument(level = "debug", skip(self), fields(dataset = %ds))]
    pub async fn load(&self, ds: Dataset) -> Vec<Record> {
        if let Some(records) = self.cache.get_fresh(ds) {
            debug!(rows = records.len(), "cache hit");
            return records;
        }

        match self.fetch(ds).await {
            Ok(records) => {
                self.cache.store(ds, records.clone());
                records
            }
            Err(e) => {
                if let Some(stale) = self.cache.get_any(ds) {
                    warn!(error = %format!("{:#}", e), rows = stale.len(), "fetch failed, serving stale cache");
                    return stale;
                }
                let demo = demo_records(ds);
                warn!(error = %format!("{:#}", e), rows = demo.len(), "fetch failed, serving placeholder data");
                demo
            }
        }
    }

    pub async fn load_team(&self) -> Vec<Record> {
        self.load(Dataset::Team).await
    }

    pub async fn load_webinars(&self) -> Vec<Record> {
        self.load(Dataset::Webinars).await
    }

    pub async fn load_training_programs(&self) -> Vec<Record> {
        self.load(Dataset::Training).await
    }

    pub async fn load_trainers(&self) -> Vec<Record> {
        self.load(Dataset::Trainers).await
    }

    pub async fn load_jobs(&self) -> Vec<Record> {
        self.load(Dataset::Jobs).await
    }

    pub async fn load_practices(&self) -> Vec<Record> {
        self.load(Dataset::Practices).await
    }

    pub async fn load_industries(&self) -> Vec<Record> {
        self.load(Dataset::Industries).await
    }

    /// Load every dataset concurrently.
    pub async fn load_all(&self) -> Vec<(Dataset, Vec<Record>)> {
        join_all(
            Dataset::ALL
                .into_iter()
                .map(|ds| async move { (ds, self.load(ds).await) }),
        )
        .await
    }

    pub fn convert_image_url(&self, url: &str) -> Option<String> {
        convert_drive_url(url)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Ask the next `initialize` (e.g. after a restart in the same session)
    /// to start from an empty cache.
    pub fn force_refresh_next_load(&self) {
        self.session.set_flag(&self.config.session_flag);
        info!(flag = %self.config.session_flag, "forced refresh requested for next load");
    }

    /// Drop the cache and fetch every dataset again right away.
    pub async fn refresh_and_reload(&self) -> Vec<(Dataset, Vec<Record>)> {
        self.cache.clear();
        self.load_all().await
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

/// Drop every `param` / `param=...` pair, leaving the rest of the query as written.
fn strip_query_param(url: &Url, param: &str) -> Url {
    let kept: Vec<&str> = url
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|pair| {
            let key = pair.split_once('=').map_or(*pair, |(k, _)| k);
            !pair.is_empty() && !query_key_matches(key, param)
        })
        .collect();

    let mut clean = url.clone();
    if kept.is_empty() {
        clean.set_query(None);
    } else {
        clean.set_query(Some(&kept.join("&")));
    }
    clean
}

fn query_key_matches(raw_key: &str, param: &str) -> bool {
    form_urlencoded::parse(raw_key.as_bytes()).any(|(k, _)| k == param)
}
