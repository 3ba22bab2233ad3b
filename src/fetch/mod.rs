// src/fetch/mod.rs

pub mod drive;
pub mod urls;

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Thin HTTP wrapper used by the loader to pull CSV text.
#[derive(Clone, Debug)]
pub struct SheetClient {
    client: Client,
}

impl SheetClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// GET `url` and return the body as text. Any non-2xx status is an error.
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        debug!("Fetching text from {}", url);
        self.client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .await
            .with_context(|| format!("Reading text from {}", url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::SheetServer;

    #[tokio::test]
    async fn returns_body_on_success() -> Result<()> {
        let server = SheetServer::start();
        server.respond(200, "name\nAda\n");
        let client = SheetClient::new(None)?;
        let url = Url::parse(&format!("{}sheet.csv", server.base_url()))?;
        assert_eq!(client.get_text(&url).await?, "name\nAda\n");
        assert_eq!(server.hits(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() -> Result<()> {
        let server = SheetServer::start();
        server.respond(404, "missing");
        let client = SheetClient::new(None)?;
        let url = Url::parse(&format!("{}sheet.csv", server.base_url()))?;
        let err = client.get_text(&url).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Non-success status"));
        Ok(())
    }
}
