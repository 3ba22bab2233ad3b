// src/fetch/urls.rs

use anyhow::{Context, Result};
use url::{form_urlencoded, Url};

/// Build the CSV export URL for one tab of the published sheet.
///
/// `{base}{sheet_id}/gviz/tq?tqx=out:csv&sheet=<tab>&_=<cache_buster>`
pub fn sheet_csv_url(base: &str, sheet_id: &str, sheet_name: &str, cache_buster: i64) -> Result<Url> {
    let base = if base.ends_with('/') {
        Url::parse(base)
    } else {
        Url::parse(&format!("{}/", base))
    }
    .with_context(|| format!("parsing sheet base URL {}", base))?;

    let mut url = base
        .join(&format!("{}/gviz/tq", sheet_id))
        .with_context(|| format!("joining sheet id {}", sheet_id))?;
    url.query_pairs_mut()
        .append_pair("tqx", "out:csv")
        .append_pair("sheet", sheet_name)
        .append_pair("_", &cache_buster.to_string());
    Ok(url)
}

/// Route `target` through a URL-rewriting relay that takes the target as an
/// encoded query argument, e.g. `https://corsproxy.io/?<encoded>`.
pub fn wrap_relay(relay_prefix: &str, target: &Url) -> Result<Url> {
    let encoded: String = form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
    let relayed = format!("{}{}", relay_prefix, encoded);
    Url::parse(&relayed).with_context(|| format!("parsing relay URL {}", relayed))
}
