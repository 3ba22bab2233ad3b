// src/main.rs

use anyhow::{bail, Context, Result};
use sheetfeed::{logging, Config, DataLoader, Dataset};
use std::{collections::BTreeMap, env, process::exit};
use tracing::{info, warn};
use url::Url;

const USAGE: &str = "Usage: sheetfeed [--page <URL>] [--refresh] [DATASET ...]";

struct Args {
    page: Option<Url>,
    refresh: bool,
    datasets: Vec<Dataset>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        page: None,
        refresh: false,
        datasets: Vec::new(),
    };
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--page" => {
                let raw = it.next().context("--page needs a URL")?;
                args.page = Some(Url::parse(&raw).with_context(|| format!("bad page URL {}", raw))?);
            }
            "--refresh" => args.refresh = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                exit(0);
            }
            name => match Dataset::from_name(name) {
                Some(ds) => args.datasets.push(ds),
                None => bail!("unknown dataset {:?}\n{}", name, USAGE),
            },
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init();
    let args = parse_args()?;

    // ─── 2) configuration ────────────────────────────────────────────
    let mut config = Config::from_env()?;
    if let Some(page) = &args.page {
        config.adopt_page_host(page);
    }
    if !config.is_configured() {
        warn!("no sheet id configured; every dataset will use placeholder data");
    }
    let loader = DataLoader::new(config)?;

    // ─── 3) startup invalidation ─────────────────────────────────────
    let outcome = loader.initialize(args.page.as_ref());
    if let Some(clean) = &outcome.clean_url {
        info!(%clean, "page URL without refresh parameter");
    }

    // ─── 4) load ─────────────────────────────────────────────────────
    let loaded = if args.refresh {
        loader.refresh_and_reload().await
    } else if args.datasets.is_empty() {
        loader.load_all().await
    } else {
        let mut out = Vec::with_capacity(args.datasets.len());
        for ds in args.datasets.iter().copied() {
            out.push((ds, loader.load(ds).await));
        }
        out
    };

    // ─── 5) emit JSON keyed by logical name ──────────────────────────
    let wanted: Vec<Dataset> = args.datasets;
    let report: BTreeMap<&str, _> = loaded
        .iter()
        .filter(|(ds, _)| wanted.is_empty() || wanted.contains(ds))
        .map(|(ds, records)| (ds.logical_name(), records))
        .collect();
    for (name, records) in &report {
        info!(dataset = name, rows = records.len(), "loaded");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
