//! campuscache CLI - inspect and refresh the site content cache.
//!
//! Default run loads every content type (cache-first) and prints a
//! per-type summary. `--refresh` is the operator's force-refresh
//! trigger: it drops every cache entry and reloads. `--ticker` prints
//! the active notice ticker.

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use campuscache::cache::CacheManager;
use campuscache::config::Config;
use campuscache::store::{DiskStore, RestStore};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("campuscache starting");

    let config = Config::load()?;
    let remote = RestStore::new(config.api_base_url()?, config.api_key.clone())?;
    let local = DiskStore::new(config.cache_dir()?)?;
    let manager = CacheManager::new(remote, local);

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("--refresh") => {
            let payloads = manager.invalidate_all().await;
            print_summary(&payloads);
            println!("Content refreshed successfully!");
        }
        Some("--ticker") => {
            let notices = manager.load_ticker().await;
            if notices.is_empty() {
                println!("No active notices at this time");
            }
            for notice in notices {
                println!("[{}] {} ({})", notice.category, notice.title, notice.date);
            }
        }
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            eprintln!("Usage: campuscache [--refresh | --ticker]");
            std::process::exit(2);
        }
        None => {
            let payloads = manager.load_all().await;
            print_summary(&payloads);
        }
    }

    info!("campuscache done");
    Ok(())
}

fn print_summary(payloads: &[campuscache::content::Payload]) {
    for payload in payloads {
        let status = match payload.item_count() {
            Some(count) => format!("{} items", count),
            None if payload.is_fallback() => "not configured".to_string(),
            None => "configured".to_string(),
        };
        println!("{:<14} {}", payload.content_type(), status);
    }
}
