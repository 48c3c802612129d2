//! Maintenance CLI for the offline cache layer.
//!
//! Lets a deploy warm, inspect, and wipe the shell cache without a
//! browser attached:
//!
//! - `fiadocache warm`: install (pre-warm) and activate
//! - `fiadocache status`: list buckets and their entries
//! - `fiadocache clear`: drop every bucket, all versions
//! - `fiadocache get <url>`: fetch one URL through the routing policy

use std::io::{self, Write};

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fiadocache::{
    CacheStorage, CacheWorker, ControlMessage, HttpFetcher, ShellConfig, ShellRequest,
};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_usage() {
    eprintln!("usage: fiadocache <warm|status|clear|get <url>>");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    let config = ShellConfig::load()?;
    let storage = CacheStorage::new(config.cache_dir()?)?;

    match args.get(1).map(String::as_str) {
        Some("warm") => warm(config, storage).await,
        Some("status") => status(config, storage),
        Some("clear") => clear(config, storage),
        Some("get") => match args.get(2) {
            Some(url) => get(config, storage, url).await,
            None => {
                print_usage();
                std::process::exit(2);
            }
        },
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

/// Pre-warm the current bucket and garbage-collect stale ones.
async fn warm(config: ShellConfig, storage: CacheStorage) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.origin)?;
    let mut worker = CacheWorker::new(config, storage, fetcher);

    worker.install().await?;
    worker.activate()?;
    info!("cache warmed");
    Ok(())
}

fn status(config: ShellConfig, storage: CacheStorage) -> Result<()> {
    let names = storage.bucket_names()?;
    if names.is_empty() {
        println!("no cache buckets");
        return Ok(());
    }

    for name in names {
        let bucket = storage.open(&name)?;
        let marker = if name == config.cache_name() {
            " (current)"
        } else {
            ""
        };
        println!("{}{}: {} entries", name, marker, bucket.len());
        for key in bucket.request_keys() {
            println!("  {}", key);
        }
    }
    Ok(())
}

fn clear(config: ShellConfig, storage: CacheStorage) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.origin)?;
    let mut worker = CacheWorker::new(config, storage, fetcher);

    let (tx, mut rx) = tokio::sync::oneshot::channel();
    worker.on_message(ControlMessage::ClearCache, Some(tx))?;

    // on_message acknowledges before returning
    if rx.try_recv().map(|ack| ack.success).unwrap_or(false) {
        println!("cache cleared");
    }
    Ok(())
}

/// Fetch one URL the way an intercepted page navigation would be served:
/// cache-first, network write-back, offline fallback.
async fn get(config: ShellConfig, storage: CacheStorage, url: &str) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.origin)?;
    let worker = CacheWorker::new(config, storage, fetcher);

    let response = worker.intercept(&ShellRequest::navigation(url)).await?;
    info!(status = response.status, bytes = response.body.len(), "response");
    io::stdout().write_all(&response.body)?;
    Ok(())
}
