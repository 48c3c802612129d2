//! The offline cache manager: lifecycle phases and the request routing
//! policy.
//!
//! One `CacheWorker` is constructed per worker lifecycle and owns the
//! active cache name, the fetch client, and the lifecycle state.

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::cache::{CacheStorage, StoredResponse};
use crate::config::ShellConfig;
use crate::fetch::{Fetch, FetchError};
use crate::models::{Destination, ShellRequest, ShellResponse};

use super::messages::{ClearCacheAck, ControlMessage, ReplyPort};
use super::state::WorkerState;

/// Maximum concurrent pre-warm fetches during install.
/// The shell asset list is small; 4 keeps install quick without hammering
/// a single-worker Flask server.
const MAX_PREWARM_CONCURRENCY: usize = 4;

/// One cache-worker instance.
pub struct CacheWorker<F> {
    config: ShellConfig,
    storage: CacheStorage,
    fetcher: F,
    state: WorkerState,
    skip_waiting: bool,
}

impl<F: Fetch> CacheWorker<F> {
    pub fn new(config: ShellConfig, storage: CacheStorage, fetcher: F) -> Self {
        Self {
            config,
            storage,
            fetcher,
            state: WorkerState::Installing,
            skip_waiting: false,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Install phase: open the current bucket and pre-warm it with the
    /// shell asset list.
    ///
    /// Individual pre-warm failures are logged and left for the fetch-path
    /// write-back to repair on first real use; a cache-open failure is
    /// returned as the phase error. The worker ends up `Installed` either
    /// way, so activation is never blocked.
    pub async fn install(&mut self) -> Result<()> {
        info!(cache = %self.config.cache_name(), "installing");
        let outcome = self.prewarm().await;
        self.state = WorkerState::Installed;
        outcome
    }

    async fn prewarm(&self) -> Result<()> {
        let cache_name = self.config.cache_name();
        let mut bucket = self
            .storage
            .open(&cache_name)
            .with_context(|| format!("Failed to open cache bucket {}", cache_name))?;

        let requests: Vec<ShellRequest> = self
            .config
            .precache_urls
            .iter()
            .map(ShellRequest::get)
            .collect();
        let total = requests.len();

        let fetcher = &self.fetcher;
        let fetched: Vec<(ShellRequest, Result<ShellResponse, FetchError>)> =
            stream::iter(requests)
                .map(|request| async move {
                    let result = fetcher.fetch(&request).await;
                    (request, result)
                })
                .buffer_unordered(MAX_PREWARM_CONCURRENCY)
                .collect()
                .await;

        let mut stored = 0;
        for (request, result) in fetched {
            match result {
                Ok(response) if response.is_cacheable() => {
                    bucket.put(&request, StoredResponse::from_response(&response))?;
                    stored += 1;
                }
                Ok(response) => {
                    warn!(
                        url = %request.url,
                        status = response.status,
                        "pre-warm response not cacheable"
                    );
                }
                Err(e) => {
                    warn!(url = %request.url, error = %e, "pre-warm fetch failed");
                }
            }
        }

        debug!(stored, total, "pre-warm finished");
        Ok(())
    }

    /// Whether the installed instance may take over page control. Gated on
    /// no other instance controlling pages, unless SKIP_WAITING was
    /// received.
    pub fn ready_to_activate(&self, other_instance_controls_pages: bool) -> bool {
        self.state == WorkerState::Installed
            && (!other_instance_controls_pages || self.skip_waiting)
    }

    /// Activate phase: delete every bucket whose name differs from the
    /// current version. The host must not route requests here until this
    /// returns.
    pub fn activate(&mut self) -> Result<()> {
        self.state = WorkerState::Activating;
        let current = self.config.cache_name();

        for name in self.storage.bucket_names()? {
            if name != current {
                info!(bucket = %name, "removing stale cache bucket");
                self.storage.delete(&name)?;
            }
        }

        self.state = WorkerState::Activated;
        info!(cache = %current, "activated");
        Ok(())
    }

    /// Superseded by a newer worker instance.
    pub fn retire(&mut self) {
        self.state = WorkerState::Redundant;
    }

    /// Route one intercepted request.
    ///
    /// Non-GET requests and API URLs go straight to the network and never
    /// touch the bucket. Everything else is cache-first with network
    /// write-back; a failed navigation falls back to the cached offline
    /// page when one exists.
    pub async fn intercept(&self, request: &ShellRequest) -> Result<ShellResponse, FetchError> {
        if !request.method.is_get() {
            return self.fetcher.fetch(request).await;
        }
        if request.is_api(&self.config.api_prefix) {
            return self.fetcher.fetch(request).await;
        }

        let cache_name = self.config.cache_name();
        let mut bucket = match self.storage.open(&cache_name) {
            Ok(bucket) => bucket,
            Err(e) => {
                // Degraded mode: cache unavailable, behave as uncached.
                warn!(cache = %cache_name, error = %e, "cache bucket unavailable, passing through");
                return self.fetcher.fetch(request).await;
            }
        };

        if let Some(stored) = bucket.match_request(request) {
            debug!(url = %request.url, "serving from cache");
            return Ok(stored.to_response());
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    if let Err(e) =
                        bucket.put(request, StoredResponse::from_response(&response))
                    {
                        warn!(url = %request.url, error = %e, "cache write-back failed");
                    }
                }
                Ok(response)
            }
            Err(e) => {
                if request.destination == Destination::Document {
                    let fallback = ShellRequest::get(&self.config.offline_fallback);
                    if let Some(stored) = bucket.match_request(&fallback) {
                        warn!(url = %request.url, "offline, serving fallback page");
                        return Ok(stored.to_response());
                    }
                }
                Err(e)
            }
        }
    }

    /// Handle an out-of-band control message from the host page.
    pub fn on_message(&mut self, message: ControlMessage, reply: Option<ReplyPort>) -> Result<()> {
        match message {
            ControlMessage::SkipWaiting => {
                debug!("skip-waiting requested");
                self.skip_waiting = true;
                Ok(())
            }
            ControlMessage::ClearCache => {
                let removed = self.storage.delete_all()?;
                info!(removed, "cleared all cache buckets");
                if let Some(port) = reply {
                    // The requesting page may already be gone.
                    let _ = port.send(ClearCacheAck { success: true });
                }
                Ok(())
            }
        }
    }
}
