//! Offline support layer for the açougue fiado ledger.
//!
//! The centerpiece is the [`CacheWorker`]: a request-interception layer
//! that keeps the application shell (root document, stylesheet, script,
//! logo, offline page) available without a network connection. It owns a
//! single versioned cache bucket and three lifecycle phases: install
//! (pre-warm), activate (garbage-collect stale buckets), and fetch
//! (cache-first with network write-back).
//!
//! Live ledger data stays live: anything under the `/api/` prefix is
//! never served from or written to the cache.
//!
//! The crate also carries the pure client-side helpers the ledger's forms
//! use: CPF check-digit validation and Brazilian display formatting.

pub mod cache;
pub mod config;
pub mod fetch;
pub mod models;
pub mod utils;
pub mod worker;

pub use cache::{Bucket, CacheStorage, StoredResponse};
pub use config::ShellConfig;
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use models::{Destination, Method, ResponseKind, ShellRequest, ShellResponse};
pub use worker::{CacheWorker, ClearCacheAck, ControlMessage, WorkerState};
