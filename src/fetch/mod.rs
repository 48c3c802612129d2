//! Network fetch layer for intercepted requests.
//!
//! This module provides the `Fetch` trait (the seam between the routing
//! policy and the real network) and `HttpFetcher`, the reqwest-backed
//! implementation bound to the application origin.

pub mod client;
pub mod error;

pub use client::{Fetch, HttpFetcher};
pub use error::FetchError;
