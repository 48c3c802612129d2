//! Durable cache buckets for the application shell.
//!
//! This module provides `CacheStorage`, the on-disk home of the versioned
//! cache buckets, and `Bucket`, one named bucket mapping request keys to
//! stored responses. Buckets are plain JSON files so a deploy can inspect
//! or wipe them by hand.
//!
//! Invalidation is by version: activation deletes every bucket whose name
//! differs from the current one.

pub mod store;

pub use store::{Bucket, CacheStorage, StoredResponse};
