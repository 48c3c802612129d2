//! The offline cache worker.
//!
//! This module owns the lifecycle state machine (`WorkerState`), the
//! control-message channel (`ControlMessage` and its reply port), and
//! `CacheWorker`, which ties the cache buckets and the fetch layer
//! together behind the install / activate / intercept operations.

pub mod manager;
pub mod messages;
pub mod state;

pub use manager::CacheWorker;
pub use messages::{ClearCacheAck, ControlMessage, ReplyPort};
pub use state::WorkerState;
