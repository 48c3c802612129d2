use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Out-of-band control message from the host page, wire-shaped as
/// `{"type": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlMessage {
    /// Take over immediately instead of waiting for the old instance's
    /// pages to close.
    #[serde(rename = "SKIP_WAITING")]
    SkipWaiting,
    /// Drop every cache bucket, all versions.
    #[serde(rename = "CLEAR_CACHE")]
    ClearCache,
}

/// Acknowledgment delivered on the reply port after a cache clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCacheAck {
    pub success: bool,
}

/// Caller-supplied response channel for messages that answer back.
pub type ReplyPort = oneshot::Sender<ClearCacheAck>;
