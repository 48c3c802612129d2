//! Value types shared by the fetch, cache, and worker layers.
//!
//! - `ShellRequest`: one intercepted network request (method, URL,
//!   destination)
//! - `ShellResponse`: a response from the network or replayed from cache
//! - `Method`, `Destination`, `ResponseKind`: the discriminators the
//!   routing policy switches on

pub mod request;
pub mod response;

pub use request::{Destination, Method, ShellRequest};
pub use response::{ResponseKind, ShellResponse};
