use serde::{Deserialize, Serialize};

/// Origin classification of a fetched response, mirroring the fetch
/// response types the browser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Direct same-origin response.
    Basic,
    /// Cross-origin response with readable headers.
    Cors,
    /// Cross-origin response with nothing readable.
    Opaque,
}

/// A response as seen by the interception layer, either fresh off the
/// network or replayed from a cache bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub kind: ResponseKind,
}

impl ShellResponse {
    /// A successful same-origin response; mostly useful for tests and the
    /// maintenance binary.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
            kind: ResponseKind::Basic,
        }
    }

    /// Only direct same-origin 200s go into the cache; errors, redirects
    /// and cross-origin responses are returned but never stored.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
