use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::models::{Method, ResponseKind, ShellRequest, ShellResponse};

use super::FetchError;

/// Performs the network round-trip for an intercepted request.
///
/// The cache worker reaches the network only through this trait, so the
/// routing policy can be exercised against an in-memory implementation
/// without a host runtime.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, request: &ShellRequest) -> Result<ShellResponse, FetchError>;
}

#[async_trait]
impl<F: Fetch + ?Sized> Fetch for Arc<F> {
    async fn fetch(&self, request: &ShellRequest) -> Result<ShellResponse, FetchError> {
        (**self).fetch(request).await
    }
}

/// HTTP fetcher bound to the application origin.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    origin: Url,
}

impl HttpFetcher {
    /// No request timeout is configured here: a hang is left to the host
    /// network stack, and no retry happens in this layer.
    pub fn new(origin: &str) -> Result<Self, FetchError> {
        let origin = Url::parse(origin)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", origin, e)))?;
        Ok(Self {
            client: Client::new(),
            origin,
        })
    }

    /// Resolve a root-relative path against the application origin;
    /// absolute URLs are taken as-is.
    fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        if url.starts_with('/') {
            self.origin
                .join(url)
                .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))
        } else {
            Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))
        }
    }

    fn request_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, request: &ShellRequest) -> Result<ShellResponse, FetchError> {
        let url = self.resolve(&request.url)?;
        debug!(url = %url, method = %request.method, "fetching from network");

        let response = self
            .client
            .request(Self::request_method(request.method), url)
            .send()
            .await?;

        // Same-origin responses are "basic" and eligible for caching;
        // anything else is treated as cross-origin.
        let kind = if response.url().origin() == self.origin.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(ShellResponse {
            status,
            headers,
            body,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_joins_relative_paths_against_origin() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:5000").unwrap();
        let url = fetcher.resolve("/static/css/style.css").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/static/css/style.css");
    }

    #[test]
    fn test_resolve_keeps_absolute_urls() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:5000").unwrap();
        let url = fetcher.resolve("https://cdn.example.com/logo.png").unwrap();
        assert_eq!(url.host_str(), Some("cdn.example.com"));
    }

    #[test]
    fn test_resolve_rejects_garbage() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:5000").unwrap();
        assert!(matches!(
            fetcher.resolve("not a url"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_invalid_origin_is_rejected_at_construction() {
        assert!(matches!(
            HttpFetcher::new("127.0.0.1:5000"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
