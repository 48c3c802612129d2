use std::fmt;

/// HTTP method of an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Options => "OPTIONS",
        }
    }

    /// Only GET requests are ever cached; everything else passes through.
    pub fn is_get(&self) -> bool {
        matches!(self, Method::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the page will do with the response (the fetch destination).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destination {
    /// A full page navigation.
    Document,
    Style,
    Script,
    Image,
    Font,
    #[default]
    Other,
}

/// One network request intercepted from the host page. Transient: built per
/// fetch, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellRequest {
    pub method: Method,
    pub url: String,
    pub destination: Destination,
}

impl ShellRequest {
    pub fn new(method: Method, url: impl Into<String>, destination: Destination) -> Self {
        Self {
            method,
            url: url.into(),
            destination,
        }
    }

    /// A plain GET for a sub-resource (stylesheet, script, image, ...).
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url, Destination::Other)
    }

    /// A GET driving a full page navigation.
    pub fn navigation(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url, Destination::Document)
    }

    /// Key a cached entry is stored under: exact method + URL.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.url)
    }

    /// URLs under the API prefix carry live ledger data and are exempt
    /// from caching.
    pub fn is_api(&self, api_prefix: &str) -> bool {
        self.url.contains(api_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_includes_method() {
        let get = ShellRequest::get("/clientes");
        let post = ShellRequest::new(Method::Post, "/clientes", Destination::Other);
        assert_eq!(get.cache_key(), "GET /clientes");
        assert_ne!(get.cache_key(), post.cache_key());
    }

    #[test]
    fn test_is_api_matches_prefix_anywhere_in_url() {
        let request = ShellRequest::get("http://127.0.0.1:5000/api/busca?q=joao");
        assert!(request.is_api("/api/"));

        let page = ShellRequest::navigation("/vendas");
        assert!(!page.is_api("/api/"));
    }

    #[test]
    fn test_navigation_has_document_destination() {
        let request = ShellRequest::navigation("/");
        assert_eq!(request.destination, Destination::Document);
        assert!(request.method.is_get());
    }
}
