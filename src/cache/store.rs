use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ResponseKind, ShellRequest, ShellResponse};

/// Bucket file extension under the cache root.
const BUCKET_EXT: &str = "json";

/// A cached response as persisted inside a bucket file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    #[serde(with = "body_encoding")]
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    pub fn from_response(response: &ShellResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers.clone(),
            body: response.body.clone(),
            stored_at: Utc::now(),
        }
    }

    /// Replayed entries are always same-origin: only basic responses are
    /// ever stored.
    pub fn to_response(&self) -> ShellResponse {
        ShellResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone(),
            kind: ResponseKind::Basic,
        }
    }
}

/// Response bodies are raw bytes; the bucket file is JSON, so bodies are
/// stored base64-encoded.
mod body_encoding {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        STANDARD.encode(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// Durable storage for named cache buckets.
///
/// Each bucket is one JSON file under the cache root, named
/// `<bucket-name>.json`, mapping request keys (`"<METHOD> <URL>"`) to
/// stored responses.
pub struct CacheStorage {
    root: PathBuf,
}

impl CacheStorage {
    pub fn new(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create cache directory {}", root.display()))?;
        Ok(Self { root })
    }

    fn bucket_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, BUCKET_EXT))
    }

    /// Open a bucket, creating it if absent. A bucket exists on disk from
    /// the moment it is opened.
    pub fn open(&self, name: &str) -> Result<Bucket> {
        let path = self.bucket_path(name);
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read cache bucket {}", name))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse cache bucket {}", name))?
        } else {
            HashMap::new()
        };

        let bucket = Bucket {
            name: name.to_string(),
            path,
            entries,
        };
        if !bucket.path.exists() {
            bucket.save()?;
        }
        Ok(bucket)
    }

    /// Names of every bucket currently on disk, sorted.
    pub fn bucket_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list cache directory {}", self.root.display()))?
        {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(BUCKET_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete a bucket. Returns whether it existed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.bucket_path(name);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to delete cache bucket {}", name))?;
            debug!(bucket = name, "deleted cache bucket");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Delete every bucket, all versions. Returns how many were removed.
    pub fn delete_all(&self) -> Result<usize> {
        let mut removed = 0;
        for name in self.bucket_names()? {
            if self.delete(&name)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// One named cache bucket: a request-key to stored-response map with
/// whole-file persistence. Concurrent writers are last-writer-wins, which
/// is acceptable because competing write-backs store identical content.
pub struct Bucket {
    name: String,
    path: PathBuf,
    entries: HashMap<String, StoredResponse>,
}

impl Bucket {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exact method + URL lookup.
    pub fn match_request(&self, request: &ShellRequest) -> Option<&StoredResponse> {
        self.entries.get(&request.cache_key())
    }

    /// Insert an entry and persist the bucket.
    pub fn put(&mut self, request: &ShellRequest, stored: StoredResponse) -> Result<()> {
        self.entries.insert(request.cache_key(), stored);
        self.save()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Request keys of every entry, sorted for stable display.
    pub fn request_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort();
        keys
    }

    fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write cache bucket {}", self.name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> CacheStorage {
        CacheStorage::new(dir.path().to_path_buf()).expect("cache storage")
    }

    fn css_response() -> ShellResponse {
        ShellResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "text/css".to_string())],
            body: b"body { color: red; }".to_vec(),
            kind: ResponseKind::Basic,
        }
    }

    #[test]
    fn test_put_then_match_returns_stored_entry() {
        let dir = TempDir::new().unwrap();
        let mut bucket = storage(&dir).open("acougue-sistema-v1.0.0").unwrap();

        let request = ShellRequest::get("/static/css/style.css");
        let response = css_response();
        bucket
            .put(&request, StoredResponse::from_response(&response))
            .unwrap();

        let replayed = bucket.match_request(&request).unwrap().to_response();
        assert_eq!(replayed.status, 200);
        assert_eq!(replayed.body, response.body);
        assert_eq!(replayed.kind, ResponseKind::Basic);
    }

    #[test]
    fn test_match_misses_on_different_method() {
        let dir = TempDir::new().unwrap();
        let mut bucket = storage(&dir).open("acougue-sistema-v1.0.0").unwrap();

        let get = ShellRequest::get("/clientes");
        bucket
            .put(&get, StoredResponse::from_response(&css_response()))
            .unwrap();

        let post = ShellRequest::new(
            crate::models::Method::Post,
            "/clientes",
            crate::models::Destination::Other,
        );
        assert!(bucket.match_request(&post).is_none());
    }

    #[test]
    fn test_bucket_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let store = storage(&dir);

        let request = ShellRequest::get("/static/img/logo.png");
        {
            let mut bucket = store.open("acougue-sistema-v1.0.0").unwrap();
            bucket
                .put(&request, StoredResponse::from_response(&css_response()))
                .unwrap();
        }

        let bucket = store.open("acougue-sistema-v1.0.0").unwrap();
        assert_eq!(bucket.len(), 1);
        let replayed = bucket.match_request(&request).unwrap().to_response();
        assert_eq!(replayed.body, css_response().body);
    }

    #[test]
    fn test_open_materializes_bucket_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = storage(&dir);

        store.open("acougue-sistema-v0.9.0").unwrap();
        store.open("acougue-sistema-v1.0.0").unwrap();

        assert_eq!(
            store.bucket_names().unwrap(),
            vec!["acougue-sistema-v0.9.0", "acougue-sistema-v1.0.0"]
        );
    }

    #[test]
    fn test_delete_reports_existence() {
        let dir = TempDir::new().unwrap();
        let store = storage(&dir);

        store.open("acougue-sistema-v1.0.0").unwrap();
        assert!(store.delete("acougue-sistema-v1.0.0").unwrap());
        assert!(!store.delete("acougue-sistema-v1.0.0").unwrap());
        assert!(store.bucket_names().unwrap().is_empty());
    }

    #[test]
    fn test_delete_all_on_empty_storage() {
        let dir = TempDir::new().unwrap();
        let store = storage(&dir);
        assert_eq!(store.delete_all().unwrap(), 0);
    }

    #[test]
    fn test_binary_body_survives_json_persistence() {
        let dir = TempDir::new().unwrap();
        let store = storage(&dir);

        // PNG magic bytes: not valid UTF-8, exercises the base64 path.
        let png = ShellResponse {
            status: 200,
            headers: Vec::new(),
            body: vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a],
            kind: ResponseKind::Basic,
        };
        let request = ShellRequest::get("/static/img/logo.png");
        {
            let mut bucket = store.open("acougue-sistema-v1.0.0").unwrap();
            bucket
                .put(&request, StoredResponse::from_response(&png))
                .unwrap();
        }

        let bucket = store.open("acougue-sistema-v1.0.0").unwrap();
        let replayed = bucket.match_request(&request).unwrap().to_response();
        assert_eq!(replayed.body, png.body);
    }
}
