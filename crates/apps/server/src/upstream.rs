//! Client for the external statistics API.
//!
//! Every request carries the API key header. Successful JSON bodies are kept
//! in a shared cache keyed by upstream path and query, each with its own TTL.
//! Expired entries are swept on every insert. Error responses are never cached.

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use dashmap::DashMap;
use serde_json::Value;
use streaming::API_KEY_HEADER;
use tracing::{debug, warn};

use crate::config::Credentials;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream responded with {0}")]
    Status(StatusCode),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream body is not JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

struct CachedBody {
    stored_at: Instant,
    ttl: Duration,
    body: Value,
}

impl CachedBody {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

pub struct UpstreamClient {
    http: reqwest::Client,
    cache: DashMap<String, CachedBody>,
}

impl UpstreamClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            cache: DashMap::new(),
        })
    }

    #[cfg(test)]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// GET `{api_url}{path}` with `query` encoded, served from cache while younger than `ttl`.
    pub async fn get_json(
        &self,
        creds: &Credentials,
        path: &str,
        query: &[(&str, &str)],
        ttl: Duration,
    ) -> Result<Value, UpstreamError> {
        let key = cache_key(path, query);
        let hit = self
            .cache
            .get(&key)
            .filter(|entry| entry.is_fresh())
            .map(|entry| entry.body.clone());
        if let Some(body) = hit {
            debug!(%key, "upstream cache hit");
            return Ok(body);
        }

        let url = format!("{}{}", creds.api_url, path);
        let resp = self
            .http
            .get(&url)
            .query(query)
            .header(API_KEY_HEADER, &creds.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%key, %status, "upstream rejected request");
            return Err(UpstreamError::Status(status));
        }

        let bytes = resp.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        self.cache.retain(|_, entry| entry.is_fresh());
        if !ttl.is_zero() {
            self.cache.insert(
                key,
                CachedBody {
                    stored_at: Instant::now(),
                    ttl,
                    body: body.clone(),
                },
            );
        }
        Ok(body)
    }
}

fn cache_key(path: &str, query: &[(&str, &str)]) -> String {
    let mut key = path.to_string();
    for (i, (name, value)) in query.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}
