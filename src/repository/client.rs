// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client shared by all upstream repositories.
//!
//! Handles:
//! - Status classification (transient vs permanent failures)
//! - Retry with capped exponential backoff and jitter
//! - Short-lived caching of successful response bodies

use super::UpstreamError;
use crate::config::Config;
use dashmap::DashMap;
use rand::Rng;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upper bound (exclusive) of the random jitter added to each backoff.
const JITTER_MS: u64 = 100;

/// Retry behaviour for upstream calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Cap on the delay between two attempts.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            max_backoff: Duration::from_millis(1_000),
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt following `attempt` (1-indexed):
    /// `min(2^(attempt - 1) ms + jitter, max_backoff)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponential = 2u64.saturating_pow(attempt.saturating_sub(1));
        let jitter = rand::rng().random_range(0..JITTER_MS);
        let delay = Duration::from_millis(exponential.saturating_add(jitter));
        delay.min(self.max_backoff)
    }
}

/// Cached response body with expiry.
#[derive(Clone)]
struct CachedBody {
    body: Arc<str>,
    expires_at: Instant,
}

/// Client for the upstream asset services.
///
/// Cheap to clone: the connection pool and response cache are shared.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    retry: RetryPolicy,
    cache_ttl: Duration,
    cache: Arc<DashMap<String, CachedBody>>,
}

impl UpstreamClient {
    /// Create a client from explicit settings.
    pub fn new(
        timeout: Duration,
        retry: RetryPolicy,
        cache_ttl: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::from)?;

        Ok(Self {
            http,
            retry,
            cache_ttl,
            cache: Arc::new(DashMap::new()),
        })
    }

    /// Create a client from application configuration.
    pub fn from_config(config: &Config) -> Result<Self, UpstreamError> {
        Self::new(
            config.upstream_timeout,
            RetryPolicy {
                max_attempts: config.upstream_max_attempts,
                max_backoff: config.upstream_max_backoff,
            },
            config.upstream_cache_ttl,
        )
    }

    /// GET `url` with `query` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let mut url =
            Url::parse(url).map_err(|e| UpstreamError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let key = url.to_string();
        if let Some(body) = self.cached(&key) {
            tracing::trace!(url = %key, "Upstream cache hit");
            return decode(&key, &body);
        }

        let body = self.fetch_with_retry(&url).await?;
        let value = decode(&key, &body)?;

        if !self.cache_ttl.is_zero() {
            let now = Instant::now();
            // Keys include caller-chosen ids, so expired entries must not
            // wait for their own URL to be requested again.
            self.cache.retain(|_, entry| entry.expires_at > now);
            self.cache.insert(
                key,
                CachedBody {
                    body: Arc::from(body),
                    expires_at: now + self.cache_ttl,
                },
            );
        }

        Ok(value)
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached responses, expired ones included until swept.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn cached(&self, key: &str) -> Option<Arc<str>> {
        let entry = self.cache.get(key)?;
        if Instant::now() < entry.expires_at {
            return Some(entry.body.clone());
        }
        drop(entry);
        self.cache.remove(key);
        None
    }

    /// Run [`Self::fetch_once`] until it succeeds, fails permanently, or
    /// attempts run out.
    async fn fetch_with_retry(&self, url: &Url) -> Result<String, UpstreamError> {
        let mut attempt = 1;
        loop {
            tracing::trace!(attempt, url = %url, "Upstream GET");

            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    tracing::warn!(
                        attempt,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "Retryable upstream error"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(attempt, error = %err, "Upstream request failed");
                    return Err(err);
                }
            }
        }
    }

    /// Single GET, classifying the response status.
    async fn fetch_once(&self, url: &Url) -> Result<String, UpstreamError> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        match status {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound(url.to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS => Err(UpstreamError::Unavailable {
                status: status.as_u16(),
                url: url.to_string(),
            }),
            _ => Err(UpstreamError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, UpstreamError> {
    serde_json::from_str(body).map_err(|e| UpstreamError::Decode(format!("{}: {}", url, e)))
}
