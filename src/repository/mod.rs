// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upstream data access layer.
//!
//! One module per upstream service (advertisements, images, videos), all
//! sharing a single [`UpstreamClient`] that handles retries and caching.

pub mod advertisement;
pub mod client;
pub mod image;
pub mod video;

pub use advertisement::AdvertisementRepository;
pub use client::{RetryPolicy, UpstreamClient};
pub use image::ImageRepository;
pub use video::VideoRepository;

/// Query parameter names understood by the upstream services.
pub mod params {
    pub const CONTAINER_ID: &str = "containerId";
    pub const VIDEO_TYPE: &str = "type";
    pub const ASSET_TYPE: &str = "assetType";
}

/// Errors raised while talking to an upstream service.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Upstream unavailable (HTTP {status}): {url}")]
    Unavailable { status: u16, url: String },

    #[error("Unexpected HTTP {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Request failed: {message}")]
    Transport { message: String, transient: bool },

    #[error("JSON parse error: {0}")]
    Decode(String),

    #[error("Invalid upstream data: {0}")]
    InvalidData(String),

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

impl UpstreamError {
    /// Whether the failed call may succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamError::Unavailable { .. } => true,
            UpstreamError::Transport { transient, .. } => *transient,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport {
            transient: err.is_timeout() || err.is_connect(),
            message: err.to_string(),
        }
    }
}

/// Parse a string identifier from an upstream payload.
pub(crate) fn parse_id(field: &str, value: &str) -> Result<u32, UpstreamError> {
    value
        .trim()
        .parse()
        .map_err(|_| UpstreamError::InvalidData(format!("{} is not numeric: {:?}", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(UpstreamError::Unavailable {
            status: 500,
            url: "http://x".to_string()
        }
        .is_transient());
        assert!(UpstreamError::Transport {
            message: "timed out".to_string(),
            transient: true
        }
        .is_transient());
        assert!(!UpstreamError::Transport {
            message: "bad scheme".to_string(),
            transient: false
        }
        .is_transient());
        assert!(!UpstreamError::NotFound("x".to_string()).is_transient());
        assert!(!UpstreamError::Decode("x".to_string()).is_transient());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("id", "1404").unwrap(), 1404);
        assert_eq!(parse_id("id", " 7 ").unwrap(), 7);
        assert!(matches!(
            parse_id("containerId", "abc"),
            Err(UpstreamError::InvalidData(_))
        ));
        assert!(parse_id("id", "-1").is_err());
    }
}
