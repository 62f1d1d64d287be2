//! HTTP client for volume servers
//!
//! Volume servers are plain HTTP file servers (nginx with `dav_methods` in
//! practice): PUT creates a blob at a path, DELETE removes it. This client
//! classifies their responses; it never retries and never panics on
//! transport failure.

use crate::index::placement::VolumeTarget;
use reqwest::header::CONTENT_LENGTH;
use reqwest::{Client, StatusCode};

/// Outcome of a volume server call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    Created,
    NoContent,
    Conflict,
    Failure(String),
}

impl StoreOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StoreOutcome::Created | StoreOutcome::NoContent)
    }
}

pub struct VolumeClient {
    http: Client,
}

impl VolumeClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Full URL of a key's blob on a target, e.g.
    /// `http://localhost:3001/sv0A/1f/c2/L2Zvbw`
    pub fn object_url(target: &VolumeTarget, path: &str) -> String {
        format!("{}{}", target.base_url(), path)
    }

    /// PUT a blob, streaming the body through unbuffered.
    pub async fn store(&self, url: &str, content_length: u64, body: reqwest::Body) -> StoreOutcome {
        let result = self
            .http
            .put(url)
            .header(CONTENT_LENGTH, content_length)
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) => match response.status() {
                StatusCode::CREATED => StoreOutcome::Created,
                StatusCode::NO_CONTENT => StoreOutcome::NoContent,
                StatusCode::CONFLICT => StoreOutcome::Conflict,
                status => StoreOutcome::Failure(format!("volume returned {}", status)),
            },
            Err(e) => StoreOutcome::Failure(e.to_string()),
        }
    }

    /// DELETE a blob. A 404 counts as removed: volume servers are
    /// idempotent-on-delete.
    pub async fn remove(&self, url: &str) -> StoreOutcome {
        let result = self.http.delete(url).send().await;

        match result {
            Ok(response) => match response.status() {
                StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => StoreOutcome::NoContent,
                StatusCode::CONFLICT => StoreOutcome::Conflict,
                status => StoreOutcome::Failure(format!("volume returned {}", status)),
            },
            Err(e) => StoreOutcome::Failure(e.to_string()),
        }
    }
}

impl Default for VolumeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        let target = VolumeTarget {
            volume: "localhost:3001".to_string(),
            subvolume: 10,
        };
        assert_eq!(
            VolumeClient::object_url(&target, "/ab/cd/a2V5"),
            "http://localhost:3001/sv0A/ab/cd/a2V5"
        );
    }

    #[test]
    fn test_outcome_success() {
        assert!(StoreOutcome::Created.is_success());
        assert!(StoreOutcome::NoContent.is_success());
        assert!(!StoreOutcome::Conflict.is_success());
        assert!(!StoreOutcome::Failure("x".into()).is_success());
    }
}
