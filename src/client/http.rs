//! HTTP implementation of the analytics API client.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::model::{HistoryPoint, Post, PostAnalytics};

/// REST client for the analytics API
pub struct PostsClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for [`PostsClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the analytics API (e.g., "https://api.example.com/prod")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ClientConfig {
    /// Create config pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Base URL without trailing slashes
    pub fn normalized_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl PostsClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /posts`
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ClientError> {
        self.get_json("/posts").await
    }

    /// `GET /posts/{id}/history`
    pub async fn fetch_history(&self, post_id: &str) -> Result<Vec<HistoryPoint>, ClientError> {
        let path = format!("/posts/{}/history", urlencoding::encode(post_id));
        self.get_json(&path).await
    }

    /// `GET /posts/{id}/analytics`
    pub async fn fetch_analytics(&self, post_id: &str) -> Result<PostAnalytics, ClientError> {
        let path = format!("/posts/{}/analytics", urlencoding::encode(post_id));
        self.get_json(&path).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.normalized_base(), path)
    }

    /// Issue a GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await.map_err(classify)?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.bytes().await.map_err(classify)?;
        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }
}

/// Map transport failures onto the coarse error kinds callers act on
fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else {
        ClientError::Request(e)
    }
}

/// Errors that can occur when talking to the analytics API
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Analytics API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
