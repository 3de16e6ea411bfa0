//! Analytics API Client
//!
//! Everything the dashboard needs from the upstream analytics service.
//!
//! ## Endpoints
//!
//! - `GET /posts` - All posts, in display order
//! - `GET /posts/{id}/history` - Sentiment snapshots for one post
//! - `GET /posts/{id}/analytics` - Aggregate scores for one post
//!
//! The store only talks to the network through [`PostSource`], so any
//! type that can produce posts and history can back it.

mod http;

pub use http::{ClientConfig, ClientError, PostsClient};

use async_trait::async_trait;

use crate::model::{HistoryPoint, Post};

/// A source of posts and per-post sentiment history
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch the full post collection
    async fn fetch_posts(&self) -> Result<Vec<Post>, ClientError>;

    /// Fetch the sentiment history of a single post
    async fn fetch_history(&self, post_id: &str) -> Result<Vec<HistoryPoint>, ClientError>;
}

#[async_trait]
impl PostSource for PostsClient {
    async fn fetch_posts(&self) -> Result<Vec<Post>, ClientError> {
        PostsClient::fetch_posts(self).await
    }

    async fn fetch_history(&self, post_id: &str) -> Result<Vec<HistoryPoint>, ClientError> {
        PostsClient::fetch_history(self, post_id).await
    }
}
