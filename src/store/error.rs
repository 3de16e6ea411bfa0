//! Store error types

use thiserror::Error;

use crate::client::ClientError;

/// Failures observed by the post store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The post list could not be loaded. Surfaced to the user with a retry.
    #[error("Failed to fetch posts: {0}")]
    FetchPosts(#[source] ClientError),

    /// A post's history could not be loaded. Logged, never surfaced.
    #[error("Failed to fetch history for post {post_id}: {source}")]
    FetchHistory {
        post_id: String,
        #[source]
        source: ClientError,
    },
}
