//! Post Data Store
//!
//! Owns the dashboard state and mediates every network call behind it.
//!
//! State lives in a `tokio::sync::watch` channel: the store is the only
//! writer, renderers hold receivers and redraw on change. Both fetch kinds
//! are guarded by monotonically increasing request tokens so that a slow
//! response can never overwrite the result of a newer request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::error::StoreError;
use super::state::DashboardState;
use crate::client::PostSource;
use crate::model::Post;

/// Reactive store for posts, selection and per-post history
pub struct PostDataStore {
    source: Arc<dyn PostSource>,
    state: watch::Sender<DashboardState>,
    /// Latest issued post-list request
    posts_token: AtomicU64,
    /// Latest issued history request
    history_token: AtomicU64,
}

impl PostDataStore {
    /// Create a store in its initial state (empty, loading)
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());

        Self {
            source,
            state,
            posts_token: AtomicU64::new(0),
            history_token: AtomicU64::new(0),
        }
    }

    /// Subscribe to state transitions
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Current state by value
    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Load the post list, replacing the current one on success.
    ///
    /// On failure the previous posts are kept and `error` carries the reason.
    /// `loading` is cleared once the latest request resolves.
    pub async fn load_posts(&self) {
        let mut token = 0;
        self.state.send_modify(|s| {
            token = self.posts_token.fetch_add(1, Ordering::SeqCst) + 1;
            s.loading = true;
        });
        tracing::debug!(token, "Loading posts");

        let result = self.source.fetch_posts().await;

        // Token check and apply happen under the same write lock as the
        // increment above, so a newer call cannot slip in between them.
        let applied = match result {
            Ok(posts) => {
                let count = posts.len();
                let applied = self.state.send_if_modified(|s| {
                    if self.posts_token.load(Ordering::SeqCst) != token {
                        return false;
                    }
                    if s.replace_posts(posts) {
                        // Selected post vanished: any in-flight history is for it
                        self.next_history_token();
                    }
                    s.error = None;
                    s.loading = false;
                    true
                });
                if applied {
                    tracing::debug!(count, "Posts loaded");
                }
                applied
            }
            Err(e) => {
                let err = StoreError::FetchPosts(e);
                tracing::warn!(error = %err, "Post list fetch failed");
                self.state.send_if_modified(|s| {
                    if self.posts_token.load(Ordering::SeqCst) != token {
                        return false;
                    }
                    s.error = Some(err.to_string());
                    s.loading = false;
                    true
                })
            }
        };

        if !applied {
            tracing::debug!(token, "Discarding stale post list response");
        }
    }

    /// Re-run [`load_posts`](Self::load_posts). Bound to the refresh and retry actions.
    pub async fn refresh(&self) {
        self.load_posts().await;
    }

    /// Select a post and fetch its history in the background.
    ///
    /// The selection is applied immediately. The returned handle resolves
    /// once the history response has been applied or discarded.
    pub fn select_post(self: &Arc<Self>, post: Post) -> JoinHandle<()> {
        let post_id = post.post_id.clone();
        let mut token = 0;

        self.state.send_modify(|s| {
            if !s.is_selected(&post.post_id) {
                s.post_history.clear();
            }
            s.selected_post = Some(post);
            token = self.next_history_token();
        });
        tracing::debug!(post_id = %post_id, token, "Post selected");

        let store = Arc::clone(self);
        tokio::spawn(async move {
            store.fetch_history(&post_id, token).await;
        })
    }

    /// Fetch the history of the selected post and apply it if no newer
    /// request superseded it.
    ///
    /// Ids other than the current selection are ignored. Failures degrade
    /// to an empty history and never touch `error`.
    pub async fn load_history(&self, post_id: &str) {
        let mut token = None;
        self.state.send_if_modified(|s| {
            if s.is_selected(post_id) {
                token = Some(self.next_history_token());
            }
            false
        });

        let Some(token) = token else {
            tracing::debug!(post_id = %post_id, "Ignoring history load for unselected post");
            return;
        };
        self.fetch_history(post_id, token).await;
    }

    /// Drop the selection and its history, invalidating any in-flight fetch
    pub fn clear_selection(&self) {
        self.state.send_modify(|s| {
            self.next_history_token();
            s.selected_post = None;
            s.post_history.clear();
        });
    }

    fn next_history_token(&self) -> u64 {
        self.history_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn fetch_history(&self, post_id: &str, token: u64) {
        let history = match self.source.fetch_history(post_id).await {
            Ok(history) => history,
            Err(e) => {
                let err = StoreError::FetchHistory {
                    post_id: post_id.to_string(),
                    source: e,
                };
                tracing::warn!(post_id = %post_id, error = %err, "History fetch failed, showing no history");
                Vec::new()
            }
        };

        let points = history.len();
        let applied = self.state.send_if_modified(|s| {
            if self.history_token.load(Ordering::SeqCst) != token || !s.is_selected(post_id) {
                return false;
            }
            s.post_history = history;
            true
        });

        if applied {
            tracing::debug!(post_id = %post_id, points, "History applied");
        } else {
            tracing::debug!(post_id = %post_id, token, "Discarding stale history response");
        }
    }
}
