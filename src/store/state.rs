//! Dashboard view state
//!
//! The snapshot published to renderers on every transition.

use serde::Serialize;

use crate::model::{HistoryPoint, Post};

/// Everything a renderer needs to draw the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    /// Posts in server order
    pub posts: Vec<Post>,
    /// The post driving the detail panel, if any
    pub selected_post: Option<Post>,
    /// Sentiment history of the selected post
    pub post_history: Vec<HistoryPoint>,
    /// True while a post-list fetch is in flight
    pub loading: bool,
    /// User-visible error from the last post-list fetch
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            selected_post: None,
            post_history: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl DashboardState {
    /// Look up a post in the current list
    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.post_id == post_id)
    }

    /// Whether the given post is the current selection
    pub fn is_selected(&self, post_id: &str) -> bool {
        self.selected_post
            .as_ref()
            .is_some_and(|p| p.post_id == post_id)
    }

    /// Replace the post list wholesale and reconcile the selection against it.
    ///
    /// A selection whose id is still present is re-pointed at the fresh copy.
    /// Otherwise the selection and its history are dropped. Returns `true`
    /// when the selection was dropped.
    pub(crate) fn replace_posts(&mut self, posts: Vec<Post>) -> bool {
        self.posts = posts;

        let Some(selected_id) = self.selected_post.as_ref().map(|p| p.post_id.clone()) else {
            return false;
        };

        match self.post(&selected_id).cloned() {
            Some(fresh) => {
                self.selected_post = Some(fresh);
                false
            }
            None => {
                self.selected_post = None;
                self.post_history.clear();
                true
            }
        }
    }
}
