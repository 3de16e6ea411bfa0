//! Dashboard Store
//!
//! Fetches, holds and exposes posts and per-post sentiment history.
//!
//! ## Render contract
//!
//! Renderers read [`DashboardState`] (`posts`, `selected_post`,
//! `post_history`, `loading`, `error`) through [`PostDataStore::subscribe`]
//! or [`PostDataStore::snapshot`] and never mutate it. All mutation goes
//! through the store operations:
//!
//! - [`PostDataStore::load_posts`] / [`PostDataStore::refresh`]
//! - [`PostDataStore::select_post`]
//! - [`PostDataStore::load_history`]
//!
//! ## Failure model
//!
//! A failed post-list fetch sets `error` and keeps the previous posts. A
//! failed history fetch shows an empty history and is only logged.

mod error;
mod post_store;
mod state;

pub use error::StoreError;
pub use post_store::PostDataStore;
pub use state::DashboardState;
