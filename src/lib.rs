//! # Sentiview
//!
//! Post sentiment dashboard engine: fetches social-media post metrics from
//! an analytics API and holds them as reactive view state for a renderer.
//!
//! ## Modules
//!
//! - [`model`]: Post and history wire types
//! - [`client`]: HTTP client for the analytics API
//! - [`store`]: Reactive post/selection/history store
//! - [`view`]: Display projections of the store state
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sentiview::{ClientConfig, PostDataStore, PostsClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(PostsClient::new(ClientConfig::new("http://localhost:3000"))?);
//!     let store = Arc::new(PostDataStore::new(client));
//!
//!     store.load_posts().await;
//!
//!     let state = store.snapshot();
//!     if let Some(post) = state.posts.first().cloned() {
//!         // History arrives in the background; await the handle to wait for it
//!         store.select_post(post).await?;
//!     }
//!
//!     println!("{} history points", store.snapshot().post_history.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod model;
pub mod store;
pub mod view;

pub use client::{ClientConfig, ClientError, PostSource, PostsClient};
pub use config::{ApiConfig, Config, ConfigError, LoadedConfig, LoggingConfig};
pub use model::{AnalyticsSummary, HistoryPoint, Post, PostAnalytics};
pub use store::{DashboardState, PostDataStore, StoreError};
pub use view::{PostDetail, PostRow, Screen, StatCards, TrendPoint};
