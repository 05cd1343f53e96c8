pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::ServerArgs;

pub use adapters::NewsApiClient;
pub use app::{build_router, AppState};
pub use config::AppConfig;
pub use crate::core::service::{KeyCheck, NewsService};
pub use utils::error::{ProxyError, Result};
