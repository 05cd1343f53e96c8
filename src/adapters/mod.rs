// Adapters layer: concrete implementations for external systems.

pub mod newsapi;

pub use newsapi::NewsApiClient;
