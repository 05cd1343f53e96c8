// HTTP surface: axum router, handlers and error responses.

pub mod handlers;
pub mod responses;
pub mod server;
pub mod state;

pub use server::{build_router, serve, serve_on};
pub use state::AppState;
