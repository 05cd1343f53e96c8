// Rust rendition of the frontend: view model, UI state and server-side HTML.

pub mod html;
pub mod state;
pub mod view;

pub use html::HeadlinesRenderer;
pub use state::{FetchStatus, NavFilter, ViewState};
pub use view::{format_elapsed, format_published, Card, Featured, FrontPage};
