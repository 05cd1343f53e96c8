pub mod service;
pub mod translator;

pub use crate::domain::model::{Article, SearchRequest, UpstreamRequest};
pub use crate::domain::ports::{NewsUpstream, UpstreamResponse};
pub use crate::utils::error::Result;
