//! Client side of the portfolio REST API.

pub mod client;
pub mod fallback;
pub mod resources;

pub use client::ApiClient;
pub use fallback::Resource;
pub use resources::{with_fallback, PortfolioApi, REQUEST_CACHE_KEY};
