//! Offline-tolerant caching client for a portfolio content API.
//!
//! Reads go live → cached copy → bundled dataset, so callers of
//! [`api::PortfolioApi`] always get data back.

pub mod api;
pub mod cache;
pub mod config;
pub mod logging;

#[cfg(test)]
mod test_utils;
