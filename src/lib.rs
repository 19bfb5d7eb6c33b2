//! Backend for a personal weather station dashboard.
//!
//! This library proxies a third-party PWS observation API and reconciles
//! the inconsistent field naming across its response variants into daily
//! min/max statistics, plus a pure display-derivation function consumed
//! by the dashboard frontend.

pub mod config;
pub mod display;
pub mod error;
pub mod pws;
pub mod routes;
pub mod stats;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::DashboardError;
pub use pws::PwsClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, DashboardError>;
