//! File-backed URL registry.
//!
//! This crate provides [`UrlRegistry`], which maps long URLs to short codes,
//! tracks clicks, and persists everything through a
//! [`Store`](shortly_core::Store). Core types are re-exported from
//! `shortly_core`.
//!
//! ```rust,no_run
//! use shortly_registry::{RegistryConfig, UrlRegistry};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = UrlRegistry::open(RegistryConfig::default());
//!
//! let record = registry.create("https://example.com", Some("ex1"))?;
//! println!("{}", registry.full_short_url(record.short_code.as_str()));
//!
//! if let Some(url) = registry.resolve("ex1", true) {
//!     println!("Redirect to: {}", url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod registry;
pub mod stats;

pub use config::RegistryConfig;
pub use registry::UrlRegistry;
pub use shortly_core::{RegistryError, ShortCode, UrlRecord};
pub use stats::{AggregateStats, CodeStats, Stats, TopUrl};
