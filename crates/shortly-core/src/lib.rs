//! Core types and traits for the shortly URL registry.
//!
//! This crate provides the types shared by the generator, the storage
//! backends and the registry itself.

pub mod clock;
pub mod error;
pub mod record;
pub mod shortcode;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use error::{RegistryError, StorageError};
pub use record::UrlRecord;
pub use shortcode::ShortCode;
pub use store::{Snapshot, Store};
