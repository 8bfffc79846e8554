pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use shortly_core::store::{Snapshot, Store};
pub use shortly_core::StorageError;
