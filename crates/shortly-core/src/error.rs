use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors surfaced to callers of the URL registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("short code already exists: {0}")]
    CodeAlreadyExists(String),
    #[error("failed to generate a unique short code after {attempts} attempts")]
    GeneratorExhausted { attempts: usize },
}

/// Errors raised by [`Store`](crate::store::Store) backends.
///
/// The registry never propagates these: load failures fall back to an empty
/// registry and save failures are logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage state lock is poisoned")]
    Poisoned,
}
