use shortly_core::error::StorageError;
use shortly_core::store::{Result, Snapshot, Store};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Flat-file implementation of the store contract.
///
/// The whole registry is kept in a single JSON document. Saves write a
/// sibling temporary file and rename it over the target, so readers only
/// ever observe a complete document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("urls.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn map_io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Unavailable(format!("{}: {err}", path.display()))
}

fn map_json_error(path: &Path, err: serde_json::Error) -> StorageError {
    StorageError::InvalidData(format!("{}: {err}", path.display()))
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(map_io_error(&self.path, err)),
        };

        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|e| map_json_error(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            urls = snapshot.urls.len(),
            counter = snapshot.counter,
            "loaded registry document"
        );

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let body =
            serde_json::to_string_pretty(snapshot).map_err(|e| map_json_error(&self.path, e))?;

        let temp = self.temp_path();
        std::fs::write(&temp, body).map_err(|e| map_io_error(&temp, e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| map_io_error(&self.path, e))?;

        debug!(
            path = %self.path.display(),
            urls = snapshot.urls.len(),
            "saved registry document"
        );

        Ok(())
    }
}
