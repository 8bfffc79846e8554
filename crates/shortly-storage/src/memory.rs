use shortly_core::error::StorageError;
use shortly_core::store::{Result, Snapshot, Store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory implementation of the store contract.
///
/// The last saved snapshot is kept as serialized JSON, so loading goes
/// through the same serde path as [`JsonFileStore`](crate::JsonFileStore).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `document` as its saved state.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(document.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Returns the raw saved document, if any.
    pub fn document(&self) -> Result<Option<String>> {
        let document = self.document.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(document.clone())
    }
}

impl Store for InMemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        let document = self.document.lock().map_err(|_| StorageError::Poisoned)?;

        let Some(raw) = document.as_deref() else {
            return Ok(None);
        };

        serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| StorageError::InvalidData(e.to_string()))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let body =
            serde_json::to_string(snapshot).map_err(|e| StorageError::InvalidData(e.to_string()))?;

        let mut document = self.document.lock().map_err(|_| StorageError::Poisoned)?;
        *document = Some(body);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use shortly_core::{ShortCode, UrlRecord};

    #[test]
    fn empty_store_loads_as_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_and_load() {
        let store = InMemoryStore::new();
        let code = ShortCode::new("ex1");
        let mut snapshot = Snapshot::default();
        snapshot.urls.insert(
            code.clone(),
            UrlRecord::new(1, "https://example.com", code, Timestamp::now()),
        );
        snapshot.counter = 1;

        store.save(&snapshot).unwrap();

        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn garbage_document_is_invalid_data() {
        let store = InMemoryStore::with_document("[1, 2, 3]");
        assert!(matches!(
            store.load().unwrap_err(),
            StorageError::InvalidData(_)
        ));
    }

    #[test]
    fn store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryStore>();
    }
}
