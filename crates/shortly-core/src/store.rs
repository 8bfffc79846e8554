use crate::error::StorageError;
use crate::record::UrlRecord;
use crate::shortcode::ShortCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The whole persisted registry document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Records keyed by short code, in insertion order.
    pub urls: IndexMap<ShortCode, UrlRecord>,
    /// Last assigned id counter. Absent in older documents; the registry
    /// rebuilds it from the record ids on load.
    #[serde(default)]
    pub counter: u64,
}

/// Whole-document persistence for the registry.
///
/// Every `save` replaces whatever was stored before.
pub trait Store: Send + Sync + 'static {
    /// Loads the last saved snapshot.
    /// Returns `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Replaces the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    #[test]
    fn snapshot_document_layout() {
        let code = ShortCode::new("ex1");
        let record = UrlRecord::new(
            1,
            "https://example.com",
            code.clone(),
            Timestamp::from_second(0).unwrap(),
        );
        let mut snapshot = Snapshot::default();
        snapshot.urls.insert(code, record);
        snapshot.counter = 1;

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["counter"], 1);
        assert_eq!(json["urls"]["ex1"]["id"], "url_1");
        assert_eq!(json["urls"]["ex1"]["createdAt"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn snapshot_without_counter_keeps_records() {
        let json = r#"{
            "urls": {
                "ex1": { "id": "url_3", "originalUrl": "https://example.com", "shortCode": "ex1",
                         "createdAt": "2024-01-01T00:00:00Z", "clickCount": 1 }
            }
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.counter, 0);
        assert_eq!(snapshot.urls.len(), 1);
        assert_eq!(snapshot.urls["ex1"].sequence(), Some(3));
    }

    #[test]
    fn snapshot_keeps_document_order() {
        let json = r#"{
            "urls": {
                "zzz": { "id": "url_1", "originalUrl": "https://a.com", "shortCode": "zzz",
                         "createdAt": "2024-01-01T00:00:00Z", "clickCount": 0 },
                "aaa": { "id": "url_2", "originalUrl": "https://b.com", "shortCode": "aaa",
                         "createdAt": "2024-01-01T00:00:00Z", "clickCount": 0 }
            },
            "counter": 2
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        let codes: Vec<&str> = snapshot.urls.keys().map(ShortCode::as_str).collect();
        assert_eq!(codes, ["zzz", "aaa"]);
    }
}
