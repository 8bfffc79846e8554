use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

const ID_PREFIX: &str = "url_";

/// A stored URL record in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    /// Registry-assigned identifier, `url_<n>`.
    pub id: String,
    /// The original URL that was shortened.
    pub original_url: String,
    /// The key this record is stored under.
    pub short_code: ShortCode,
    /// When the record was created.
    pub created_at: Timestamp,
    /// Number of tracked resolutions.
    pub click_count: u64,
    /// When the record was last resolved with tracking, if ever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<Timestamp>,
}

impl UrlRecord {
    /// Creates a fresh record with no clicks.
    pub fn new(
        sequence: u64,
        original_url: impl Into<String>,
        short_code: ShortCode,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: format_id(sequence),
            original_url: original_url.into(),
            short_code,
            created_at,
            click_count: 0,
            last_accessed: None,
        }
    }

    /// Returns the counter value encoded in `id`, if it has the `url_<n>` form.
    pub fn sequence(&self) -> Option<u64> {
        self.id.strip_prefix(ID_PREFIX)?.parse().ok()
    }

    /// Records one tracked resolution at `at`.
    pub fn record_click(&mut self, at: Timestamp) {
        self.click_count += 1;
        self.last_accessed = Some(at);
    }
}

/// Formats a counter value as a record id.
pub fn format_id(sequence: u64) -> String {
    format!("{ID_PREFIX}{sequence}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UrlRecord {
        UrlRecord::new(
            7,
            "https://example.com",
            ShortCode::new("ex1"),
            Timestamp::from_second(1_700_000_000).unwrap(),
        )
    }

    #[test]
    fn new_record_has_no_clicks() {
        let record = record();
        assert_eq!(record.id, "url_7");
        assert_eq!(record.click_count, 0);
        assert_eq!(record.last_accessed, None);
        assert_eq!(record.sequence(), Some(7));
    }

    #[test]
    fn record_click_updates_stats() {
        let mut record = record();
        let at = Timestamp::from_second(1_700_000_100).unwrap();

        record.record_click(at);
        record.record_click(at);

        assert_eq!(record.click_count, 2);
        assert_eq!(record.last_accessed, Some(at));
    }

    #[test]
    fn sequence_of_foreign_id() {
        let mut record = record();
        record.id = "legacy".to_string();
        assert_eq!(record.sequence(), None);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(record()).unwrap();

        assert_eq!(json["id"], "url_7");
        assert_eq!(json["originalUrl"], "https://example.com");
        assert_eq!(json["shortCode"], "ex1");
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
        assert_eq!(json["clickCount"], 0);
        assert!(json.get("lastAccessed").is_none());
    }

    #[test]
    fn deserializes_last_accessed() {
        let json = r#"{
            "id": "url_1",
            "originalUrl": "https://example.com",
            "shortCode": "ex1",
            "createdAt": "2024-01-01T00:00:00Z",
            "clickCount": 3,
            "lastAccessed": "2024-01-02T12:30:00.250Z"
        }"#;

        let record: UrlRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.click_count, 3);
        assert_eq!(
            record.last_accessed,
            Some("2024-01-02T12:30:00.250Z".parse().unwrap())
        );
    }
}
