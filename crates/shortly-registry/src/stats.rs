use jiff::Timestamp;
use serde::Serialize;
use shortly_core::{ShortCode, UrlRecord};

/// Maximum number of entries in [`AggregateStats::top_urls`].
pub const TOP_URLS_LIMIT: usize = 5;

/// Result of a stats query: one record or the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Stats {
    Code(CodeStats),
    Aggregate(AggregateStats),
}

/// Access statistics for a single short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStats {
    pub original_url: String,
    pub short_code: ShortCode,
    pub click_count: u64,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<Timestamp>,
}

impl From<&UrlRecord> for CodeStats {
    fn from(record: &UrlRecord) -> Self {
        Self {
            original_url: record.original_url.clone(),
            short_code: record.short_code.clone(),
            click_count: record.click_count,
            created_at: record.created_at,
            last_accessed: record.last_accessed,
        }
    }
}

/// Registry-wide totals plus the most clicked links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_urls: usize,
    pub total_clicks: u64,
    pub top_urls: Vec<TopUrl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUrl {
    pub short_code: ShortCode,
    pub original_url: String,
    pub click_count: u64,
}

impl From<&UrlRecord> for TopUrl {
    fn from(record: &UrlRecord) -> Self {
        Self {
            short_code: record.short_code.clone(),
            original_url: record.original_url.clone(),
            click_count: record.click_count,
        }
    }
}

impl AggregateStats {
    /// Summarizes `records`, which must be in insertion order.
    ///
    /// Records with equal click counts keep their relative order in the
    /// ranking since the sort is stable.
    pub fn from_records<'a>(records: impl Iterator<Item = &'a UrlRecord>) -> Self {
        let mut ranked: Vec<&UrlRecord> = records.collect();
        let total_urls = ranked.len();
        let total_clicks = ranked.iter().map(|r| r.click_count).sum();

        ranked.sort_by(|a, b| b.click_count.cmp(&a.click_count));
        let top_urls = ranked
            .into_iter()
            .take(TOP_URLS_LIMIT)
            .map(TopUrl::from)
            .collect();

        Self {
            total_urls,
            total_clicks,
            top_urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: u64, clicks: u64) -> UrlRecord {
        let mut record = UrlRecord::new(
            sequence,
            format!("https://example{sequence}.com"),
            ShortCode::new(format!("c{sequence}")),
            Timestamp::from_second(0).unwrap(),
        );
        record.click_count = clicks;
        record
    }

    #[test]
    fn empty_registry() {
        let stats = AggregateStats::from_records(std::iter::empty());
        assert_eq!(stats, AggregateStats::default());
    }

    #[test]
    fn totals_and_ranking() {
        let records = [
            record(1, 3),
            record(2, 10),
            record(3, 0),
            record(4, 7),
            record(5, 1),
            record(6, 2),
            record(7, 4),
        ];

        let stats = AggregateStats::from_records(records.iter());

        assert_eq!(stats.total_urls, 7);
        assert_eq!(stats.total_clicks, 27);
        let ranked: Vec<&str> = stats.top_urls.iter().map(|t| t.short_code.as_str()).collect();
        assert_eq!(ranked, ["c2", "c4", "c7", "c1", "c6"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let records = [record(1, 2), record(2, 5), record(3, 2), record(4, 2)];

        let stats = AggregateStats::from_records(records.iter());

        let ranked: Vec<&str> = stats.top_urls.iter().map(|t| t.short_code.as_str()).collect();
        assert_eq!(ranked, ["c2", "c1", "c3", "c4"]);
    }

    #[test]
    fn serializes_untagged_with_camel_case() {
        let stats = Stats::Aggregate(AggregateStats::from_records([record(1, 4)].iter()));
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["totalUrls"], 1);
        assert_eq!(json["totalClicks"], 4);
        assert_eq!(json["topUrls"][0]["shortCode"], "c1");
        assert_eq!(json["topUrls"][0]["clickCount"], 4);

        let stats = Stats::Code(CodeStats::from(&record(2, 0)));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["originalUrl"], "https://example2.com");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert!(json.get("lastAccessed").is_none());
    }
}
