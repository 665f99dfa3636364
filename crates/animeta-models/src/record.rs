use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Separator character embedded in synthesized placeholder identifiers.
/// An id containing this character is the one and only signal that a record
/// came from the bundled dataset rather than a live provider.
pub const MOCK_ID_SEPARATOR: char = '_';

/// Shown in place of a missing poster or banner.
pub const IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/225x319?text=No+Image";

/// Display value for a record whose provider reported no score.
pub const UNKNOWN_RATING: &str = "N/A";

/// Display value for a record whose provider reported no synopsis.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Normalized anime metadata, identical in shape regardless of which
/// provider produced it. Serialized field names match the wire format the
/// original payload consumers expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimeRecord {
    /// Provider-scoped identifier. Opaque: not numeric, not unique across
    /// providers.
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    pub thumbnail: String,
    #[serde(rename = "backgroundImage")]
    pub background_image: String,
    #[serde(rename = "videoUrl", skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub year: i32,
    /// Display-ready decimal string, "N/A" when unknown.
    pub rating: String,
    pub episodes: u32,
    /// Lowercase genre names.
    pub genres: Vec<String>,
    #[serde(rename = "isNewRelease")]
    pub is_new_release: bool,
    #[serde(rename = "isTrending")]
    pub is_trending: bool,
}

impl AnimeRecord {
    /// True when the identifier marks this record as bundled placeholder
    /// data.
    pub fn is_mock(&self) -> bool {
        self.id.contains(MOCK_ID_SEPARATOR)
    }

    /// Returns a copy with a different identifier. Records are never
    /// mutated in place.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_trending(mut self, trending: bool) -> Self {
        self.is_trending = trending;
        self
    }

    pub fn with_new_release(mut self, new_release: bool) -> Self {
        self.is_new_release = new_release;
        self
    }
}

/// First 100 characters of a synopsis plus an ellipsis marker.
pub fn truncate_description(full: &str) -> String {
    let mut short: String = full.chars().take(100).collect();
    short.push_str("...");
    short
}

/// A release counts as "new" when it started within the last 3 calendar
/// months of the observation time.
pub fn is_recent_release(start_date: NaiveDate, now: DateTime<Utc>) -> bool {
    match now.date_naive().checked_sub_months(Months::new(3)) {
        Some(cutoff) => start_date >= cutoff,
        None => false,
    }
}

/// Release year for display, defaulting to the observation year when the
/// provider reported no start date.
pub fn display_year(start_date: Option<NaiveDate>, now: DateTime<Utc>) -> i32 {
    start_date.map(|d| d.year()).unwrap_or_else(|| now.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str) -> AnimeRecord {
        AnimeRecord {
            id: id.to_string(),
            title: "Test".to_string(),
            description: "desc".to_string(),
            short_description: "desc".to_string(),
            thumbnail: IMAGE_PLACEHOLDER.to_string(),
            background_image: IMAGE_PLACEHOLDER.to_string(),
            video_url: None,
            year: 2024,
            rating: UNKNOWN_RATING.to_string(),
            episodes: 12,
            genres: vec!["action".to_string()],
            is_new_release: false,
            is_trending: false,
        }
    }

    #[test]
    fn mock_detection_uses_separator_only() {
        assert!(record("1535_3").is_mock());
        assert!(!record("1535").is_mock());
    }

    #[test]
    fn with_id_leaves_original_untouched() {
        let original = record("1535");
        let renamed = original.clone().with_id("1535_0");
        assert_eq!(original.id, "1535");
        assert_eq!(renamed.id, "1535_0");
    }

    #[test]
    fn truncation_appends_ellipsis() {
        let long = "x".repeat(250);
        let short = truncate_description(&long);
        assert_eq!(short.chars().count(), 103);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn recent_release_window_is_three_months() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let inside = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let outside = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(is_recent_release(inside, now));
        assert!(!is_recent_release(outside, now));
    }

    #[test]
    fn serialized_names_match_wire_format() {
        let json = serde_json::to_value(record("1")).unwrap();
        assert!(json.get("shortDescription").is_some());
        assert!(json.get("backgroundImage").is_some());
        assert!(json.get("isNewRelease").is_some());
        assert!(json.get("isTrending").is_some());
        // Absent trailer URLs are omitted entirely.
        assert!(json.get("videoUrl").is_none());
    }
}
