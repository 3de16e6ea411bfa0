//! Post Data Model
//!
//! Wire types returned by the analytics API. Field names match the JSON
//! payloads (snake_case). Decoding is lenient: numeric fields that are
//! missing or `null` fall back to their defaults instead of failing the
//! whole response, and timestamps accept the handful of formats the
//! upstream collector has been seen to emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A social-media post with its aggregate engagement metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Opaque unique identifier
    pub post_id: String,

    /// Text body of the post
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    /// When the post was originally published
    #[serde(with = "timestamp")]
    pub created_time: DateTime<Utc>,

    /// Number of comments analyzed so far
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_comments: u64,

    /// Mean sentiment score, conventionally in [0, 10]
    #[serde(default)]
    pub average_sentiment: Option<f64>,

    /// Sum of all comment sentiment scores
    #[serde(default)]
    pub sentiment_sum: Option<f64>,

    /// When the aggregates were last recomputed
    #[serde(default, with = "timestamp::option")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Attached media, empty when the post has none
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_url: String,

    /// Graph API post type (e.g., "status", "photo")
    #[serde(default)]
    pub post_type: Option<String>,

    /// Mean toxicity score
    #[serde(default)]
    pub average_toxic: Option<f64>,

    /// Sum of all comment toxicity scores
    #[serde(default)]
    pub toxic_sum: Option<f64>,
}

impl Post {
    /// Create a post with only the required fields set
    pub fn new(
        post_id: impl Into<String>,
        content: impl Into<String>,
        created_time: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id: post_id.into(),
            content: content.into(),
            created_time,
            total_comments: 0,
            average_sentiment: None,
            sentiment_sum: None,
            last_updated: None,
            media_url: String::new(),
            post_type: None,
            average_toxic: None,
            toxic_sum: None,
        }
    }

    /// Set the comment count
    pub fn comments(mut self, total: u64) -> Self {
        self.total_comments = total;
        self
    }

    /// Set the sentiment aggregates
    pub fn sentiment(mut self, average: f64, sum: f64) -> Self {
        self.average_sentiment = Some(average);
        self.sentiment_sum = Some(sum);
        self
    }
}

/// A timestamped snapshot of a post's average sentiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub average_sentiment: f64,

    /// Comment count at the time of the snapshot
    #[serde(default)]
    pub total_comments: Option<u64>,
}

impl HistoryPoint {
    pub fn new(last_updated: DateTime<Utc>, average_sentiment: f64) -> Self {
        Self {
            last_updated,
            average_sentiment,
            total_comments: None,
        }
    }
}

/// Response of `GET /posts/{id}/analytics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAnalytics {
    pub post_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,

    #[serde(with = "timestamp")]
    pub created_time: DateTime<Utc>,

    #[serde(default, with = "timestamp::option")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub media_url: String,

    #[serde(default)]
    pub post_type: Option<String>,

    #[serde(default)]
    pub analytics: AnalyticsSummary,
}

/// Aggregate scores nested in [`PostAnalytics`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_sentiment: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub average_toxic: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub total_comments: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment_sum: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub toxic_sum: f64,
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lenient timestamp (de)serialization.
///
/// Serializes as RFC 3339. Accepts RFC 3339, the Graph API's `+0000`
/// offset form, and naive `YYYY-MM-DDTHH:MM:SS` strings (read as UTC).
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];
    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

    /// Parse a timestamp string in any of the accepted formats
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }

        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
                return Some(dt.with_timezone(&Utc));
            }
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => super::serialize(dt, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decode_post_wire_format() {
        let json = r#"{
            "post_id": "1",
            "content": "hi",
            "created_time": "2024-01-01T00:00:00Z",
            "total_comments": 5,
            "average_sentiment": 7.2,
            "sentiment_sum": 36.0
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.post_id, "1");
        assert_eq!(post.content, "hi");
        assert_eq!(post.created_time, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(post.total_comments, 5);
        assert_eq!(post.average_sentiment, Some(7.2));
        assert_eq!(post.sentiment_sum, Some(36.0));
        assert_eq!(post.last_updated, None);
    }

    #[test]
    fn test_missing_and_null_numbers_default() {
        let json = r#"{
            "post_id": "2",
            "content": null,
            "created_time": "2024-03-05T10:00:00Z",
            "total_comments": null,
            "average_sentiment": null
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.content, "");
        assert_eq!(post.total_comments, 0);
        assert_eq!(post.average_sentiment, None);
        assert_eq!(post.sentiment_sum, None);
    }

    #[test]
    fn test_extra_backend_fields() {
        let json = r#"{
            "post_id": "123_456",
            "content": "launch day",
            "created_time": "2024-11-20T08:15:00+0000",
            "last_updated": "2024-11-21T09:00:00.123456",
            "media_url": "https://cdn.example.com/a.jpg",
            "post_type": "photo",
            "average_sentiment": 6.5,
            "average_toxic": 0.4,
            "total_comments": 12,
            "sentiment_sum": 78,
            "toxic_sum": 4.8,
            "something_new": true
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.created_time, Utc.with_ymd_and_hms(2024, 11, 20, 8, 15, 0).unwrap());
        assert_eq!(post.post_type.as_deref(), Some("photo"));
        assert_eq!(post.average_toxic, Some(0.4));
        assert_eq!(post.sentiment_sum, Some(78.0));
        let updated = post.last_updated.unwrap();
        assert_eq!(updated.timestamp(), Utc.with_ymd_and_hms(2024, 11, 21, 9, 0, 0).unwrap().timestamp());
    }

    #[test]
    fn test_optional_backend_fields_absent_or_null() {
        let json = r#"{
            "post_id": "3",
            "created_time": "2024-01-01T00:00:00Z",
            "media_url": null,
            "post_type": null
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.media_url, "");
        assert_eq!(post.post_type, None);
        assert_eq!(post.toxic_sum, None);
        assert_eq!(post.average_toxic, None);
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let json = r#"{"post_id": "1", "created_time": "yesterday"}"#;
        assert!(serde_json::from_str::<Post>(json).is_err());
    }

    #[test]
    fn test_history_point_decode() {
        let json = r#"[
            {"last_updated": "2024-01-01T00:00:00Z", "average_sentiment": 7.0},
            {"post_id": "1", "last_updated": "2024-01-02T00:00:00Z", "average_sentiment": 7.2, "total_comments": 9}
        ]"#;

        let history: Vec<HistoryPoint> = serde_json::from_str(json).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].average_sentiment, 7.0);
        assert_eq!(history[1].total_comments, Some(9));
        assert!(history[0].last_updated < history[1].last_updated);
    }

    #[test]
    fn test_analytics_decode() {
        let json = r#"{
            "post_id": "1",
            "content": "hi",
            "created_time": "2024-01-01T00:00:00Z",
            "post_type": "status",
            "analytics": {"average_sentiment": 7.2, "total_comments": 5, "sentiment_sum": 36}
        }"#;

        let analytics: PostAnalytics = serde_json::from_str(json).unwrap();
        assert_eq!(analytics.analytics.total_comments, 5);
        assert_eq!(analytics.analytics.average_toxic, 0.0);
        assert_eq!(analytics.analytics.sentiment_sum, 36.0);
    }

    #[test]
    fn test_timestamp_serializes_rfc3339() {
        let post = Post::new("1", "hi", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["created_time"], "2024-01-01T00:00:00Z");
        assert!(value["last_updated"].is_null());
    }
}
