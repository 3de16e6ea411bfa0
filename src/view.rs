//! View Projections
//!
//! Pure functions that turn a [`DashboardState`] into display-ready values.
//! Renderers (the CLI, or anything else) draw these without touching the
//! store.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{HistoryPoint, Post};
use crate::store::DashboardState;

/// Y-axis domain of the sentiment trend chart
pub const SENTIMENT_DOMAIN: (f64, f64) = (0.0, 10.0);

/// Characters of post content shown in the list
pub const EXCERPT_CHARS: usize = 60;

/// What the dashboard should draw for a given state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Screen {
    /// Post list fetch in flight
    Loading,
    /// Post list fetch failed; offer a retry bound to `refresh`
    Failed { message: String },
    /// Post list with an optional detail panel
    Ready {
        rows: Vec<PostRow>,
        detail: Option<PostDetail>,
    },
}

impl Screen {
    /// Classify the state. Loading wins over error, error wins over data.
    pub fn from_state(state: &DashboardState) -> Self {
        if state.loading {
            return Screen::Loading;
        }

        if let Some(message) = &state.error {
            return Screen::Failed {
                message: message.clone(),
            };
        }

        let rows = state
            .posts
            .iter()
            .map(|p| PostRow::new(p, state.is_selected(&p.post_id)))
            .collect();

        let detail = state
            .selected_post
            .as_ref()
            .map(|p| PostDetail::new(p, &state.post_history));

        Screen::Ready { rows, detail }
    }
}

/// One entry of the post list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRow {
    pub post_id: String,
    pub excerpt: String,
    pub created_date: String,
    pub total_comments: u64,
    pub selected: bool,
}

impl PostRow {
    pub fn new(post: &Post, selected: bool) -> Self {
        Self {
            post_id: post.post_id.clone(),
            excerpt: excerpt(&post.content, EXCERPT_CHARS),
            created_date: post.created_time.format("%Y-%m-%d").to_string(),
            total_comments: post.total_comments,
            selected,
        }
    }
}

/// Detail panel for the selected post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub post_id: String,
    pub stats: StatCards,
    pub trend: Vec<TrendPoint>,
    pub content: String,
    pub posted_at: String,
}

impl PostDetail {
    pub fn new(post: &Post, history: &[HistoryPoint]) -> Self {
        Self {
            post_id: post.post_id.clone(),
            stats: StatCards::new(post),
            trend: trend(history),
            content: post.content.clone(),
            posted_at: timestamp_label(&post.created_time),
        }
    }
}

/// Headline numbers for a post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCards {
    pub total_comments: u64,
    pub average_sentiment: String,
    pub sentiment_sum: String,
}

impl StatCards {
    pub fn new(post: &Post) -> Self {
        Self {
            total_comments: post.total_comments,
            average_sentiment: sentiment_label(post.average_sentiment),
            sentiment_sum: sentiment_label(post.sentiment_sum),
        }
    }
}

/// A single point on the sentiment trend chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub sentiment: f64,
}

impl TrendPoint {
    /// Position of this point on an axis `width` cells wide, clamped to the chart domain
    pub fn scaled(&self, width: usize) -> usize {
        let (min, max) = SENTIMENT_DOMAIN;
        let ratio = ((self.sentiment - min) / (max - min)).clamp(0.0, 1.0);
        (ratio * width as f64).round() as usize
    }
}

/// Map history onto chart points, keeping server order
pub fn trend(history: &[HistoryPoint]) -> Vec<TrendPoint> {
    history
        .iter()
        .map(|h| TrendPoint {
            label: timestamp_label(&h.last_updated),
            sentiment: h.average_sentiment,
        })
        .collect()
}

/// Format a score to one decimal; absent scores read as `0.0`
pub fn sentiment_label(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => "0.0".to_string(),
    }
}

fn timestamp_label(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate on a char boundary, marking the cut with an ellipsis
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let single_line = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= max_chars {
        return single_line;
    }

    let mut cut: String = single_line.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_post() -> Post {
        Post::new("1", "hi", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .comments(5)
            .sentiment(7.2, 36.0)
    }

    fn ready_state() -> DashboardState {
        DashboardState {
            posts: vec![sample_post()],
            loading: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_sentiment_label() {
        assert_eq!(sentiment_label(Some(7.2)), "7.2");
        assert_eq!(sentiment_label(Some(36.0)), "36.0");
        assert_eq!(sentiment_label(None), "0.0");
        assert_eq!(sentiment_label(Some(f64::NAN)), "0.0");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("line one\nline   two", 40), "line one line two");
        assert_eq!(excerpt("abcdefghij", 5), "abcd…");
        assert_eq!(excerpt("xin chào thế giới", 6), "xin c…");
    }

    #[test]
    fn test_trend_point_scaling() {
        let point = |sentiment| TrendPoint { label: String::new(), sentiment };
        assert_eq!(point(5.0).scaled(20), 10);
        assert_eq!(point(10.0).scaled(20), 20);
        assert_eq!(point(-3.0).scaled(20), 0);
        assert_eq!(point(14.0).scaled(20), 20);
    }

    #[test]
    fn test_loading_screen_takes_precedence() {
        let state = DashboardState {
            error: Some("boom".to_string()),
            ..Default::default()
        };
        assert_eq!(Screen::from_state(&state), Screen::Loading);
    }

    #[test]
    fn test_failed_screen() {
        let state = DashboardState {
            posts: vec![sample_post()],
            loading: false,
            error: Some("Failed to fetch posts: Request timeout".to_string()),
            ..Default::default()
        };

        match Screen::from_state(&state) {
            Screen::Failed { message } => assert!(message.contains("timeout")),
            other => panic!("unexpected screen: {other:?}"),
        }
    }

    #[test]
    fn test_ready_without_selection() {
        let Screen::Ready { rows, detail } = Screen::from_state(&ready_state()) else {
            panic!("expected ready screen");
        };

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].created_date, "2024-01-01");
        assert_eq!(rows[0].total_comments, 5);
        assert!(!rows[0].selected);
        assert!(detail.is_none());
    }

    #[test]
    fn test_ready_with_selection_and_trend() {
        let mut state = ready_state();
        state.selected_post = Some(sample_post());
        state.post_history = vec![
            HistoryPoint::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 7.0),
            HistoryPoint::new(Utc.with_ymd_and_hms(2024, 1, 2, 6, 30, 0).unwrap(), 7.2),
        ];

        let Screen::Ready { rows, detail } = Screen::from_state(&state) else {
            panic!("expected ready screen");
        };
        let detail = detail.unwrap();

        assert!(rows[0].selected);
        assert_eq!(detail.stats.total_comments, 5);
        assert_eq!(detail.stats.average_sentiment, "7.2");
        assert_eq!(detail.stats.sentiment_sum, "36.0");
        assert_eq!(detail.posted_at, "2024-01-01 00:00");
        assert_eq!(
            detail.trend,
            vec![
                TrendPoint { label: "2024-01-01 00:00".to_string(), sentiment: 7.0 },
                TrendPoint { label: "2024-01-02 06:30".to_string(), sentiment: 7.2 },
            ]
        );
    }

    #[test]
    fn test_screen_serializes_with_status_tag() {
        let value = serde_json::to_value(Screen::from_state(&ready_state())).unwrap();
        assert_eq!(value["status"], "ready");
        assert_eq!(value["rows"][0]["post_id"], "1");
        assert!(value["detail"].is_null());
    }
}
