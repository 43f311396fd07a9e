//! Data model shared by the controllers: messages, citations, search results
//! and the search filter selection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AegisError, Result};

/// Display classification for citations and search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceCategory {
    PeerReviewed,
    Government,
    News,
}

impl SourceCategory {
    pub const ALL: [SourceCategory; 3] = [
        SourceCategory::PeerReviewed,
        SourceCategory::Government,
        SourceCategory::News,
    ];

    /// Stable id, as used in config files and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            SourceCategory::PeerReviewed => "peer-reviewed",
            SourceCategory::Government => "government",
            SourceCategory::News => "news",
        }
    }

    /// Human-readable badge text
    pub fn label(&self) -> &'static str {
        match self {
            SourceCategory::PeerReviewed => "peer reviewed",
            SourceCategory::Government => "government",
            SourceCategory::News => "news",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SourceCategory {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "peer-reviewed" | "peer_reviewed" | "peer reviewed" => Ok(SourceCategory::PeerReviewed),
            "government" => Ok(SourceCategory::Government),
            "news" => Ok(SourceCategory::News),
            _ => Err(AegisError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

/// A reference attached to an assistant message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub source: String,
    pub url: String,
    pub category: SourceCategory,
}

impl Citation {
    pub fn new(source: impl Into<String>, url: impl Into<String>, category: SourceCategory) -> Self {
        Self {
            source: source.into(),
            url: url.into(),
            category,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One turn in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Time-ordered unique id (UUIDv7)
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content.into(), None)
    }

    pub fn assistant(content: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self::new(MessageRole::Assistant, content.into(), Some(citations))
    }

    fn new(role: MessageRole, content: String, citations: Option<Vec<Citation>>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            role,
            content,
            citations,
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Citations attached to this message (empty for user turns)
    pub fn citations(&self) -> &[Citation] {
        self.citations.as_deref().unwrap_or(&[])
    }
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub snippet: String,
    pub source: String,
    pub category: SourceCategory,
    pub url: String,
    pub observed_at: DateTime<Utc>,
    /// Relevance in [0, 1]
    pub relevance_score: f32,
}

impl SearchResult {
    /// Relative age label ("2 days ago", "1 week ago")
    pub fn observed_label(&self, now: DateTime<Utc>) -> String {
        relative_label(now - self.observed_at)
    }

    /// Relevance as a whole percentage
    pub fn relevance_percent(&self) -> u32 {
        (self.relevance_score.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

fn relative_label(age: Duration) -> String {
    fn plural(n: i64, unit: &str) -> String {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    }

    if age < Duration::minutes(1) {
        "just now".to_string()
    } else if age < Duration::hours(1) {
        plural(age.num_minutes(), "minute")
    } else if age < Duration::days(1) {
        plural(age.num_hours(), "hour")
    } else if age < Duration::weeks(1) {
        plural(age.num_days(), "day")
    } else if age < Duration::days(30) {
        plural(age.num_weeks(), "week")
    } else if age < Duration::days(365) {
        plural(age.num_days() / 30, "month")
    } else {
        plural(age.num_days() / 365, "year")
    }
}

/// Category selection in the search filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    #[default]
    All,
    PeerReviewed,
    Government,
    News,
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::PeerReviewed,
        CategoryFilter::Government,
        CategoryFilter::News,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::PeerReviewed => "peer-reviewed",
            CategoryFilter::Government => "government",
            CategoryFilter::News => "news",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Sources",
            CategoryFilter::PeerReviewed => "Peer Reviewed",
            CategoryFilter::Government => "Government",
            CategoryFilter::News => "News",
        }
    }

    pub fn matches(&self, category: SourceCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::PeerReviewed => category == SourceCategory::PeerReviewed,
            CategoryFilter::Government => category == SourceCategory::Government,
            CategoryFilter::News => category == SourceCategory::News,
        }
    }

    /// Next option, wrapping around (for cycling in the TUI)
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for CategoryFilter {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        let category: SourceCategory = s
            .parse()
            .map_err(|_| AegisError::invalid_filter_value("category", s))?;
        Ok(match category {
            SourceCategory::PeerReviewed => CategoryFilter::PeerReviewed,
            SourceCategory::Government => CategoryFilter::Government,
            SourceCategory::News => CategoryFilter::News,
        })
    }
}

/// Time window selection in the search filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 4] = [TimeRange::All, TimeRange::Week, TimeRange::Month, TimeRange::Year];

    pub fn id(&self) -> &'static str {
        match self {
            TimeRange::All => "all",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::All => "All Time",
            TimeRange::Week => "Past Week",
            TimeRange::Month => "Past Month",
            TimeRange::Year => "Past Year",
        }
    }

    /// Maximum age a result may have, `None` for unbounded
    pub fn window(&self) -> Option<Duration> {
        match self {
            TimeRange::All => None,
            TimeRange::Week => Some(Duration::weeks(1)),
            TimeRange::Month => Some(Duration::days(30)),
            TimeRange::Year => Some(Duration::days(365)),
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl FromStr for TimeRange {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TimeRange::All),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            _ => Err(AegisError::invalid_filter_value("time_range", s)),
        }
    }
}

pub const DEFAULT_MIN_RELEVANCE: f32 = 0.7;

/// Transient filter selection for the search panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub category: CategoryFilter,
    pub time_range: TimeRange,
    pub min_relevance: f32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            category: CategoryFilter::All,
            time_range: TimeRange::All,
            min_relevance: DEFAULT_MIN_RELEVANCE,
        }
    }
}

/// A single filter change
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterUpdate {
    Category(CategoryFilter),
    TimeRange(TimeRange),
    MinRelevance(f32),
}

impl FilterUpdate {
    /// Parse a `field`/`value` pair. Accepts snake_case and camelCase field names.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        match field {
            "category" | "categoryFilter" | "category_filter" | "type" => {
                Ok(FilterUpdate::Category(value.parse()?))
            }
            "time_range" | "timeRange" => Ok(FilterUpdate::TimeRange(value.parse()?)),
            "min_relevance" | "minRelevance" | "relevance" => {
                let parsed: f32 = value
                    .trim()
                    .parse()
                    .map_err(|_| AegisError::invalid_filter_value(field, value))?;
                if !parsed.is_finite() {
                    return Err(AegisError::invalid_filter_value(field, value));
                }
                Ok(FilterUpdate::MinRelevance(parsed))
            }
            _ => Err(AegisError::unknown_filter_field(field)),
        }
    }
}

impl SearchFilters {
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Category(category) => self.category = category,
            FilterUpdate::TimeRange(range) => self.time_range = range,
            FilterUpdate::MinRelevance(threshold) => self.min_relevance = threshold.clamp(0.0, 1.0),
        }
    }

    /// Whether a result passes every filter at time `now`
    pub fn matches(&self, result: &SearchResult, now: DateTime<Utc>) -> bool {
        if !self.category.matches(result.category) {
            return false;
        }
        if let Some(window) = self.time_range.window() {
            if now - result.observed_at > window {
                return false;
            }
        }
        result.relevance_score >= self.min_relevance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(category: SourceCategory, age: Duration, score: f32) -> SearchResult {
        SearchResult {
            id: "r".into(),
            title: "t".into(),
            snippet: "s".into(),
            source: "src".into(),
            category,
            url: "#".into(),
            observed_at: Utc::now() - age,
            relevance_score: score,
        }
    }

    #[test]
    fn test_category_round_trip_ids() {
        for category in SourceCategory::ALL {
            assert_eq!(category.id().parse::<SourceCategory>().unwrap(), category);
        }
        assert!("blog".parse::<SourceCategory>().is_err());
    }

    #[test]
    fn test_relative_labels() {
        assert_eq!(relative_label(Duration::days(2)), "2 days ago");
        assert_eq!(relative_label(Duration::weeks(1)), "1 week ago");
        assert_eq!(relative_label(Duration::hours(4)), "4 hours ago");
        assert_eq!(relative_label(Duration::seconds(5)), "just now");
    }

    #[test]
    fn test_filter_update_parse() {
        assert_eq!(
            FilterUpdate::parse("categoryFilter", "government").unwrap(),
            FilterUpdate::Category(CategoryFilter::Government)
        );
        assert_eq!(
            FilterUpdate::parse("timeRange", "week").unwrap(),
            FilterUpdate::TimeRange(TimeRange::Week)
        );
        assert!(matches!(
            FilterUpdate::parse("colour", "red"),
            Err(AegisError::UnknownFilterField { .. })
        ));
        assert!(matches!(
            FilterUpdate::parse("min_relevance", "high"),
            Err(AegisError::InvalidFilterValue { .. })
        ));
    }

    #[test]
    fn test_min_relevance_is_clamped() {
        let mut filters = SearchFilters::default();
        filters.apply(FilterUpdate::MinRelevance(1.7));
        assert_eq!(filters.min_relevance, 1.0);
        filters.apply(FilterUpdate::MinRelevance(-3.0));
        assert_eq!(filters.min_relevance, 0.0);
    }

    #[test]
    fn test_filters_match() {
        let now = Utc::now();
        let mut filters = SearchFilters::default();
        let gov = result(SourceCategory::Government, Duration::days(2), 0.95);
        let low = result(SourceCategory::News, Duration::days(2), 0.5);
        assert!(filters.matches(&gov, now));
        assert!(!filters.matches(&low, now));

        filters.apply(FilterUpdate::Category(CategoryFilter::PeerReviewed));
        assert!(!filters.matches(&gov, now));

        filters.apply(FilterUpdate::Category(CategoryFilter::All));
        filters.apply(FilterUpdate::TimeRange(TimeRange::Week));
        let old = result(SourceCategory::Government, Duration::days(40), 0.9);
        assert!(!filters.matches(&old, now));
    }

    #[test]
    fn test_assistant_message_carries_citations() {
        let msg = Message::assistant(
            "answer",
            vec![Citation::new("WHO", "#", SourceCategory::Government)],
        );
        assert_eq!(msg.role, MessageRole::Assistant);
        assert_eq!(msg.citations().len(), 1);
        assert!(Message::user("q").citations().is_empty());
    }

    #[test]
    fn test_json_shape() {
        let user = serde_json::to_value(Message::user("q")).unwrap();
        assert_eq!(user["role"], "user");
        assert!(user.get("citations").is_none());

        let cited = Message::assistant(
            "a",
            vec![Citation::new("Journal", "#", SourceCategory::PeerReviewed)],
        );
        let json = serde_json::to_value(&cited).unwrap();
        assert_eq!(json["citations"][0]["category"], "peer-reviewed");
    }
}
