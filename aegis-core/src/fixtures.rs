//! Demonstration dataset returned by the simulated backends

use chrono::{DateTime, Duration, Utc};

use crate::model::{Citation, SearchResult, SourceCategory};

/// Canned assistant reply for a prompt
pub fn assistant_reply(text: &str) -> String {
    format!(
        "Based on the latest data analysis, I've identified several key insights regarding your \
         query about \"{}\". Here are the main findings with supporting evidence from reliable sources.",
        text
    )
}

pub fn demo_citations() -> Vec<Citation> {
    vec![
        Citation::new("WHO Health Report 2024", "#", SourceCategory::Government),
        Citation::new("Climate Research Journal", "#", SourceCategory::PeerReviewed),
    ]
}

/// The fixed two-hit result set, aged relative to `now`
pub fn demo_results(now: DateTime<Utc>) -> Vec<SearchResult> {
    vec![
        SearchResult {
            id: "1".to_string(),
            title: "Global Health Security Index 2024: Climate Resilience Assessment".to_string(),
            snippet: "Recent analysis shows that countries with robust climate adaptation policies \
                      demonstrate significantly better health outcomes during extreme weather events..."
                .to_string(),
            source: "WHO Global Health Observatory".to_string(),
            category: SourceCategory::Government,
            url: "#".to_string(),
            observed_at: now - Duration::days(2),
            relevance_score: 0.95,
        },
        SearchResult {
            id: "2".to_string(),
            title: "Machine Learning Applications in Public Health Decision Making".to_string(),
            snippet: "A comprehensive review of AI-driven approaches to public health surveillance \
                      and policy optimization, with case studies from 15 countries..."
                .to_string(),
            source: "Nature Medicine".to_string(),
            category: SourceCategory::PeerReviewed,
            url: "#".to_string(),
            observed_at: now - Duration::weeks(1),
            relevance_score: 0.89,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_results_are_well_formed() {
        let now = Utc::now();
        let results = demo_results(now);
        assert_eq!(results.len(), 2);
        for r in &results {
            assert!((0.0..=1.0).contains(&r.relevance_score));
        }
        assert_eq!(results[0].observed_label(now), "2 days ago");
        assert_eq!(results[1].observed_label(now), "1 week ago");
    }
}
