//! Static overview data and display lookup tables
//!
//! Everything here is an immutable table; no state, no behaviour beyond lookups.

use serde::Serialize;

use crate::model::SourceCategory;

/// Colour family hint for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
    Orange,
    Gray,
}

impl SourceCategory {
    pub fn tone(&self) -> Tone {
        match self {
            SourceCategory::PeerReviewed => Tone::Green,
            SourceCategory::Government => Tone::Blue,
            SourceCategory::News => Tone::Orange,
        }
    }
}

/// Headline stat card
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Widget {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub value: &'static str,
    pub caption: &'static str,
    pub tone: Tone,
}

pub const SUMMARY_WIDGETS: [Widget; 4] = [
    Widget {
        title: "Active Alerts",
        subtitle: "Health & Safety",
        value: "3",
        caption: "2 health, 1 climate",
        tone: Tone::Red,
    },
    Widget {
        title: "AI Insights",
        subtitle: "Generated Today",
        value: "24",
        caption: "+15% from yesterday",
        tone: Tone::Blue,
    },
    Widget {
        title: "Active Users",
        subtitle: "Government & Community",
        value: "156",
        caption: "Online now",
        tone: Tone::Green,
    },
    Widget {
        title: "System Health",
        subtitle: "Platform Status",
        value: "98.5%",
        caption: "Uptime",
        tone: Tone::Purple,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

impl AlertPriority {
    pub fn label(&self) -> &'static str {
        match self {
            AlertPriority::High => "High Priority",
            AlertPriority::Medium => "Medium",
            AlertPriority::Low => "Low",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            AlertPriority::High => Tone::Red,
            AlertPriority::Medium => Tone::Yellow,
            AlertPriority::Low => Tone::Green,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HealthAlert {
    pub id: u32,
    pub priority: AlertPriority,
    pub message: &'static str,
    pub time: &'static str,
}

pub const HEALTH_ALERTS: [HealthAlert; 3] = [
    HealthAlert {
        id: 1,
        priority: AlertPriority::High,
        message: "Flu outbreak reported in District 3",
        time: "2 hours ago",
    },
    HealthAlert {
        id: 2,
        priority: AlertPriority::Medium,
        message: "Water quality concerns in Zone B",
        time: "4 hours ago",
    },
    HealthAlert {
        id: 3,
        priority: AlertPriority::Low,
        message: "Vaccination drive reminder",
        time: "1 day ago",
    },
];

/// One tile of the climate panel
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Reading {
    pub label: &'static str,
    pub value: &'static str,
    pub tone: Tone,
}

pub const CLIMATE_READINGS: [Reading; 4] = [
    Reading {
        label: "Temperature",
        value: "24°C",
        tone: Tone::Blue,
    },
    Reading {
        label: "Air Quality",
        value: "Good",
        tone: Tone::Green,
    },
    Reading {
        label: "Humidity",
        value: "65%",
        tone: Tone::Purple,
    },
    Reading {
        label: "Trend",
        value: "Improving",
        tone: Tone::Orange,
    },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GovernanceSummary {
    pub active_policies: u32,
    pub pending_decisions: u32,
    pub citizen_feedback: u32,
}

pub const GOVERNANCE: GovernanceSummary = GovernanceSummary {
    active_policies: 12,
    pending_decisions: 5,
    citizen_feedback: 89,
};

/// Signed-in user shown in the top bar
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Profile {
    pub name: &'static str,
    pub role: &'static str,
}

pub const PROFILE: Profile = Profile {
    name: "Dr. Sarah Chen",
    role: "Health Officer",
};

pub const ONLINE: bool = true;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_count_matches_widget() {
        let alerts_widget = SUMMARY_WIDGETS
            .iter()
            .find(|w| w.title == "Active Alerts")
            .unwrap();
        assert_eq!(alerts_widget.value, HEALTH_ALERTS.len().to_string());
    }

    #[test]
    fn test_category_tones_are_distinct() {
        let tones: Vec<Tone> = SourceCategory::ALL.iter().map(|c| c.tone()).collect();
        assert_eq!(tones, vec![Tone::Green, Tone::Blue, Tone::Orange]);
    }
}
