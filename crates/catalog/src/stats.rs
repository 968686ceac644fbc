use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::domain::{Event, EventCategory, EventStatus, Participant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub count: usize,
}

/// Headline numbers for the admin dashboard and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_events: usize,
    pub upcoming_events: usize,
    /// Sum of registered counts across events.
    pub total_participants: u64,
    pub average_participants_per_event: f64,
    pub events_by_category: BTreeMap<EventCategory, usize>,
    pub participants_trend: Vec<MonthlyCount>,
}

impl CatalogStats {
    pub fn compute(events: &[Event], participants: &[Participant]) -> Self {
        let total_participants: u64 = events
            .iter()
            .map(|event| u64::from(event.registered_count))
            .sum();

        let mut events_by_category: BTreeMap<EventCategory, usize> = EventCategory::ALL
            .iter()
            .map(|category| (*category, 0))
            .collect();
        for event in events {
            *events_by_category.entry(event.category).or_default() += 1;
        }

        let mut trend: BTreeMap<String, usize> = BTreeMap::new();
        for participant in participants {
            let month = participant.registration_date.format("%Y-%m").to_string();
            *trend.entry(month).or_default() += 1;
        }

        Self {
            total_events: events.len(),
            upcoming_events: events
                .iter()
                .filter(|event| event.status == EventStatus::Upcoming)
                .count(),
            total_participants,
            average_participants_per_event: average_to_one_decimal(
                total_participants,
                events.len(),
            ),
            events_by_category,
            participants_trend: trend
                .into_iter()
                .map(|(month, count)| MonthlyCount { month, count })
                .collect(),
        }
    }
}

fn average_to_one_decimal(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (total as f64 / count as f64 * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
