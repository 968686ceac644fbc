//! Event search criteria and ordering.
//!
//! Everything here is a pure function of its inputs: filtering keeps the
//! relative order of the events it is given and sorting is stable.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use shared::{
    domain::{Event, EventCategory, EventStatus},
    error::ParseError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFilter {
    #[default]
    All,
    Free,
    Paid,
}

impl PriceFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceFilter::All => "all",
            PriceFilter::Free => "free",
            PriceFilter::Paid => "paid",
        }
    }

    pub fn matches(self, event: &Event) -> bool {
        match self {
            PriceFilter::All => true,
            PriceFilter::Free => event.is_free(),
            PriceFilter::Paid => !event.is_free(),
        }
    }
}

impl FromStr for PriceFilter {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(PriceFilter::All),
            "free" => Ok(PriceFilter::Free),
            "paid" => Ok(PriceFilter::Paid),
            _ => Err(ParseError::new("PriceFilter", raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Date,
    Popularity,
    Price,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Popularity => "popularity",
            SortBy::Price => "price",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "date" => Ok(SortBy::Date),
            "popularity" => Ok(SortBy::Popularity),
            "price" => Ok(SortBy::Price),
            _ => Err(ParseError::new("SortBy", raw)),
        }
    }
}

/// Active browsing criteria. Empty fields place no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    pub search: String,
    pub categories: BTreeSet<EventCategory>,
    pub statuses: BTreeSet<EventStatus>,
    pub location: String,
    pub price: PriceFilter,
}

impl EventFilter {
    pub fn with_category(mut self, category: EventCategory) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    pub fn toggle_category(&mut self, category: EventCategory) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    pub fn toggle_status(&mut self, status: EventStatus) {
        if !self.statuses.remove(&status) {
            self.statuses.insert(status);
        }
    }

    /// Number of criteria currently narrowing the result.
    pub fn active_count(&self) -> usize {
        [
            !self.search.is_empty(),
            !self.categories.is_empty(),
            !self.statuses.is_empty(),
            !self.location.is_empty(),
            self.price != PriceFilter::All,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn matches(&self, event: &Event) -> bool {
        let term = self.search.to_lowercase();
        self.matches_with_term(event, &term)
    }

    fn matches_with_term(&self, event: &Event, lowered_term: &str) -> bool {
        (lowered_term.is_empty()
            || contains_folded(&event.title, lowered_term)
            || contains_folded(&event.description, lowered_term)
            || contains_folded(&event.location, lowered_term))
            && (self.categories.is_empty() || self.categories.contains(&event.category))
            && (self.statuses.is_empty() || self.statuses.contains(&event.status))
            && (self.location.is_empty() || event.location == self.location)
            && self.price.matches(event)
    }
}

/// Filter plus ordering, as held by one browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseCriteria {
    pub filter: EventFilter,
    pub sort_by: SortBy,
}

impl BrowseCriteria {
    pub fn new(filter: EventFilter, sort_by: SortBy) -> Self {
        Self { filter, sort_by }
    }

    /// Back to an unrestricted, date-ordered listing.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        sort_events(filter_events(events, &self.filter), self.sort_by)
    }
}

/// Events satisfying every active criterion, in input order.
pub fn filter_events<'a>(events: &'a [Event], filter: &EventFilter) -> Vec<&'a Event> {
    let term = filter.search.to_lowercase();
    events
        .iter()
        .filter(|event| filter.matches_with_term(event, &term))
        .collect()
}

/// Stable ordering by the selected criterion.
pub fn sort_events(mut events: Vec<&Event>, sort_by: SortBy) -> Vec<&Event> {
    match sort_by {
        SortBy::Date => events.sort_by_key(|event| event.start_date),
        SortBy::Popularity => {
            events.sort_by(|a, b| b.registered_count.cmp(&a.registered_count))
        }
        SortBy::Price => events.sort_by_key(|event| event.effective_price()),
    }
    events
}

/// Unique locations in order of first appearance.
pub fn distinct_locations(events: &[Event]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    events
        .iter()
        .map(|event| event.location.as_str())
        .filter(|location| seen.insert(*location))
        .collect()
}

/// Case-insensitive substring match; `lowered_term` must already be lowercase.
pub fn contains_folded(haystack: &str, lowered_term: &str) -> bool {
    haystack.to_lowercase().contains(lowered_term)
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
