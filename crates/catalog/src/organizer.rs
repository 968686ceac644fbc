use shared::domain::{Event, EventId, EventStatus, Participant, ParticipantStatus, UserId};

use crate::{filter::contains_folded, newest_first, Catalog};

/// Participant search within one organizer's events. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct ParticipantQuery {
    pub search: String,
    pub event_id: Option<EventId>,
    pub status: Option<ParticipantStatus>,
}

/// The slice of the catalog owned by one organizer.
pub struct OrganizerView<'a> {
    catalog: &'a Catalog,
    organizer_id: UserId,
    events: Vec<&'a Event>,
}

impl<'a> OrganizerView<'a> {
    pub(crate) fn new(catalog: &'a Catalog, organizer_id: UserId) -> Self {
        let events = catalog
            .events()
            .iter()
            .filter(|event| event.is_organized_by(&organizer_id))
            .collect();
        Self {
            catalog,
            organizer_id,
            events,
        }
    }

    pub fn organizer_id(&self) -> &UserId {
        &self.organizer_id
    }

    pub fn events(&self) -> &[&'a Event] {
        &self.events
    }

    pub fn events_with_status(&self, status: EventStatus) -> Vec<&'a Event> {
        self.events
            .iter()
            .copied()
            .filter(|event| event.status == status)
            .collect()
    }

    pub fn total_participants(&self) -> u64 {
        self.events
            .iter()
            .map(|event| u64::from(event.registered_count))
            .sum()
    }

    pub fn total_capacity(&self) -> u64 {
        self.events
            .iter()
            .map(|event| u64::from(event.capacity))
            .sum()
    }

    /// Ticket price times registrations, summed; free events add nothing.
    /// Saturates at `u64::MAX`.
    pub fn total_revenue(&self) -> u64 {
        self.events.iter().fold(0u64, |total, event| {
            let revenue = event
                .effective_price()
                .saturating_mul(u64::from(event.registered_count));
            total.saturating_add(revenue)
        })
    }

    /// Registrations over total capacity as a rounded percentage, 0 without
    /// capacity. Overbooked events can push it above 100.
    pub fn fill_rate_percent(&self) -> u64 {
        let capacity = self.total_capacity();
        if capacity == 0 {
            return 0;
        }
        (self.total_participants() as f64 / capacity as f64 * 100.0).round() as u64
    }

    /// "My events" search: title or location, optionally one status.
    pub fn search_events(&self, term: &str, status: Option<EventStatus>) -> Vec<&'a Event> {
        let term = term.to_lowercase();
        self.events
            .iter()
            .copied()
            .filter(|event| {
                contains_folded(&event.title, &term) || contains_folded(&event.location, &term)
            })
            .filter(|event| status.map_or(true, |status| event.status == status))
            .collect()
    }

    pub fn participants(&self) -> Vec<&'a Participant> {
        self.catalog
            .participants()
            .iter()
            .filter(|participant| self.owns_event(&participant.event_id))
            .collect()
    }

    pub fn recent_participants(&self, limit: usize) -> Vec<&'a Participant> {
        newest_first(self.participants(), limit)
    }

    pub fn search_participants(&self, query: &ParticipantQuery) -> Vec<&'a Participant> {
        let term = query.search.to_lowercase();
        self.participants()
            .into_iter()
            .filter(|participant| {
                contains_folded(&participant.name, &term)
                    || contains_folded(&participant.email, &term)
            })
            .filter(|participant| {
                query
                    .event_id
                    .as_ref()
                    .map_or(true, |event_id| &participant.event_id == event_id)
            })
            .filter(|participant| {
                query
                    .status
                    .map_or(true, |status| participant.status == status)
            })
            .collect()
    }

    fn owns_event(&self, event_id: &EventId) -> bool {
        self.events.iter().any(|event| &event.id == event_id)
    }
}

#[cfg(test)]
#[path = "tests/organizer_tests.rs"]
mod tests;
