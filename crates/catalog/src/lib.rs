use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{fs, path::Path, sync::Arc};

use shared::domain::{Event, EventCategory, EventId, EventStatus, Participant, Partner, User, UserId};

pub mod filter;
pub mod organizer;
pub mod stats;

pub use filter::{BrowseCriteria, EventFilter, PriceFilter, SortBy};
pub use organizer::{OrganizerView, ParticipantQuery};
pub use stats::{CatalogStats, MonthlyCount};

use filter::{contains_folded, distinct_locations};

const EVENTS_FILE: &str = "events.json";
const PARTICIPANTS_FILE: &str = "participants.json";
const USERS_FILE: &str = "users.json";
const PARTNERS_FILE: &str = "partners.json";

const BUNDLED_EVENTS: &str = include_str!("../fixtures/events.json");
const BUNDLED_PARTICIPANTS: &str = include_str!("../fixtures/participants.json");
const BUNDLED_USERS: &str = include_str!("../fixtures/users.json");
const BUNDLED_PARTNERS: &str = include_str!("../fixtures/partners.json");

/// Read-only event store. Cloning shares the underlying data.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogData>,
}

#[derive(Debug, Default)]
struct CatalogData {
    events: Vec<Event>,
    participants: Vec<Participant>,
    users: Vec<User>,
    partners: Vec<Partner>,
}

impl Catalog {
    pub fn new(
        events: Vec<Event>,
        participants: Vec<Participant>,
        users: Vec<User>,
        partners: Vec<Partner>,
    ) -> Self {
        Self {
            inner: Arc::new(CatalogData {
                events,
                participants,
                users,
                partners,
            }),
        }
    }

    /// Catalog built from the fixtures compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(
            parse_fixture(EVENTS_FILE, BUNDLED_EVENTS)?,
            parse_fixture(PARTICIPANTS_FILE, BUNDLED_PARTICIPANTS)?,
            parse_fixture(USERS_FILE, BUNDLED_USERS)?,
            parse_fixture(PARTNERS_FILE, BUNDLED_PARTNERS)?,
        ))
    }

    /// Catalog read from a directory holding the four fixture files.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        Ok(Self::new(
            read_fixture(dir, EVENTS_FILE)?,
            read_fixture(dir, PARTICIPANTS_FILE)?,
            read_fixture(dir, USERS_FILE)?,
            read_fixture(dir, PARTNERS_FILE)?,
        ))
    }

    /// Bundled fixtures unless `dir` is given.
    pub fn open(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::bundled(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.inner.events
    }

    pub fn participants(&self) -> &[Participant] {
        &self.inner.participants
    }

    pub fn users(&self) -> &[User] {
        &self.inner.users
    }

    pub fn partners(&self) -> &[Partner] {
        &self.inner.partners
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.inner.events.iter().find(|event| &event.id == id)
    }

    pub fn browse(&self, criteria: &BrowseCriteria) -> Vec<&Event> {
        criteria.apply(&self.inner.events)
    }

    pub fn locations(&self) -> Vec<&str> {
        distinct_locations(&self.inner.events)
    }

    pub fn events_in_category(&self, category: EventCategory) -> Vec<&Event> {
        self.inner
            .events
            .iter()
            .filter(|event| event.category == category)
            .collect()
    }

    pub fn featured_event(&self) -> Option<&Event> {
        self.inner.events.iter().find(|event| event.is_featured)
    }

    pub fn first_in_category(&self, category: EventCategory) -> Option<&Event> {
        self.inner
            .events
            .iter()
            .find(|event| event.category == category)
    }

    /// First `limit` upcoming events in catalog order.
    pub fn upcoming(&self, limit: usize) -> Vec<&Event> {
        self.inner
            .events
            .iter()
            .filter(|event| event.status == EventStatus::Upcoming)
            .take(limit)
            .collect()
    }

    /// Back-office search over title and location.
    pub fn search_events(&self, term: &str) -> Vec<&Event> {
        let term = term.to_lowercase();
        self.inner
            .events
            .iter()
            .filter(|event| {
                contains_folded(&event.title, &term) || contains_folded(&event.location, &term)
            })
            .collect()
    }

    /// Back-office search over name and email.
    pub fn search_users(&self, term: &str) -> Vec<&User> {
        let term = term.to_lowercase();
        self.inner
            .users
            .iter()
            .filter(|user| contains_folded(&user.name, &term) || contains_folded(&user.email, &term))
            .collect()
    }

    /// Most recent registrations first.
    pub fn recent_registrations(&self, limit: usize) -> Vec<&Participant> {
        newest_first(self.inner.participants.iter().collect(), limit)
    }

    pub fn organizer(&self, organizer_id: &UserId) -> OrganizerView<'_> {
        OrganizerView::new(self, organizer_id.clone())
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::compute(&self.inner.events, &self.inner.participants)
    }
}

pub(crate) fn newest_first(mut participants: Vec<&Participant>, limit: usize) -> Vec<&Participant> {
    participants.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
    participants.truncate(limit);
    participants
}

fn parse_fixture<T: DeserializeOwned>(name: &str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).with_context(|| format!("failed to parse fixture '{name}'"))
}

fn read_fixture<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture file '{}'", path.display()))?;
    parse_fixture(name, &raw)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
