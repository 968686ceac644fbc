//! Back-office views scoped to the configured organizer.

use catalog::ParticipantQuery;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{EventId, EventStatus, UserId},
    error::ApiError,
    format::{format_currency, DEFAULT_CURRENCY},
    i18n::Language,
    protocol::{EventCard, ParticipantRow},
};

use crate::{event_cards, participant_rows, ApiContext};

pub const RECENT_PARTICIPANTS_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerDashboard {
    pub organizer_id: UserId,
    pub organizer_name: Option<String>,
    pub event_count: usize,
    pub total_participants: u64,
    pub total_revenue: u64,
    pub revenue_label: String,
    pub fill_rate_percent: u64,
    pub upcoming: Vec<EventCard>,
    pub ongoing: Vec<EventCard>,
    pub recent_participants: Vec<ParticipantRow>,
}

/// `status` is `all` or an event status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MyEventsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// `event` is `all` or an event id, `status` is `all` or a participant status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParticipantsQuery {
    pub search: Option<String>,
    pub event: Option<String>,
    pub status: Option<String>,
}

impl ParticipantsQuery {
    pub fn to_query(&self) -> Result<ParticipantQuery, ApiError> {
        Ok(ParticipantQuery {
            search: self.search.clone().unwrap_or_default(),
            event_id: selection(self.event.as_deref()).map(EventId::new),
            status: selection(self.status.as_deref())
                .map(str::parse)
                .transpose()?,
        })
    }
}

fn selection(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
}

pub fn dashboard(ctx: &ApiContext, language: Language) -> OrganizerDashboard {
    let view = ctx.catalog.organizer(&ctx.organizer_id);
    let total_revenue = view.total_revenue();
    OrganizerDashboard {
        organizer_id: ctx.organizer_id.clone(),
        organizer_name: ctx
            .catalog
            .users()
            .iter()
            .find(|user| user.id == ctx.organizer_id)
            .map(|user| user.name.clone()),
        event_count: view.events().len(),
        total_participants: view.total_participants(),
        total_revenue,
        revenue_label: format_currency(total_revenue, DEFAULT_CURRENCY, language),
        fill_rate_percent: view.fill_rate_percent(),
        upcoming: event_cards(view.events_with_status(EventStatus::Upcoming), language),
        ongoing: event_cards(view.events_with_status(EventStatus::Ongoing), language),
        recent_participants: participant_rows(
            &ctx.catalog,
            view.recent_participants(RECENT_PARTICIPANTS_LIMIT),
            language,
        ),
    }
}

pub fn events(
    ctx: &ApiContext,
    query: &MyEventsQuery,
    language: Language,
) -> Result<Vec<EventCard>, ApiError> {
    let status: Option<EventStatus> = selection(query.status.as_deref())
        .map(str::parse)
        .transpose()?;
    let view = ctx.catalog.organizer(&ctx.organizer_id);
    let search = query.search.as_deref().unwrap_or_default();
    Ok(event_cards(view.search_events(search, status), language))
}

pub fn participants(
    ctx: &ApiContext,
    query: &ParticipantsQuery,
    language: Language,
) -> Result<Vec<ParticipantRow>, ApiError> {
    let query = query.to_query()?;
    let view = ctx.catalog.organizer(&ctx.organizer_id);
    Ok(participant_rows(
        &ctx.catalog,
        view.search_participants(&query),
        language,
    ))
}

#[cfg(test)]
#[path = "tests/organizer_tests.rs"]
mod tests;
