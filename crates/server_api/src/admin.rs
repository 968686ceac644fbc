use catalog::CatalogStats;
use serde::Serialize;
use shared::{
    domain::User,
    i18n::Language,
    protocol::{EventCard, ParticipantRow},
};

use crate::{event_cards, participant_rows, ApiContext};

pub const DASHBOARD_UPCOMING_LIMIT: usize = 5;
pub const DASHBOARD_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub stats: CatalogStats,
    pub upcoming: Vec<EventCard>,
    pub recent_registrations: Vec<ParticipantRow>,
}

pub fn dashboard(ctx: &ApiContext, language: Language) -> AdminDashboard {
    AdminDashboard {
        stats: ctx.catalog.stats(),
        upcoming: event_cards(ctx.catalog.upcoming(DASHBOARD_UPCOMING_LIMIT), language),
        recent_registrations: participant_rows(
            &ctx.catalog,
            ctx.catalog.recent_registrations(DASHBOARD_RECENT_LIMIT),
            language,
        ),
    }
}

pub fn events(ctx: &ApiContext, search: &str, language: Language) -> Vec<EventCard> {
    event_cards(ctx.catalog.search_events(search), language)
}

pub fn users(ctx: &ApiContext, search: &str) -> Vec<User> {
    ctx.catalog
        .search_users(search)
        .into_iter()
        .cloned()
        .collect()
}

pub fn reports(ctx: &ApiContext) -> CatalogStats {
    ctx.catalog.stats()
}

#[cfg(test)]
#[path = "tests/admin_tests.rs"]
mod tests;
