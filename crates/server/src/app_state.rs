use std::time::Duration;

use catalog::Catalog;
use server_api::{submissions::SubmissionTracker, ApiContext};
use shared::{domain::UserId, i18n::Language, protocol::ServerEvent};
use tokio::sync::broadcast;

use crate::config::Settings;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) events: broadcast::Sender<ServerEvent>,
    pub(crate) default_language: Language,
    pub(crate) max_body_bytes: usize,
}

impl AppState {
    pub(crate) fn new(catalog: Catalog, settings: &Settings) -> Self {
        let (events, _) = broadcast::channel(256);
        let submissions = SubmissionTracker::simulated(
            Duration::from_millis(settings.submission_delay_ms),
            events.clone(),
        )
        .with_retention(Duration::from_secs(settings.submission_retention_secs));
        Self {
            api: ApiContext {
                catalog,
                submissions,
                organizer_id: UserId::new(settings.organizer_id.clone()),
            },
            events,
            default_language: settings.default_language,
            max_body_bytes: settings.max_body_bytes,
        }
    }
}
