use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{EventCategory, EventId, EventStatus, Participant};

pub type SubmissionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Registration,
    Login,
    Contact,
    OrganizerApplication,
    EventCreation,
}

impl SubmissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::Registration => "registration",
            SubmissionKind::Login => "login",
            SubmissionKind::Contact => "contact",
            SubmissionKind::OrganizerApplication => "organizer_application",
            SubmissionKind::EventCreation => "event_creation",
        }
    }
}

/// Lifecycle of one simulated form submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        redirect_to: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        confirmation_code: Option<String>,
    },
    Failed {
        reason: String,
    },
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success { .. } => "success",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub kind: SubmissionKind,
    pub state: SubmissionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default = "default_ticket_type")]
    pub ticket_type: String,
}

fn default_ticket_type() -> String {
    "standard".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerApplicationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub event_types: String,
    #[serde(default)]
    pub description: String,
}

/// Event-creation wizard payload. Fields stay as entered so that each step
/// can report what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub category: Option<EventCategory>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: String,
    pub capacity: Option<i64>,
    pub ticket_price: Option<u64>,
    pub ticket_currency: Option<String>,
    pub image: String,
    pub is_featured: bool,
    pub is_published: bool,
}

/// Localized, display-ready projection of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCard {
    pub id: EventId,
    pub title: String,
    pub short_description: String,
    pub category: EventCategory,
    pub category_label: String,
    pub status: EventStatus,
    pub status_label: String,
    pub location: String,
    pub image: String,
    pub start_date: DateTime<Utc>,
    pub date_label: String,
    pub capacity: u32,
    pub registered_count: u32,
    pub price_label: String,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    #[serde(flatten)]
    pub participant: Participant,
    pub status_label: String,
    pub event_title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: EventCategory,
    pub label: String,
    pub icon: String,
    pub event_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    SubmissionUpdated { submission: SubmissionRecord },
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
