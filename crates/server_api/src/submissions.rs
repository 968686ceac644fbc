//! Simulated form submissions.
//!
//! Every form (registration, login, contact, organizer application, event
//! creation) goes through the same lifecycle: the record is created in
//! `Submitting`, a [`SubmissionGateway`] delivers it, and the record settles
//! in `Success` or `Failed`. Each change is published on the server event
//! channel. Settled records are dropped once the retention window passes.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use shared::{
    domain::EventId,
    i18n::{t, Language, TextKey},
    protocol::{
        ContactRequest, EventDraft, LoginRequest, OrganizerApplicationRequest,
        RegistrationRequest, ServerEvent, SubmissionId, SubmissionKind, SubmissionRecord,
        SubmissionState,
    },
};
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_SUBMISSION_RETENTION: Duration = Duration::from_secs(600);

pub const LOGIN_REDIRECT: &str = "/admin";
pub const EVENT_CREATED_REDIRECT: &str = "/organizer/events";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("submission {0} not found")]
    NotFound(SubmissionId),
    #[error("cannot move submission from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// Checks one step of `Idle -> Submitting -> Success | Failed`.
pub fn advance(
    current: &SubmissionState,
    next: SubmissionState,
) -> Result<SubmissionState, SubmissionError> {
    let allowed = matches!(
        (current, &next),
        (SubmissionState::Idle, SubmissionState::Submitting)
            | (
                SubmissionState::Submitting,
                SubmissionState::Success { .. } | SubmissionState::Failed { .. }
            )
    );
    if allowed {
        Ok(next)
    } else {
        Err(SubmissionError::InvalidTransition {
            from: current.name(),
            to: next.name(),
        })
    }
}

#[derive(Debug, Clone)]
pub enum SubmissionPayload {
    Registration {
        event_id: EventId,
        request: RegistrationRequest,
    },
    Login(LoginRequest),
    Contact(ContactRequest),
    OrganizerApplication(OrganizerApplicationRequest),
    EventCreation(EventDraft),
}

impl SubmissionPayload {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionPayload::Registration { .. } => SubmissionKind::Registration,
            SubmissionPayload::Login(_) => SubmissionKind::Login,
            SubmissionPayload::Contact(_) => SubmissionKind::Contact,
            SubmissionPayload::OrganizerApplication(_) => SubmissionKind::OrganizerApplication,
            SubmissionPayload::EventCreation(_) => SubmissionKind::EventCreation,
        }
    }
}

/// A payload plus the language its confirmation should be written in.
#[derive(Debug, Clone)]
pub struct Submission {
    pub payload: SubmissionPayload,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub message: String,
    pub redirect_to: Option<String>,
    pub confirmation_code: Option<String>,
}

impl Receipt {
    fn into_state(self) -> SubmissionState {
        SubmissionState::Success {
            message: self.message,
            redirect_to: self.redirect_to,
            confirmation_code: self.confirmation_code,
        }
    }
}

/// Delivery step of a submission. An `Err` carries the failure reason.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn deliver(&self, submission: &Submission) -> Result<Receipt, String>;
}

/// Waits a fixed delay and always succeeds. Nothing leaves the process.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMISSION_DELAY)
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedGateway {
    async fn deliver(&self, submission: &Submission) -> Result<Receipt, String> {
        tokio::time::sleep(self.delay).await;
        Ok(simulated_receipt(submission))
    }
}

pub fn simulated_receipt(submission: &Submission) -> Receipt {
    let language = submission.language;
    let joined = |title: TextKey, body: TextKey| {
        format!("{} {}", t(title, language), t(body, language))
    };
    match &submission.payload {
        SubmissionPayload::Registration { .. } => Receipt {
            message: joined(
                TextKey::RegistrationSuccessTitle,
                TextKey::RegistrationSuccessBody,
            ),
            redirect_to: None,
            confirmation_code: Some(confirmation_code()),
        },
        SubmissionPayload::Login(_) => Receipt {
            message: t(TextKey::LoginSuccess, language).to_string(),
            redirect_to: Some(LOGIN_REDIRECT.to_string()),
            confirmation_code: None,
        },
        SubmissionPayload::Contact(_) => Receipt {
            message: joined(TextKey::ContactSuccessTitle, TextKey::ContactSuccessBody),
            redirect_to: None,
            confirmation_code: None,
        },
        SubmissionPayload::OrganizerApplication(_) => Receipt {
            message: joined(
                TextKey::ApplicationSuccessTitle,
                TextKey::ApplicationSuccessBody,
            ),
            redirect_to: None,
            confirmation_code: None,
        },
        SubmissionPayload::EventCreation(_) => Receipt {
            message: t(TextKey::EventCreatedTitle, language).to_string(),
            redirect_to: Some(EVENT_CREATED_REDIRECT.to_string()),
            confirmation_code: None,
        },
    }
}

fn confirmation_code() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    simple[..8].to_ascii_uppercase()
}

/// In-memory submission records. Clones share the same table.
#[derive(Clone)]
pub struct SubmissionTracker {
    records: Arc<RwLock<HashMap<SubmissionId, SubmissionRecord>>>,
    gateway: Arc<dyn SubmissionGateway>,
    updates: broadcast::Sender<ServerEvent>,
    retention: Duration,
}

impl SubmissionTracker {
    pub fn new(gateway: Arc<dyn SubmissionGateway>, updates: broadcast::Sender<ServerEvent>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            gateway,
            updates,
            retention: DEFAULT_SUBMISSION_RETENTION,
        }
    }

    /// How long a settled record stays readable before it is dropped.
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn simulated(delay: Duration, updates: broadcast::Sender<ServerEvent>) -> Self {
        Self::new(Arc::new(SimulatedGateway::new(delay)), updates)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.updates.subscribe()
    }

    /// Records the submission as `Submitting` and hands it to the gateway on
    /// a background task.
    pub async fn submit(&self, submission: Submission) -> Result<SubmissionRecord, SubmissionError> {
        let now = Utc::now();
        let mut record = SubmissionRecord {
            id: Uuid::new_v4(),
            kind: submission.payload.kind(),
            state: SubmissionState::Idle,
            created_at: now,
            updated_at: now,
        };
        record.state = advance(&record.state, SubmissionState::Submitting)?;

        let id = record.id;
        self.records.write().await.insert(id, record.clone());
        info!(submission_id = %id, kind = record.kind.as_str(), "submission started");
        self.publish(&record);

        let tracker = self.clone();
        tokio::spawn(async move {
            tracker.complete(id, submission).await;
        });
        Ok(record)
    }

    pub async fn get(&self, id: SubmissionId) -> Option<SubmissionRecord> {
        self.records.read().await.get(&id).cloned()
    }

    pub async fn transition(
        &self,
        id: SubmissionId,
        next: SubmissionState,
    ) -> Result<SubmissionRecord, SubmissionError> {
        let record = {
            let mut records = self.records.write().await;
            let record = records
                .get_mut(&id)
                .ok_or(SubmissionError::NotFound(id))?;
            record.state = advance(&record.state, next)?;
            record.updated_at = Utc::now();
            record.clone()
        };
        info!(
            submission_id = %id,
            kind = record.kind.as_str(),
            state = record.state.name(),
            "submission updated"
        );
        self.publish(&record);
        Ok(record)
    }

    async fn complete(&self, id: SubmissionId, submission: Submission) {
        let next = match self.gateway.deliver(&submission).await {
            Ok(receipt) => receipt.into_state(),
            Err(reason) => {
                warn!(submission_id = %id, %reason, "submission delivery failed");
                SubmissionState::Failed { reason }
            }
        };
        if let Err(err) = self.transition(id, next).await {
            warn!(submission_id = %id, error = %err, "dropping submission result");
        }

        tokio::time::sleep(self.retention).await;
        if self.records.write().await.remove(&id).is_some() {
            debug!(submission_id = %id, "submission released");
        }
    }

    fn publish(&self, record: &SubmissionRecord) {
        let _ = self.updates.send(ServerEvent::SubmissionUpdated {
            submission: record.clone(),
        });
    }
}

#[cfg(test)]
#[path = "tests/submissions_tests.rs"]
mod tests;
