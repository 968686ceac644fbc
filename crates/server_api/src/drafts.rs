use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::{
    error::ApiError,
    i18n::{t, Language, TextKey},
    protocol::EventDraft,
};
use url::Url;

/// Field name (as serialized in [`EventDraft`]) to localized message.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Steps of the event creation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DraftStep {
    Details,
    Schedule,
    Capacity,
    Media,
}

impl DraftStep {
    pub const ALL: [DraftStep; 4] = [
        DraftStep::Details,
        DraftStep::Schedule,
        DraftStep::Capacity,
        DraftStep::Media,
    ];

    pub fn number(self) -> u8 {
        match self {
            DraftStep::Details => 1,
            DraftStep::Schedule => 2,
            DraftStep::Capacity => 3,
            DraftStep::Media => 4,
        }
    }
}

impl TryFrom<u8> for DraftStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DraftStep::ALL
            .into_iter()
            .find(|step| step.number() == value)
            .ok_or_else(|| format!("wizard step must be between 1 and 4, got {value}"))
    }
}

impl From<DraftStep> for u8 {
    fn from(step: DraftStep) -> Self {
        step.number()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftCheckRequest {
    pub step: DraftStep,
    #[serde(default)]
    pub draft: EventDraft,
}

#[derive(Debug, Clone, Serialize)]
pub struct DraftCheck {
    pub step: DraftStep,
    pub valid: bool,
    pub errors: FieldErrors,
}

pub fn check_step(request: &DraftCheckRequest, language: Language) -> DraftCheck {
    let errors = validate_step(&request.draft, request.step, language);
    DraftCheck {
        step: request.step,
        valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_step(draft: &EventDraft, step: DraftStep, language: Language) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let mut fail = |field: &'static str, key: TextKey| {
        errors.insert(field, t(key, language).to_string());
    };

    match step {
        DraftStep::Details => {
            if is_blank(&draft.title) {
                fail("title", TextKey::TitleRequired);
            }
            if is_blank(&draft.short_description) {
                fail("shortDescription", TextKey::ShortDescriptionRequired);
            }
            if is_blank(&draft.description) {
                fail("description", TextKey::DescriptionRequired);
            }
        }
        DraftStep::Schedule => {
            if draft.start_date.is_none() {
                fail("startDate", TextKey::StartDateRequired);
            }
            if draft.end_date.is_none() {
                fail("endDate", TextKey::EndDateRequired);
            }
            if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
                if end <= start {
                    fail("endDate", TextKey::EndBeforeStart);
                }
            }
            if is_blank(&draft.location) {
                fail("location", TextKey::LocationRequired);
            }
        }
        DraftStep::Capacity => {
            if draft.capacity.map_or(true, |capacity| capacity <= 0) {
                fail("capacity", TextKey::CapacityPositive);
            }
        }
        DraftStep::Media => {
            if !is_blank(&draft.image) && !is_web_url(draft.image.trim()) {
                fail("image", TextKey::InvalidImageUrl);
            }
        }
    }
    errors
}

/// Errors of every step, as checked before the final submit.
pub fn validate_draft(draft: &EventDraft, language: Language) -> FieldErrors {
    DraftStep::ALL
        .into_iter()
        .flat_map(|step| validate_step(draft, step, language))
        .collect()
}

pub fn ensure_valid(draft: &EventDraft, language: Language) -> Result<(), ApiError> {
    let errors = validate_draft(draft, language);
    if errors.is_empty() {
        return Ok(());
    }
    let summary = errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ");
    Err(ApiError::validation(summary))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "tests/drafts_tests.rs"]
mod tests;
