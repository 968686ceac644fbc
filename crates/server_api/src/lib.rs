use catalog::{BrowseCriteria, Catalog, EventFilter, SortBy};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Event, EventCategory, EventId, EventStatus, Participant, UserId},
    error::{ApiError, ErrorCode},
    format::{format_currency, format_date, format_date_time, DEFAULT_CURRENCY},
    i18n::{category_info, category_label, participant_status_label, status_label, t, Language, TextKey},
    protocol::{
        CategorySummary, ContactRequest, EventCard, EventDraft, LoginRequest,
        OrganizerApplicationRequest, ParticipantRow, RegistrationRequest, SubmissionId,
        SubmissionRecord,
    },
};
use std::str::FromStr;

pub mod admin;
pub mod drafts;
pub mod organizer;
pub mod submissions;

use submissions::{Submission, SubmissionPayload, SubmissionTracker};

pub const HOME_UPCOMING_LIMIT: usize = 4;
pub const HOME_DISCOVER_CATEGORIES: [EventCategory; 4] = [
    EventCategory::Music,
    EventCategory::Art,
    EventCategory::Dance,
    EventCategory::Workshop,
];

#[derive(Clone)]
pub struct ApiContext {
    pub catalog: Catalog,
    pub submissions: SubmissionTracker,
    pub organizer_id: UserId,
}

/// Listing criteria as they arrive in a query string. Multi-valued criteria
/// are comma separated; `all` and empty entries are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub sort: Option<String>,
}

impl EventsQuery {
    pub fn criteria(&self) -> Result<BrowseCriteria, ApiError> {
        let mut filter = EventFilter {
            search: self.search.clone().unwrap_or_default(),
            location: self.location.clone().unwrap_or_default(),
            ..EventFilter::default()
        };
        for category in parse_list(self.category.as_deref())? {
            filter.categories.insert(category);
        }
        for status in parse_list(self.status.as_deref())? {
            filter.statuses.insert(status);
        }
        if let Some(price) = self.price.as_deref() {
            filter.price = price.parse()?;
        }
        let sort_by = match self.sort.as_deref() {
            Some(sort) => sort.parse()?,
            None => SortBy::default(),
        };
        Ok(BrowseCriteria::new(filter, sort_by))
    }
}

fn parse_list<T>(raw: Option<&str>) -> Result<Vec<T>, ApiError>
where
    T: FromStr,
    ApiError: From<T::Err>,
{
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty() && !item.eq_ignore_ascii_case("all"))
        .map(|item| item.parse::<T>().map_err(ApiError::from))
        .collect()
}

/// `lang` query value, falling back to the configured default.
pub fn resolve_language(raw: Option<&str>, fallback: Language) -> Result<Language, ApiError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => Ok(value.parse()?),
        None => Ok(fallback),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListing {
    pub title: String,
    pub subtitle: String,
    pub sort_by: SortBy,
    pub active_filters: usize,
    pub total: usize,
    pub events: Vec<EventCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub category_label: String,
    pub status_label: String,
    pub start_label: String,
    pub end_label: String,
    pub price_label: String,
    pub remaining_seats: u32,
    pub organizer_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub category: EventCategory,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub background_image: String,
    pub total_events: usize,
    pub upcoming_count: usize,
    pub events: Vec<EventCard>,
    pub featured: Vec<EventCard>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub featured: Option<EventCard>,
    pub upcoming: Vec<EventCard>,
    pub discover: Vec<EventCard>,
}

pub fn event_card(event: &Event, language: Language) -> EventCard {
    EventCard {
        id: event.id.clone(),
        title: event.title.clone(),
        short_description: event.short_description.clone(),
        category: event.category,
        category_label: category_label(event.category).get(language).to_string(),
        status: event.status,
        status_label: status_label(event.status).get(language).to_string(),
        location: event.location.clone(),
        image: event.image.clone(),
        start_date: event.start_date,
        date_label: format_date(&event.start_date, language),
        capacity: event.capacity,
        registered_count: event.registered_count,
        price_label: price_label(event, language),
        is_featured: event.is_featured,
    }
}

pub fn event_cards<'a>(events: impl IntoIterator<Item = &'a Event>, language: Language) -> Vec<EventCard> {
    events
        .into_iter()
        .map(|event| event_card(event, language))
        .collect()
}

pub fn price_label(event: &Event, language: Language) -> String {
    if event.is_free() {
        return t(TextKey::Free, language).to_string();
    }
    let currency = event.ticket_currency.as_deref().unwrap_or(DEFAULT_CURRENCY);
    format_currency(event.effective_price(), currency, language)
}

pub fn participant_row(catalog: &Catalog, participant: &Participant, language: Language) -> ParticipantRow {
    ParticipantRow {
        participant: participant.clone(),
        status_label: participant_status_label(participant.status)
            .get(language)
            .to_string(),
        event_title: catalog
            .event(&participant.event_id)
            .map(|event| event.title.clone()),
    }
}

pub fn participant_rows<'a>(
    catalog: &Catalog,
    participants: impl IntoIterator<Item = &'a Participant>,
    language: Language,
) -> Vec<ParticipantRow> {
    participants
        .into_iter()
        .map(|participant| participant_row(catalog, participant, language))
        .collect()
}

pub fn list_events(
    ctx: &ApiContext,
    query: &EventsQuery,
    language: Language,
) -> Result<EventListing, ApiError> {
    let criteria = query.criteria()?;
    let events = event_cards(ctx.catalog.browse(&criteria), language);
    let empty_message = events
        .is_empty()
        .then(|| t(TextKey::NoEventsFound, language).to_string());
    Ok(EventListing {
        title: t(TextKey::EventsTitle, language).to_string(),
        subtitle: t(TextKey::EventsSubtitle, language).to_string(),
        sort_by: criteria.sort_by,
        active_filters: criteria.filter.active_count(),
        total: events.len(),
        events,
        empty_message,
    })
}

pub fn list_locations(ctx: &ApiContext) -> Vec<String> {
    ctx.catalog
        .locations()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn event_detail(
    ctx: &ApiContext,
    event_id: &EventId,
    language: Language,
) -> Result<EventDetail, ApiError> {
    let event = find_event(ctx, event_id)?;
    let organizer_names = event
        .organizers
        .iter()
        .filter_map(|id| ctx.catalog.users().iter().find(|user| &user.id == id))
        .map(|user| user.name.clone())
        .collect();
    Ok(EventDetail {
        category_label: category_label(event.category).get(language).to_string(),
        status_label: status_label(event.status).get(language).to_string(),
        start_label: format_date_time(&event.start_date, language),
        end_label: format_date_time(&event.end_date, language),
        price_label: price_label(event, language),
        remaining_seats: event.remaining_seats(),
        organizer_names,
        event: event.clone(),
    })
}

pub fn list_categories(ctx: &ApiContext, language: Language) -> Vec<CategorySummary> {
    EventCategory::ALL
        .iter()
        .map(|category| CategorySummary {
            category: *category,
            label: category_label(*category).get(language).to_string(),
            icon: category_info(*category).icon.to_string(),
            event_count: ctx.catalog.events_in_category(*category).len(),
        })
        .collect()
}

pub fn category_page(ctx: &ApiContext, category: EventCategory, language: Language) -> CategoryPage {
    let info = category_info(category);
    let events = ctx.catalog.events_in_category(category);
    let upcoming_count = events
        .iter()
        .filter(|event| event.status == EventStatus::Upcoming)
        .count();
    let featured = event_cards(events.iter().copied().filter(|event| event.is_featured), language);
    CategoryPage {
        category,
        title: info.title.get(language).to_string(),
        description: info.description.get(language).to_string(),
        icon: info.icon.to_string(),
        background_image: info.background_image.to_string(),
        total_events: events.len(),
        upcoming_count,
        events: event_cards(events, language),
        featured,
    }
}

pub fn home_page(ctx: &ApiContext, language: Language) -> HomePage {
    HomePage {
        featured: ctx
            .catalog
            .featured_event()
            .map(|event| event_card(event, language)),
        upcoming: event_cards(ctx.catalog.upcoming(HOME_UPCOMING_LIMIT), language),
        discover: event_cards(
            HOME_DISCOVER_CATEGORIES
                .iter()
                .filter_map(|category| ctx.catalog.first_in_category(*category)),
            language,
        ),
    }
}

pub async fn register_for_event(
    ctx: &ApiContext,
    event_id: &EventId,
    request: RegistrationRequest,
    language: Language,
) -> Result<SubmissionRecord, ApiError> {
    find_event(ctx, event_id)?;
    require(
        &[
            ("name", &request.name),
            ("email", &request.email),
            ("phone", &request.phone),
        ],
        language,
    )?;
    submit(
        ctx,
        SubmissionPayload::Registration {
            event_id: event_id.clone(),
            request,
        },
        language,
    )
    .await
}

pub async fn login(
    ctx: &ApiContext,
    request: LoginRequest,
    language: Language,
) -> Result<SubmissionRecord, ApiError> {
    require(
        &[("email", &request.email), ("password", &request.password)],
        language,
    )?;
    submit(ctx, SubmissionPayload::Login(request), language).await
}

pub async fn send_contact(
    ctx: &ApiContext,
    request: ContactRequest,
    language: Language,
) -> Result<SubmissionRecord, ApiError> {
    require(
        &[
            ("name", &request.name),
            ("email", &request.email),
            ("subject", &request.subject),
            ("message", &request.message),
        ],
        language,
    )?;
    submit(ctx, SubmissionPayload::Contact(request), language).await
}

/// Every field but `organization` is required.
pub async fn apply_as_organizer(
    ctx: &ApiContext,
    request: OrganizerApplicationRequest,
    language: Language,
) -> Result<SubmissionRecord, ApiError> {
    require(
        &[
            ("name", &request.name),
            ("email", &request.email),
            ("phone", &request.phone),
            ("experience", &request.experience),
            ("eventTypes", &request.event_types),
            ("description", &request.description),
        ],
        language,
    )?;
    submit(ctx, SubmissionPayload::OrganizerApplication(request), language).await
}

/// Runs the full wizard validation, then submits. The draft never reaches
/// the catalog.
pub async fn create_event(
    ctx: &ApiContext,
    draft: EventDraft,
    language: Language,
) -> Result<SubmissionRecord, ApiError> {
    drafts::ensure_valid(&draft, language)?;
    submit(ctx, SubmissionPayload::EventCreation(draft), language).await
}

pub async fn submission_status(ctx: &ApiContext, id: SubmissionId) -> Result<SubmissionRecord, ApiError> {
    ctx.submissions
        .get(id)
        .await
        .ok_or_else(|| ApiError::not_found("submission not found"))
}

async fn submit(
    ctx: &ApiContext,
    payload: SubmissionPayload,
    language: Language,
) -> Result<SubmissionRecord, ApiError> {
    ctx.submissions
        .submit(Submission { payload, language })
        .await
        .map_err(internal)
}

fn find_event<'a>(ctx: &'a ApiContext, event_id: &EventId) -> Result<&'a Event, ApiError> {
    ctx.catalog
        .event(event_id)
        .ok_or_else(|| ApiError::not_found(format!("event {event_id} not found")))
}

fn require(fields: &[(&str, &String)], language: Language) -> Result<(), ApiError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ApiError::validation(format!(
            "{name}: {}",
            t(TextKey::FieldRequired, language)
        ))),
        None => Ok(()),
    }
}

fn internal(err: impl std::fmt::Display) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
