use std::time::Duration;

use super::*;
use shared::protocol::{ServerEvent, SubmissionKind, SubmissionState};
use tokio::sync::broadcast;

const DELAY: Duration = Duration::from_millis(1500);

pub(crate) fn context() -> ApiContext {
    let (events, _) = broadcast::channel(32);
    ApiContext {
        catalog: Catalog::bundled().expect("bundled fixtures"),
        submissions: SubmissionTracker::simulated(DELAY, events),
        organizer_id: UserId::new("2"),
    }
}

fn ids(cards: &[EventCard]) -> Vec<&str> {
    cards.iter().map(|card| card.id.as_str()).collect()
}

fn query(pairs: &[(&str, &str)]) -> EventsQuery {
    let mut query = EventsQuery::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "search" => query.search = value,
            "category" => query.category = value,
            "status" => query.status = value,
            "location" => query.location = value,
            "price" => query.price = value,
            "sort" => query.sort = value,
            other => panic!("unknown key {other}"),
        }
    }
    query
}

fn registration() -> RegistrationRequest {
    RegistrationRequest {
        name: "Ada Moukala".into(),
        email: "ada@example.cg".into(),
        phone: "+242 06 123 4567".into(),
        ticket_type: "standard".into(),
    }
}

#[test]
fn listing_parses_comma_separated_criteria() {
    let ctx = context();
    let listing = list_events(
        &ctx,
        &query(&[("category", "music, art"), ("price", "paid"), ("sort", "price")]),
        Language::En,
    )
    .expect("listing");
    assert_eq!(ids(&listing.events), ["1", "8"]);
    assert_eq!(listing.total, 2);
    assert_eq!(listing.active_filters, 2);
    assert_eq!(listing.sort_by, SortBy::Price);
    assert!(listing.empty_message.is_none());
}

#[test]
fn listing_ignores_all_entries() {
    let ctx = context();
    let listing = list_events(
        &ctx,
        &query(&[("category", "all"), ("status", "all")]),
        Language::Fr,
    )
    .expect("listing");
    assert_eq!(listing.total, 9);
    assert_eq!(listing.active_filters, 0);
    assert_eq!(listing.title, "Événements Culturels");
}

#[test]
fn listing_rejects_unknown_criteria() {
    let ctx = context();
    for pairs in [
        [("sort", "alphabetical")],
        [("category", "music,cinema")],
        [("price", "cheap")],
    ] {
        let err = list_events(&ctx, &query(&pairs), Language::Fr).expect_err("should fail");
        assert_eq!(err.code, ErrorCode::Validation);
    }
}

#[test]
fn empty_listing_carries_localized_message() {
    let ctx = context();
    let listing = list_events(&ctx, &query(&[("search", "zzz")]), Language::En).expect("listing");
    assert!(listing.events.is_empty());
    assert_eq!(listing.empty_message.as_deref(), Some("No events found"));
}

#[test]
fn resolves_language_with_fallback() {
    assert_eq!(resolve_language(None, Language::Fr).expect("lang"), Language::Fr);
    assert_eq!(resolve_language(Some(" "), Language::En).expect("lang"), Language::En);
    assert_eq!(resolve_language(Some("EN"), Language::Fr).expect("lang"), Language::En);
    let err = resolve_language(Some("de"), Language::Fr).expect_err("should fail");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn cards_are_localized() {
    let ctx = context();
    let event = ctx.catalog.event(&EventId::new("1")).expect("event");
    let fr = event_card(event, Language::Fr);
    assert_eq!(fr.category_label, "Musique");
    assert_eq!(fr.status_label, "À venir");
    assert_eq!(fr.date_label, "19 juillet 2025");
    assert_eq!(fr.price_label, "5\u{202f}000\u{a0}FCFA");

    let free = ctx.catalog.event(&EventId::new("2")).expect("event");
    assert_eq!(event_card(free, Language::En).price_label, "Free");
    let zero_priced = ctx.catalog.event(&EventId::new("6")).expect("event");
    assert_eq!(event_card(zero_priced, Language::Fr).price_label, "Gratuit");
}

#[test]
fn detail_reports_seats_and_organizers() {
    let ctx = context();
    let oversold = event_detail(&ctx, &EventId::new("4"), Language::En).expect("detail");
    assert_eq!(oversold.remaining_seats, 0);
    assert_eq!(oversold.start_label, "August 5, 2025 at 09:00 AM");

    let shared_event = event_detail(&ctx, &EventId::new("5"), Language::Fr).expect("detail");
    assert_eq!(
        shared_event.organizer_names,
        ["Jean-Pierre Mabiala", "Grâce Nkounkou"]
    );
    assert_eq!(shared_event.remaining_seats, 190);
}

#[test]
fn detail_of_unknown_event_is_not_found() {
    let ctx = context();
    let err = event_detail(&ctx, &EventId::new("404"), Language::Fr).expect_err("should fail");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[test]
fn categories_count_every_event_once() {
    let ctx = context();
    let categories = list_categories(&ctx, Language::En);
    assert_eq!(categories.len(), EventCategory::ALL.len());
    assert_eq!(categories.iter().map(|c| c.event_count).sum::<usize>(), 9);
    let music = categories
        .iter()
        .find(|c| c.category == EventCategory::Music)
        .expect("music");
    assert_eq!((music.label.as_str(), music.event_count), ("Music", 2));
}

#[test]
fn category_page_collects_featured_and_upcoming() {
    let ctx = context();
    let page = category_page(&ctx, EventCategory::Music, Language::Fr);
    assert_eq!(page.title, "Événements Musicaux");
    assert_eq!(page.total_events, 2);
    assert_eq!(page.upcoming_count, 2);
    assert_eq!(ids(&page.featured), ["1", "8"]);

    let dance = category_page(&ctx, EventCategory::Dance, Language::En);
    assert_eq!(dance.upcoming_count, 0);
    assert!(dance.featured.is_empty());
}

#[test]
fn home_page_sections() {
    let ctx = context();
    let home = home_page(&ctx, Language::Fr);
    assert_eq!(home.featured.as_ref().map(|card| card.id.as_str()), Some("1"));
    assert_eq!(ids(&home.upcoming), ["1", "2", "4", "6"]);
    assert_eq!(ids(&home.discover), ["1", "2", "3", "4"]);
}

#[test]
fn locations_in_first_appearance_order() {
    let ctx = context();
    assert_eq!(
        list_locations(&ctx),
        ["Brazzaville", "Pointe-Noire", "Dolisie", "Ouesso"]
    );
}

#[tokio::test(start_paused = true)]
async fn registration_settles_after_delay() {
    let ctx = context();
    let mut updates = ctx.submissions.subscribe();

    let record = register_for_event(&ctx, &EventId::new("1"), registration(), Language::En)
        .await
        .expect("submitted");
    assert_eq!(record.kind, SubmissionKind::Registration);
    assert_eq!(record.state, SubmissionState::Submitting);

    tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
    let pending = submission_status(&ctx, record.id).await.expect("status");
    assert_eq!(pending.state, SubmissionState::Submitting);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let settled = submission_status(&ctx, record.id).await.expect("status");
    match settled.state {
        SubmissionState::Success {
            message,
            confirmation_code,
            redirect_to,
        } => {
            assert!(message.starts_with("Registration Successful!"));
            assert_eq!(confirmation_code.map(|code| code.len()), Some(8));
            assert!(redirect_to.is_none());
        }
        other => panic!("expected success, got {other:?}"),
    }

    let mut states = Vec::new();
    while let Ok(ServerEvent::SubmissionUpdated { submission }) = updates.try_recv() {
        states.push(submission.state.name());
    }
    assert_eq!(states, ["submitting", "success"]);
}

#[tokio::test]
async fn registration_requires_known_event_and_fields() {
    let ctx = context();
    let err = register_for_event(&ctx, &EventId::new("99"), registration(), Language::Fr)
        .await
        .expect_err("unknown event");
    assert_eq!(err.code, ErrorCode::NotFound);

    let mut incomplete = registration();
    incomplete.phone = "  ".into();
    let err = register_for_event(&ctx, &EventId::new("1"), incomplete, Language::Fr)
        .await
        .expect_err("missing phone");
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(err.message, "phone: Ce champ est requis");
}

#[tokio::test(start_paused = true)]
async fn login_redirects_to_admin() {
    let ctx = context();
    let record = login(
        &ctx,
        LoginRequest {
            email: "admin@culturecongo.org".into(),
            password: "secret".into(),
        },
        Language::Fr,
    )
    .await
    .expect("submitted");
    tokio::time::sleep(DELAY * 2).await;
    let settled = submission_status(&ctx, record.id).await.expect("status");
    assert!(matches!(
        settled.state,
        SubmissionState::Success { redirect_to: Some(ref target), .. } if target == "/admin"
    ));
}

#[tokio::test]
async fn contact_and_application_require_fields() {
    let ctx = context();
    let err = send_contact(
        &ctx,
        ContactRequest {
            name: "Ada".into(),
            email: "ada@example.cg".into(),
            subject: String::new(),
            message: "Bonjour".into(),
        },
        Language::En,
    )
    .await
    .expect_err("missing subject");
    assert_eq!(err.message, "subject: This field is required");

    let err = apply_as_organizer(
        &ctx,
        OrganizerApplicationRequest {
            name: String::new(),
            email: "ada@example.cg".into(),
            phone: "+242".into(),
            organization: String::new(),
            experience: String::new(),
            event_types: String::new(),
            description: String::new(),
        },
        Language::En,
    )
    .await
    .expect_err("missing name");
    assert_eq!(err.code, ErrorCode::Validation);
}

fn application() -> OrganizerApplicationRequest {
    OrganizerApplicationRequest {
        name: "Ada".into(),
        email: "ada@example.cg".into(),
        phone: "+242 06 000 0000".into(),
        organization: String::new(),
        experience: "3-5".into(),
        event_types: "Concerts".into(),
        description: "Festival de quartier".into(),
    }
}

#[tokio::test]
async fn application_requires_everything_but_organization() {
    let ctx = context();
    for (field, blank) in [
        ("experience", OrganizerApplicationRequest { experience: " ".into(), ..application() }),
        ("eventTypes", OrganizerApplicationRequest { event_types: String::new(), ..application() }),
        ("description", OrganizerApplicationRequest { description: String::new(), ..application() }),
    ] {
        let err = apply_as_organizer(&ctx, blank, Language::En)
            .await
            .expect_err("blank field");
        assert_eq!(err.message, format!("{field}: This field is required"));
    }

    let record = apply_as_organizer(&ctx, application(), Language::En)
        .await
        .expect("organization is optional");
    assert_eq!(record.kind, SubmissionKind::OrganizerApplication);
}

#[tokio::test(start_paused = true)]
async fn event_creation_never_touches_catalog() {
    let ctx = context();
    let err = create_event(&ctx, EventDraft::default(), Language::En)
        .await
        .expect_err("empty draft");
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(err.message.contains("title: Title is required"));

    let draft: EventDraft = serde_json::from_value(serde_json::json!({
        "title": "Nuit du Slam",
        "shortDescription": "Poésie urbaine",
        "description": "Une soirée de slam à Brazzaville.",
        "startDate": "2025-12-01T19:00:00Z",
        "endDate": "2025-12-01T23:00:00Z",
        "location": "Brazzaville",
        "capacity": 120
    }))
    .expect("draft");
    let record = create_event(&ctx, draft, Language::En).await.expect("submitted");
    tokio::time::sleep(DELAY * 2).await;
    let settled = submission_status(&ctx, record.id).await.expect("status");
    assert!(matches!(
        settled.state,
        SubmissionState::Success { redirect_to: Some(ref target), .. } if target == "/organizer/events"
    ));
    assert_eq!(ctx.catalog.events().len(), 9);
}

#[tokio::test]
async fn unknown_submission_is_not_found() {
    let ctx = context();
    let err = submission_status(&ctx, uuid::Uuid::new_v4())
        .await
        .expect_err("should fail");
    assert_eq!(err.code, ErrorCode::NotFound);
}
