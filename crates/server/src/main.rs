use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use catalog::{Catalog, CatalogStats};
use serde::Deserialize;
use server_api::{
    admin, drafts::{self, DraftCheck, DraftCheckRequest},
    organizer::{self, MyEventsQuery, OrganizerDashboard, ParticipantsQuery},
    resolve_language, CategoryPage, EventDetail, EventListing, EventsQuery, HomePage,
};
use shared::{
    domain::{EventCategory, EventId, User},
    error::{ApiError, ErrorCode},
    i18n::Language,
    protocol::{
        CategorySummary, ContactRequest, EventCard, EventDraft, LoginRequest,
        OrganizerApplicationRequest, ParticipantRow, RegistrationRequest, SubmissionId,
        SubmissionRecord,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

type HttpError = (StatusCode, Json<ApiError>);
type HttpResult<T> = Result<Json<T>, HttpError>;
type Accepted = Result<(StatusCode, Json<SubmissionRecord>), HttpError>;

#[derive(Debug, Default, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let catalog = Catalog::open(settings.fixtures_dir.as_deref()).map_err(|error| {
        error!(
            fixtures_dir = ?settings.fixtures_dir,
            %error,
            "failed to load event fixtures"
        );
        error
    })?;
    info!(
        events = catalog.events().len(),
        participants = catalog.participants().len(),
        "catalog loaded"
    );

    let state = AppState::new(catalog, &settings);
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = RequestBodyLimitLayer::new(state.max_body_bytes);
    Router::new()
        .route("/healthz", get(healthz))
        .route("/home", get(http_home))
        .route("/events", get(http_list_events))
        .route("/events/locations", get(http_locations))
        .route("/events/:event_id", get(http_event_detail))
        .route("/events/:event_id/registrations", post(http_register))
        .route("/categories", get(http_categories))
        .route("/categories/:category", get(http_category_page))
        .route("/login", post(http_login))
        .route("/contact", post(http_contact))
        .route("/organizer-applications", post(http_organizer_application))
        .route("/submissions/:submission_id", get(http_submission_status))
        .route("/admin/dashboard", get(http_admin_dashboard))
        .route("/admin/events", get(http_admin_events))
        .route("/admin/users", get(http_admin_users))
        .route("/admin/reports", get(http_admin_reports))
        .route("/organizer/dashboard", get(http_organizer_dashboard))
        .route("/organizer/events", get(http_organizer_events).post(http_create_event))
        .route("/organizer/events/validate", post(http_validate_draft))
        .route("/organizer/participants", get(http_organizer_participants))
        .route("/ws", get(ws_handler))
        .layer(body_limit)
        .with_state(state)
}

fn reject(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

fn language(state: &AppState, q: &LangQuery) -> Result<Language, HttpError> {
    resolve_language(q.lang.as_deref(), state.default_language).map_err(reject)
}

fn accepted(result: Result<SubmissionRecord, ApiError>) -> Accepted {
    let record = result.map_err(reject)?;
    info!(submission_id = %record.id, kind = record.kind.as_str(), "submission accepted");
    Ok((StatusCode::ACCEPTED, Json(record)))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_home(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<HomePage> {
    let language = language(&state, &lang)?;
    Ok(Json(server_api::home_page(&state.api, language)))
}

async fn http_list_events(
    State(state): State<Arc<AppState>>,
    Query(q): Query<EventsQuery>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<EventListing> {
    let language = language(&state, &lang)?;
    server_api::list_events(&state.api, &q, language)
        .map(Json)
        .map_err(reject)
}

async fn http_locations(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(server_api::list_locations(&state.api))
}

async fn http_event_detail(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<EventDetail> {
    let language = language(&state, &lang)?;
    server_api::event_detail(&state.api, &EventId::new(event_id), language)
        .map(Json)
        .map_err(reject)
}

async fn http_register(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Query(lang): Query<LangQuery>,
    Json(req): Json<RegistrationRequest>,
) -> Accepted {
    let language = language(&state, &lang)?;
    accepted(server_api::register_for_event(&state.api, &EventId::new(event_id), req, language).await)
}

async fn http_categories(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<Vec<CategorySummary>> {
    let language = language(&state, &lang)?;
    Ok(Json(server_api::list_categories(&state.api, language)))
}

/// Unknown categories send the client back to the full listing.
async fn http_category_page(
    State(state): State<Arc<AppState>>,
    Path(raw_category): Path<String>,
    Query(lang): Query<LangQuery>,
) -> Response {
    let Ok(category) = raw_category.parse::<EventCategory>() else {
        info!(category = %raw_category, "unknown category, redirecting");
        return Redirect::to("/events").into_response();
    };
    match language(&state, &lang) {
        Ok(language) => {
            let page: CategoryPage = server_api::category_page(&state.api, category, language);
            Json(page).into_response()
        }
        Err(rejection) => rejection.into_response(),
    }
}

async fn http_login(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
    Json(req): Json<LoginRequest>,
) -> Accepted {
    let language = language(&state, &lang)?;
    accepted(server_api::login(&state.api, req, language).await)
}

async fn http_contact(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
    Json(req): Json<ContactRequest>,
) -> Accepted {
    let language = language(&state, &lang)?;
    accepted(server_api::send_contact(&state.api, req, language).await)
}

async fn http_organizer_application(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
    Json(req): Json<OrganizerApplicationRequest>,
) -> Accepted {
    let language = language(&state, &lang)?;
    accepted(server_api::apply_as_organizer(&state.api, req, language).await)
}

async fn http_submission_status(
    State(state): State<Arc<AppState>>,
    Path(submission_id): Path<SubmissionId>,
) -> HttpResult<SubmissionRecord> {
    server_api::submission_status(&state.api, submission_id)
        .await
        .map(Json)
        .map_err(reject)
}

async fn http_admin_dashboard(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<admin::AdminDashboard> {
    let language = language(&state, &lang)?;
    Ok(Json(admin::dashboard(&state.api, language)))
}

async fn http_admin_events(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<Vec<EventCard>> {
    let language = language(&state, &lang)?;
    Ok(Json(admin::events(&state.api, &q.search, language)))
}

async fn http_admin_users(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> Json<Vec<User>> {
    Json(admin::users(&state.api, &q.search))
}

async fn http_admin_reports(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(admin::reports(&state.api))
}

async fn http_organizer_dashboard(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<OrganizerDashboard> {
    let language = language(&state, &lang)?;
    Ok(Json(organizer::dashboard(&state.api, language)))
}

async fn http_organizer_events(
    State(state): State<Arc<AppState>>,
    Query(q): Query<MyEventsQuery>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<Vec<EventCard>> {
    let language = language(&state, &lang)?;
    organizer::events(&state.api, &q, language)
        .map(Json)
        .map_err(reject)
}

async fn http_organizer_participants(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ParticipantsQuery>,
    Query(lang): Query<LangQuery>,
) -> HttpResult<Vec<ParticipantRow>> {
    let language = language(&state, &lang)?;
    organizer::participants(&state.api, &q, language)
        .map(Json)
        .map_err(reject)
}

async fn http_validate_draft(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
    Json(req): Json<DraftCheckRequest>,
) -> HttpResult<DraftCheck> {
    let language = language(&state, &lang)?;
    Ok(Json(drafts::check_step(&req, language)))
}

async fn http_create_event(
    State(state): State<Arc<AppState>>,
    Query(lang): Query<LangQuery>,
    Json(draft): Json<EventDraft>,
) -> Accepted {
    let language = language(&state, &lang)?;
    accepted(server_api::create_event(&state.api, draft, language).await)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

/// Pushes every submission update to the client until it disconnects.
async fn ws_connection(state: Arc<AppState>, socket: axum::extract::ws::WebSocket) {
    use axum::extract::ws::Message;
    use futures::{SinkExt, StreamExt};

    let (mut sender, mut receiver) = socket.split();
    let mut events_rx = state.events.subscribe();

    let send_task = tokio::spawn(async move {
        while let Ok(event) = events_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    send_task.abort();
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
