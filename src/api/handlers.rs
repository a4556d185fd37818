//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    BrandResponse, ChatRequest, ChatResponse, ClearResponse, ErrorResponse, PageInfo,
    PagesResponse, SearchRequest, SearchResponse, SessionCreatedResponse, SuccessResponse,
};
use super::AppState;
use crate::llm::GatewayError;
use crate::session::{run_turn, search, SessionId, SessionSnapshot, TurnOutcome};
use crate::state_machine::TransitionError;
use crate::theme::{stylesheet, ThemeSettings};
use crate::topic::Page;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the page
        .route("/", get(serve_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        .route("/theme.css", get(theme_css))
        // Presentation data
        .route("/api/brand", get(get_brand))
        .route("/api/pages", get(list_pages))
        // Session lifecycle
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/:id",
            get(get_session).delete(delete_session),
        )
        // Turn taking
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/clear", post(clear_session))
        // Single-shot search
        .route("/api/search", post(run_search))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

async fn theme_css(
    State(state): State<AppState>,
    Query(settings): Query<ThemeSettings>,
) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        stylesheet(state.brand, settings),
    )
}

async fn get_brand(State(state): State<AppState>) -> Json<BrandResponse> {
    Json(BrandResponse {
        info: state.brand.info(),
        model: state.gateway.model_id().to_string(),
    })
}

async fn list_pages() -> Json<PagesResponse> {
    let pages = Page::all()
        .into_iter()
        .map(|page| match page {
            Page::Search => PageInfo {
                name: page.name(),
                kind: "search",
                quick_guide: None,
            },
            Page::Topic(topic) => PageInfo {
                name: page.name(),
                kind: "chat",
                quick_guide: topic.quick_guide(),
            },
        })
        .collect();
    Json(PagesResponse { pages })
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreatedResponse { id }))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or(AppError::SessionNotFound(id))?;
    let snapshot = session.lock().await.snapshot();
    Ok(Json(snapshot))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SuccessResponse>, AppError> {
    if state.sessions.remove(&id).await {
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(AppError::SessionNotFound(id))
    }
}

// ============================================================
// Turn Taking
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or(AppError::SessionNotFound(id))?;

    let outcome = run_turn(session.clone(), state.gateway.clone(), req.topic, req.text).await?;

    let reply = match outcome {
        TurnOutcome::Replied(text) => Some(text),
        TurnOutcome::Ignored | TurnOutcome::Discarded => None,
        TurnOutcome::Failed(error) => return Err(AppError::Gateway(error)),
    };

    let guard = session.lock().await;
    Ok(Json(ChatResponse {
        reply,
        state: guard.state(),
        turns: guard.transcript().all().to_vec(),
    }))
}

async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<ClearResponse>, AppError> {
    let session = state
        .sessions
        .get(&id)
        .await
        .ok_or(AppError::SessionNotFound(id))?;
    session.lock().await.clear();
    tracing::info!(session = %id, "Chat cleared");
    Ok(Json(ClearResponse { ok: true }))
}

// ============================================================
// Search
// ============================================================

async fn run_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let answer = search(state.gateway.as_ref(), state.brand, &req.query)
        .await
        .map_err(AppError::Gateway)?;
    Ok(Json(SearchResponse { answer }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("officewhiz ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    SessionNotFound(SessionId),
    Busy(TransitionError),
    Gateway(GatewayError),
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        AppError::Busy(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::SessionNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(format!("Session not found: {id}")),
            ),
            AppError::Busy(e) => (StatusCode::CONFLICT, ErrorResponse::new(e.to_string())),
            AppError::Gateway(e) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    error: e.user_message().to_string(),
                    kind: Some(e.kind.as_str()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
