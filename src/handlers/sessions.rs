use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::roster_dtos::{
        CreateGroundRequest, CreateMonthRequest, SelectGroundRequest, SelectMonthRequest,
        SessionResponse, UpdatePlayerRequest,
    },
    errors::Result,
    models::PlayerField,
    services::{Notice, RosterSession},
    state::AppState,
};

fn respond(
    session_id: Uuid,
    session: &RosterSession,
    notice: Option<Notice>,
) -> Json<SessionResponse> {
    if let Some(notice) = notice {
        tracing::info!("Session {}: {}", session_id, notice.message());
    }
    Json(SessionResponse {
        session_id,
        view: session.view().clone(),
        notice,
    })
}

// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    let mut session = state.new_session();
    session.load().await?;

    let (session_id, shared) = state.sessions.insert(session).await;
    tracing::info!("Opened session {}", session_id);

    let session = shared.lock().await;
    Ok((StatusCode::CREATED, respond(session_id, &session, None)))
}

// GET /api/sessions/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let shared = state.sessions.get(session_id).await?;
    let session = shared.lock().await;
    Ok(respond(session_id, &session, None))
}

// DELETE /api/sessions/:session_id
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.sessions.remove(session_id).await?;
    tracing::info!("Closed session {}", session_id);
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/sessions/:session_id/grounds
pub async fn add_ground(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CreateGroundRequest>,
) -> Result<Json<SessionResponse>> {
    payload.validate()?;
    let shared = state.sessions.get(session_id).await?;
    let mut session = shared.lock().await;
    let notice = session.add_ground(&payload.name).await?;
    Ok(respond(session_id, &session, notice))
}

// PUT /api/sessions/:session_id/ground
pub async fn select_ground(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SelectGroundRequest>,
) -> Result<Json<SessionResponse>> {
    let shared = state.sessions.get(session_id).await?;
    let mut session = shared.lock().await;
    session.select_ground(&payload.ground_id).await?;
    Ok(respond(session_id, &session, None))
}

// POST /api/sessions/:session_id/months
pub async fn add_month(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CreateMonthRequest>,
) -> Result<Json<SessionResponse>> {
    payload.validate()?;
    let shared = state.sessions.get(session_id).await?;
    let mut session = shared.lock().await;
    let notice = session.add_month(&payload.label).await?;
    Ok(respond(session_id, &session, notice))
}

// PUT /api/sessions/:session_id/month
pub async fn select_month(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SelectMonthRequest>,
) -> Result<Json<SessionResponse>> {
    let shared = state.sessions.get(session_id).await?;
    let mut session = shared.lock().await;
    session.select_month(&payload.label).await?;
    Ok(respond(session_id, &session, None))
}

// POST /api/sessions/:session_id/players
pub async fn add_player(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    let shared = state.sessions.get(session_id).await?;
    let mut session = shared.lock().await;
    let notice = session.add_player().await?;
    Ok(respond(session_id, &session, Some(notice)))
}

// PATCH /api/sessions/:session_id/players/:player_id
pub async fn update_player(
    State(state): State<AppState>,
    Path((session_id, player_id)): Path<(Uuid, String)>,
    Json(payload): Json<UpdatePlayerRequest>,
) -> Result<Json<SessionResponse>> {
    let field: PlayerField = payload.field.parse()?;
    let shared = state.sessions.get(session_id).await?;
    let mut session = shared.lock().await;
    session
        .update_player(&player_id, field, &payload.value)
        .await?;
    Ok(respond(session_id, &session, None))
}

// DELETE /api/sessions/:session_id/players/:player_id
pub async fn delete_player(
    State(state): State<AppState>,
    Path((session_id, player_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionResponse>> {
    let shared = state.sessions.get(session_id).await?;
    let mut session = shared.lock().await;
    let notice = session.delete_player(&player_id).await?;
    Ok(respond(session_id, &session, Some(notice)))
}
