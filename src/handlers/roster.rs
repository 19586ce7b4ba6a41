use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    dtos::roster_dtos::{
        CreateGroundRequest, CreateMonthRequest, CreatedResponse, UpdatePlayerRequest,
    },
    errors::Result,
    models::{Ground, Month, Player, PlayerField},
    state::AppState,
};

// GET /api/grounds
pub async fn list_grounds(State(state): State<AppState>) -> Result<Json<Vec<Ground>>> {
    let grounds = state.roster.list_grounds().await?;
    tracing::debug!("Fetched {} grounds", grounds.len());
    Ok(Json(grounds))
}

// POST /api/grounds
pub async fn create_ground(
    State(state): State<AppState>,
    Json(payload): Json<CreateGroundRequest>,
) -> Result<Json<CreatedResponse<Ground>>> {
    payload.validate()?;
    let ground = state.roster.create_ground(&payload.name).await?;
    Ok(Json(ground.into()))
}

// GET /api/grounds/:ground_id
pub async fn get_ground(
    State(state): State<AppState>,
    Path(ground_id): Path<String>,
) -> Result<Json<Ground>> {
    Ok(Json(state.roster.get_ground(&ground_id).await?))
}

// GET /api/grounds/:ground_id/months
pub async fn list_months(
    State(state): State<AppState>,
    Path(ground_id): Path<String>,
) -> Result<Json<Vec<String>>> {
    Ok(Json(state.roster.list_months(&ground_id).await?))
}

// POST /api/grounds/:ground_id/months
pub async fn create_month(
    State(state): State<AppState>,
    Path(ground_id): Path<String>,
    Json(payload): Json<CreateMonthRequest>,
) -> Result<Json<CreatedResponse<Month>>> {
    payload.validate()?;
    let month = state.roster.create_month(&ground_id, &payload.label).await?;
    Ok(Json(month.into()))
}

// GET /api/grounds/:ground_id/months/:month/players
pub async fn list_players(
    State(state): State<AppState>,
    Path((ground_id, month)): Path<(String, String)>,
) -> Result<Json<Vec<Player>>> {
    Ok(Json(state.roster.list_players(&ground_id, &month).await?))
}

// POST /api/grounds/:ground_id/months/:month/players
pub async fn create_player(
    State(state): State<AppState>,
    Path((ground_id, month)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Player>)> {
    let player = state.roster.create_player(&ground_id, &month).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

// PATCH /api/grounds/:ground_id/months/:month/players/:player_id
pub async fn update_player(
    State(state): State<AppState>,
    Path((ground_id, month, player_id)): Path<(String, String, String)>,
    Json(payload): Json<UpdatePlayerRequest>,
) -> Result<Json<Value>> {
    let field: PlayerField = payload.field.parse()?;
    let value = field.coerce(&payload.value)?;

    state
        .roster
        .update_player_field(&ground_id, &month, &player_id, &value)
        .await?;

    Ok(Json(json!({
        "success": true,
        "id": player_id,
        "update": mongodb::bson::Bson::Document(value.to_patch()).into_relaxed_extjson(),
    })))
}

// DELETE /api/grounds/:ground_id/months/:month/players/:player_id
pub async fn delete_player(
    State(state): State<AppState>,
    Path((ground_id, month, player_id)): Path<(String, String, String)>,
) -> Result<Json<Value>> {
    state
        .roster
        .delete_player(&ground_id, &month, &player_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "id": player_id,
    })))
}
