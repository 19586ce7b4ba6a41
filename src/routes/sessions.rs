use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::{handlers::sessions, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        // POST /api/sessions - Open a session and load the first ground/month
        .route("/", post(sessions::create_session))
        .route(
            "/:session_id",
            get(sessions::get_session).delete(sessions::delete_session),
        )

        // Selection changes cascade to the levels below
        .route("/:session_id/ground", put(sessions::select_ground))
        .route("/:session_id/month", put(sessions::select_month))

        .route("/:session_id/grounds", post(sessions::add_ground))
        .route("/:session_id/months", post(sessions::add_month))
        .route("/:session_id/players", post(sessions::add_player))
        .route(
            "/:session_id/players/:player_id",
            patch(sessions::update_player).delete(sessions::delete_player),
        )
}
