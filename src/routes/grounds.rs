use axum::{
    routing::{get, patch},
    Router,
};

use crate::{handlers::roster, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        // GET /api/grounds - List all grounds
        // POST /api/grounds - Create a ground, { "name": "North Field" }
        .route("/", get(roster::list_grounds).post(roster::create_ground))
        .route("/:ground_id", get(roster::get_ground))

        // Months are keyed by their label
        .route(
            "/:ground_id/months",
            get(roster::list_months).post(roster::create_month),
        )

        // Players start blank and are edited one field at a time
        .route(
            "/:ground_id/months/:month/players",
            get(roster::list_players).post(roster::create_player),
        )
        .route(
            "/:ground_id/months/:month/players/:player_id",
            patch(roster::update_player).delete(roster::delete_player),
        )
}
