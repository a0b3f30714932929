use axum::{routing::get, Router};

use crate::{controllers::song_controller::SongController, AppState};

pub struct SongRoutes;

impl SongRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new().route("/songs", get(SongController::search_songs))
    }
}
