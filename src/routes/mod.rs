use axum::{routing::get, Router};

use crate::{controllers::home_controller::HomeController, AppState};

pub mod auth_routes;
pub mod playlist_routes;
pub mod song_routes;

use auth_routes::AuthRoutes;
use playlist_routes::PlaylistRoutes;
use song_routes::SongRoutes;

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(HomeController::index))
        .merge(SongRoutes::routes())
        .merge(AuthRoutes::routes())
        .merge(PlaylistRoutes::routes())
        .with_state(state)
}
