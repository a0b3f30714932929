use axum::{
    routing::{get, post},
    Router,
};

use crate::{controllers::playlist_controller::PlaylistController, AppState};

pub struct PlaylistRoutes;

impl PlaylistRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route(
                "/playlists",
                post(PlaylistController::create_playlist_handler)
                    .get(PlaylistController::get_user_playlists),
            )
            .route(
                "/playlists/add-song",
                post(PlaylistController::add_song_to_playlist_handler),
            )
            .route(
                "/playlists/{playlist_id}/songs",
                get(PlaylistController::get_playlist_songs),
            )
    }
}
