use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

pub struct HomeController;

impl HomeController {
    pub async fn index(State(state): State<AppState>) -> Json<Value> {
        Json(json!({
            "message": format!("Welcome to {} API!", state.app_name),
            "endpoints": {
                "/songs": "Search for songs (GET)",
                "/send-otp": "Send OTP to email (POST)",
                "/verify-otp": "Verify OTP (POST)",
                "/playlists": "Create a playlist (POST), Get user playlists (GET)",
                "/playlists/add-song": "Add a song to a playlist (POST)",
                "/playlists/{playlist_id}/songs": "Get songs from a playlist (GET)"
            }
        }))
    }
}
