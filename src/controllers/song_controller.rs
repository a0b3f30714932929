use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::Error,
    models::song::{Song, SongQuery},
    AppState, Result,
};

const DEFAULT_QUERY: &str = "Believer";

pub struct SongController;

impl SongController {
    pub async fn search_songs(
        State(state): State<AppState>,
        Query(params): Query<SongQuery>,
    ) -> Result<Json<Vec<Song>>> {
        let query = params.query.unwrap_or_else(|| DEFAULT_QUERY.to_string());
        let query = query.trim();

        if query.is_empty() {
            return Err(Error::InvalidInput {
                reason: "No song name provided".to_string(),
            });
        }

        let songs = state.catalog.search_songs(query).await?;

        Ok(Json(songs))
    }
}
