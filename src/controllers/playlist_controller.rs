use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    auth::models::MessageResponse,
    models::{
        playlist::{
            AddSongRequest, CreatePlaylistRequest, OwnerQuery, PlaylistCreatedResponse,
            PlaylistSummary,
        },
        song::Song,
    },
    services::playlist_service::PlaylistService,
    validators::{
        json_body::JsonBody,
        request_validator::{present, require},
    },
    AppState, Error, Result,
};

pub struct PlaylistController;

impl PlaylistController {
    pub async fn create_playlist_handler(
        State(state): State<AppState>,
        JsonBody(payload): JsonBody<CreatePlaylistRequest>,
    ) -> Result<Json<PlaylistCreatedResponse>> {
        let reason = "User ID and playlist name are required";
        let user_id = require(payload.user_id, reason)?;
        let name = require(payload.name, reason)?;

        let playlist_id =
            PlaylistService::create_playlist(state.playlists.as_ref(), &user_id, &name).await?;

        Ok(Json(PlaylistCreatedResponse {
            message: "Playlist created successfully".to_string(),
            playlist_id,
        }))
    }

    pub async fn add_song_to_playlist_handler(
        State(state): State<AppState>,
        JsonBody(payload): JsonBody<AddSongRequest>,
    ) -> Result<Json<MessageResponse>> {
        let reason = "User ID, playlist ID, and song ID are required";
        let user_id = require(payload.user_id, reason)?;
        let playlist_id = require(payload.playlist_id, reason)?;
        let song_id = require(payload.song_id, reason)?;

        let mut song = payload.song.ok_or_else(|| Error::InvalidInput {
            reason: "Song data is required".to_string(),
        })?;

        match present(Some(song.id.clone())) {
            None => song.id = song_id,
            Some(id) if id == song_id => {}
            Some(_) => {
                return Err(Error::InvalidInput {
                    reason: "Song ID does not match song data".to_string(),
                })
            }
        }

        PlaylistService::add_song_to_playlist(state.playlists.as_ref(), &user_id, &playlist_id, song)
            .await?;

        Ok(Json(MessageResponse::new("Song added to playlist successfully")))
    }

    pub async fn get_user_playlists(
        State(state): State<AppState>,
        Query(params): Query<OwnerQuery>,
    ) -> Result<Json<Vec<PlaylistSummary>>> {
        let user_id = require(params.user_id, "User ID is required")?;

        let playlists = PlaylistService::get_user_playlists(state.playlists.as_ref(), &user_id).await?;

        Ok(Json(playlists))
    }

    pub async fn get_playlist_songs(
        State(state): State<AppState>,
        Path(playlist_id): Path<String>,
        Query(params): Query<OwnerQuery>,
    ) -> Result<Json<Vec<Song>>> {
        let user_id = require(params.user_id, "User ID is required")?;

        let songs =
            PlaylistService::get_playlist_songs(state.playlists.as_ref(), &user_id, &playlist_id)
                .await?;

        Ok(Json(songs))
    }
}
