use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

use crate::{helpers::thing_helpers::thing_key, models::song::Song, Error, Result};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaylistRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,

    pub owner_id: String,
    pub name: String,
    #[serde(default)]
    pub songs: Vec<Song>,
    pub created_at: Datetime,
}

impl PlaylistRecord {
    pub fn into_summary(self) -> Result<PlaylistSummary> {
        let id = self
            .id
            .as_ref()
            .map(thing_key)
            .ok_or_else(|| Error::DbError(format!("playlist '{}' has no id", self.name)))?;

        Ok(PlaylistSummary {
            id,
            name: self.name,
            songs: self.songs,
            created_at: self.created_at.0,
        })
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub songs: Vec<Song>,
    pub created_at: DateTime<Utc>,
}

/// Result of the conditional append used by `add_song`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    PlaylistMissing,
    DuplicateSong,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSongRequest {
    pub user_id: Option<String>,
    pub playlist_id: Option<String>,
    pub song_id: Option<String>,
    pub song: Option<Song>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistCreatedResponse {
    pub message: String,
    pub playlist_id: String,
}
