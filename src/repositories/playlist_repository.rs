use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use surrealdb::{engine::any::Any, sql::Datetime, Surreal};

use crate::{
    helpers::thing_helpers::{create_playlist_thing, new_record_key},
    models::{
        playlist::{AppendOutcome, PlaylistRecord},
        song::Song,
    },
    repositories::PlaylistRepository,
    Result,
};

#[derive(Clone)]
pub struct SurrealPlaylistRepository {
    db: Surreal<Any>,
}

impl SurrealPlaylistRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PlaylistRepository for SurrealPlaylistRepository {
    async fn name_exists(&self, owner_id: &str, name: &str) -> Result<bool> {
        #[derive(Deserialize)]
        struct Count {
            count: u64,
        }

        let mut result: Vec<Count> = self
            .db
            .query("SELECT count() FROM playlist WHERE owner_id = $owner AND name = $name GROUP ALL")
            .bind(("owner", owner_id.to_string()))
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;

        Ok(result.pop().map(|c| c.count).unwrap_or(0) > 0)
    }

    async fn insert(
        &self,
        owner_id: &str,
        name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<String> {
        let key = new_record_key();
        let playlist = PlaylistRecord {
            id: None,
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            songs: Vec::new(),
            created_at: Datetime::from(created_at),
        };

        self.db
            .query("CREATE $playlist CONTENT $content")
            .bind(("playlist", create_playlist_thing(&key)))
            .bind(("content", playlist))
            .await?
            .check()?;

        Ok(key)
    }

    async fn find_owned(
        &self,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<Option<PlaylistRecord>> {
        let mut playlists: Vec<PlaylistRecord> = self
            .db
            .query("SELECT * FROM playlist WHERE id = $playlist AND owner_id = $owner")
            .bind(("playlist", create_playlist_thing(playlist_id)))
            .bind(("owner", owner_id.to_string()))
            .await?
            .take(0)?;

        Ok(playlists.pop())
    }

    async fn append_song_if_absent(
        &self,
        owner_id: &str,
        playlist_id: &str,
        song: Song,
    ) -> Result<AppendOutcome> {
        let song_id = song.id.clone();

        // Ownership, duplicate check and append happen in one statement.
        let updated: Vec<PlaylistRecord> = self
            .db
            .query(
                "UPDATE $playlist SET songs += $song \
                 WHERE owner_id = $owner AND $song_id NOTINSIDE songs.id RETURN AFTER",
            )
            .bind(("playlist", create_playlist_thing(playlist_id)))
            .bind(("song", song))
            .bind(("owner", owner_id.to_string()))
            .bind(("song_id", song_id))
            .await?
            .take(0)?;

        if !updated.is_empty() {
            return Ok(AppendOutcome::Appended);
        }

        match self.find_owned(owner_id, playlist_id).await? {
            None => Ok(AppendOutcome::PlaylistMissing),
            Some(_) => Ok(AppendOutcome::DuplicateSong),
        }
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<PlaylistRecord>> {
        let playlists: Vec<PlaylistRecord> = self
            .db
            .query(
                r#"
            SELECT *
            FROM playlist
            WHERE owner_id = $owner
            ORDER BY created_at DESC
        "#,
            )
            .bind(("owner", owner_id.to_string()))
            .await?
            .take(0)?;

        Ok(playlists)
    }
}
