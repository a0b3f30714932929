use chrono::Utc;

use crate::{
    error::{Error, Result},
    models::{
        playlist::{AppendOutcome, PlaylistSummary},
        song::Song,
    },
    repositories::PlaylistRepository,
};

pub struct PlaylistService;

impl PlaylistService {
    /// Creates an empty playlist. Names are unique per owner.
    pub async fn create_playlist(
        playlists: &dyn PlaylistRepository,
        owner_id: &str,
        name: &str,
    ) -> Result<String> {
        if owner_id.trim().is_empty() || name.trim().is_empty() {
            return Err(Error::InvalidInput {
                reason: "User ID and playlist name are required".to_string(),
            });
        }

        let duplicate = || Error::PlaylistAlreadyExists {
            name: name.to_string(),
        };

        if playlists.name_exists(owner_id, name).await? {
            return Err(duplicate());
        }

        let err = match playlists.insert(owner_id, name, Utc::now()).await {
            Ok(playlist_id) => {
                tracing::info!("Playlist {} created for {}", playlist_id, owner_id);
                return Ok(playlist_id);
            }
            Err(err) => err,
        };

        // A concurrent create won the unique index.
        if playlists.name_exists(owner_id, name).await? {
            tracing::debug!("Playlist insert lost a race: {}", err);
            return Err(duplicate());
        }

        Err(err)
    }

    pub async fn add_song_to_playlist(
        playlists: &dyn PlaylistRepository,
        owner_id: &str,
        playlist_id: &str,
        song: Song,
    ) -> Result<()> {
        if owner_id.trim().is_empty() || playlist_id.trim().is_empty() || song.id.is_empty() {
            return Err(Error::InvalidInput {
                reason: "User ID, playlist ID, and song ID are required".to_string(),
            });
        }

        let song_id = song.id.clone();

        match playlists
            .append_song_if_absent(owner_id, playlist_id, song)
            .await?
        {
            AppendOutcome::Appended => {
                tracing::info!("Song {} added to playlist {}", song_id, playlist_id);
                Ok(())
            }
            AppendOutcome::PlaylistMissing => Err(Error::PlaylistNotFound {
                id: playlist_id.to_string(),
            }),
            AppendOutcome::DuplicateSong => Err(Error::SongAlreadyExistsInPlaylist {
                song_id,
                playlist_id: playlist_id.to_string(),
            }),
        }
    }

    /// Newest playlists first.
    pub async fn get_user_playlists(
        playlists: &dyn PlaylistRepository,
        owner_id: &str,
    ) -> Result<Vec<PlaylistSummary>> {
        playlists
            .list_by_owner(owner_id)
            .await?
            .into_iter()
            .map(|record| record.into_summary())
            .collect()
    }

    pub async fn get_playlist_songs(
        playlists: &dyn PlaylistRepository,
        owner_id: &str,
        playlist_id: &str,
    ) -> Result<Vec<Song>> {
        playlists
            .find_owned(owner_id, playlist_id)
            .await?
            .map(|playlist| playlist.songs)
            .ok_or_else(|| Error::PlaylistNotFound {
                id: playlist_id.to_string(),
            })
    }
}
