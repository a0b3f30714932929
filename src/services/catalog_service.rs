use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    models::song::Song,
};

const AUDIO_QUALITY: &str = "320kbps";
const IMAGE_QUALITY: &str = "500x500";
const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search_songs(&self, query: &str) -> Result<Vec<Song>>;
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<SearchData>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(default)]
    results: Vec<CatalogSong>,
}

#[derive(Debug, Deserialize)]
struct CatalogSong {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "primaryArtists")]
    primary_artists: Option<String>,
    #[serde(rename = "downloadUrl", default)]
    download_url: Option<Vec<MediaVariant>>,
    #[serde(default)]
    image: Option<Vec<MediaVariant>>,
}

#[derive(Debug, Deserialize)]
struct MediaVariant {
    quality: Option<String>,
    url: Option<String>,
}

fn pick_variant(variants: Option<Vec<MediaVariant>>, quality: &str) -> Option<String> {
    variants?
        .into_iter()
        .find(|v| v.quality.as_deref() == Some(quality))
        .and_then(|v| v.url)
}

fn project_song(song: CatalogSong) -> Song {
    Song {
        id: song.id.unwrap_or_default(),
        title: song.name.unwrap_or_default(),
        mp3_url: pick_variant(song.download_url, AUDIO_QUALITY),
        thumbnail_url: pick_variant(song.image, IMAGE_QUALITY),
        artist: song
            .primary_artists
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
    }
}

fn songs_from_envelope(envelope: SearchEnvelope) -> Result<Vec<Song>> {
    if !envelope.success {
        return Err(Error::CatalogNoResults);
    }

    Ok(envelope
        .data
        .map(|data| data.results.into_iter().map(project_song).collect())
        .unwrap_or_default())
}

/// Song search against a JioSaavn-compatible API.
pub struct SaavnCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl SaavnCatalog {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Catalog for SaavnCatalog {
    async fn search_songs(&self, query: &str) -> Result<Vec<Song>> {
        let url = format!("{}/search/songs", self.base_url);

        let res = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Catalog request failed: {}", e);
                Error::CatalogError(e.to_string())
            })?;

        if !res.status().is_success() {
            tracing::warn!("Catalog responded with {}", res.status());
            return Err(Error::CatalogError(format!(
                "catalog responded with {}",
                res.status()
            )));
        }

        let envelope: SearchEnvelope = res.json().await.map_err(|e| {
            tracing::warn!("Catalog payload could not be parsed: {}", e);
            Error::CatalogError(e.to_string())
        })?;

        songs_from_envelope(envelope)
    }
}
