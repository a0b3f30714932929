use serde::{Deserialize, Deserializer, Serialize};

/// Song as returned by the catalog and embedded verbatim in playlists.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Song {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub mp3_url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
pub struct SongQuery {
    pub query: Option<String>,
}
