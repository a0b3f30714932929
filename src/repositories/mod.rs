//! Persistence seams for the OTP and playlist services.
//!
//! Services only see these traits; `main` wires in the SurrealDB
//! implementations and tests can do the same against an in-memory engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{engine::any::Any, Surreal};

use crate::{
    models::{
        playlist::{AppendOutcome, PlaylistRecord},
        song::Song,
        user::UserRecord,
    },
    Result,
};

pub mod playlist_repository;
pub mod user_repository;

pub use playlist_repository::SurrealPlaylistRepository;
pub use user_repository::SurrealUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates the user if needed and overwrites name and pending passcode.
    async fn upsert_pending_otp(
        &self,
        email: &str,
        name: &str,
        otp: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<()>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;

    /// Clears the passcode and stamps `last_login`, only if `otp` is still the
    /// stored one. Returns the updated user when the swap happened.
    async fn consume_otp(
        &self,
        email: &str,
        otp: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserRecord>>;

    /// Clears the passcode if it is still `otp`.
    async fn clear_otp(&self, email: &str, otp: &str) -> Result<()>;

    /// Clears every passcode issued before `cutoff`, returning how many.
    async fn clear_otps_issued_before(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}

#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    async fn name_exists(&self, owner_id: &str, name: &str) -> Result<bool>;

    /// Stores an empty playlist and returns its id.
    async fn insert(&self, owner_id: &str, name: &str, created_at: DateTime<Utc>)
        -> Result<String>;

    async fn find_owned(&self, owner_id: &str, playlist_id: &str)
        -> Result<Option<PlaylistRecord>>;

    /// Appends `song` in a single conditional update.
    async fn append_song_if_absent(
        &self,
        owner_id: &str,
        playlist_id: &str,
        song: Song,
    ) -> Result<AppendOutcome>;

    /// Newest first.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<PlaylistRecord>>;
}

pub async fn init_schema(db: &Surreal<Any>) -> Result<()> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS playlist_owner_name ON TABLE playlist FIELDS owner_id, name UNIQUE;
    "#,
    )
    .await?
    .check()?;

    tracing::debug!("Schema indexes ensured");

    Ok(())
}

#[cfg(test)]
pub(crate) async fn memory_db() -> anyhow::Result<Surreal<Any>> {
    let db = surrealdb::engine::any::connect("mem://").await?;
    db.use_ns("test").use_db("test").await?;
    init_schema(&db).await?;
    Ok(db)
}
