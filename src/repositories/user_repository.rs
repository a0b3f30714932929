use async_trait::async_trait;
use chrono::{DateTime, Utc};
use surrealdb::{engine::any::Any, sql::Datetime, Surreal};

use crate::{
    helpers::thing_helpers::{create_user_thing, new_record_key},
    models::user::UserRecord,
    repositories::UserRepository,
    Result,
};

#[derive(Clone)]
pub struct SurrealUserRepository {
    db: Surreal<Any>,
}

impl SurrealUserRepository {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }

    /// Overwrites the pending passcode of an existing user. `false` when no
    /// user has this email yet.
    async fn update_pending_otp(
        &self,
        email: &str,
        name: &str,
        otp: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<bool> {
        let updated: Vec<UserRecord> = self
            .db
            .query(
                "UPDATE user SET name = $name, otp = $otp, otp_issued_at = $issued_at \
                 WHERE email = $email RETURN AFTER",
            )
            .bind(("name", name.to_string()))
            .bind(("otp", otp.to_string()))
            .bind(("issued_at", Datetime::from(issued_at)))
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;

        Ok(!updated.is_empty())
    }
}

#[async_trait]
impl UserRepository for SurrealUserRepository {
    async fn upsert_pending_otp(
        &self,
        email: &str,
        name: &str,
        otp: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<()> {
        if self.update_pending_otp(email, name, otp, issued_at).await? {
            return Ok(());
        }

        let new_user = UserRecord {
            id: None,
            email: email.to_string(),
            name: name.to_string(),
            otp: Some(otp.to_string()),
            otp_issued_at: Some(Datetime::from(issued_at)),
            last_login: None,
        };

        let created = self
            .db
            .query("CREATE $user CONTENT $content")
            .bind(("user", create_user_thing(&new_record_key())))
            .bind(("content", new_user))
            .await
            .and_then(|response| response.check());

        match created {
            Ok(_) => {
                tracing::debug!("Created user record for {}", email);
                Ok(())
            }
            Err(err) => {
                // A concurrent issue created the user first; the unique index
                // rejected ours, so overwrite theirs instead.
                if self.update_pending_otp(email, name, otp, issued_at).await? {
                    tracing::debug!("User create for {} lost a race: {}", email, err);
                    Ok(())
                } else {
                    Err(err.into())
                }
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let user: Option<UserRecord> = self
            .db
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;

        Ok(user)
    }

    async fn consume_otp(
        &self,
        email: &str,
        otp: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UserRecord>> {
        let mut consumed: Vec<UserRecord> = self
            .db
            .query(
                "UPDATE user SET otp = NONE, otp_issued_at = NONE, last_login = $now \
                 WHERE email = $email AND otp = $otp RETURN AFTER",
            )
            .bind(("now", Datetime::from(now)))
            .bind(("email", email.to_string()))
            .bind(("otp", otp.to_string()))
            .await?
            .take(0)?;

        Ok(consumed.pop())
    }

    async fn clear_otp(&self, email: &str, otp: &str) -> Result<()> {
        self.db
            .query(
                "UPDATE user SET otp = NONE, otp_issued_at = NONE \
                 WHERE email = $email AND otp = $otp",
            )
            .bind(("email", email.to_string()))
            .bind(("otp", otp.to_string()))
            .await?
            .check()?;

        Ok(())
    }

    async fn clear_otps_issued_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let cleared: Vec<UserRecord> = self
            .db
            .query(
                "UPDATE user SET otp = NONE, otp_issued_at = NONE \
                 WHERE otp_issued_at != NONE AND otp_issued_at < $cutoff RETURN AFTER",
            )
            .bind(("cutoff", Datetime::from(cutoff)))
            .await?
            .take(0)?;

        Ok(cleared.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory_db;
    use chrono::Duration;

    async fn setup_repo() -> SurrealUserRepository {
        let db = memory_db().await.unwrap();
        SurrealUserRepository::new(db)
    }

    #[tokio::test]
    async fn test_upsert_creates_then_overwrites() {
        let repo = setup_repo().await;
        let now = Utc::now();

        repo.upsert_pending_otp("a@example.com", "Ann", "111111", now)
            .await
            .unwrap();
        repo.upsert_pending_otp("a@example.com", "Annie", "222222", now)
            .await
            .unwrap();

        let user = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(user.name, "Annie");
        assert_eq!(user.otp.as_deref(), Some("222222"));
        assert!(user.id.is_some());

        let count: Vec<UserRecord> = repo.db.select("user").await.unwrap();
        assert_eq!(count.len(), 1, "upsert must not duplicate users");
    }

    #[tokio::test]
    async fn test_concurrent_first_upserts_all_succeed() {
        let repo = setup_repo().await;

        let attempts: Vec<_> = (0..4)
            .map(|i| {
                let repo = repo.clone();
                let otp = format!("00000{i}");
                tokio::spawn(async move {
                    repo.upsert_pending_otp("race@example.com", "Racer", &otp, Utc::now())
                        .await
                })
            })
            .collect();

        for attempt in attempts {
            attempt.await.unwrap().unwrap();
        }

        let users: Vec<UserRecord> = repo.db.select("user").await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].otp.is_some());
    }

    #[tokio::test]
    async fn test_consume_requires_matching_code() {
        let repo = setup_repo().await;
        let now = Utc::now();
        repo.upsert_pending_otp("b@example.com", "Bo", "123456", now)
            .await
            .unwrap();

        let wrong = repo.consume_otp("b@example.com", "654321", now).await.unwrap();
        assert!(wrong.is_none());

        let consumed = repo
            .consume_otp("b@example.com", "123456", now)
            .await
            .unwrap()
            .unwrap();
        assert!(consumed.otp.is_none());
        assert!(consumed.otp_issued_at.is_none());
        assert!(consumed.last_login.is_some());

        let again = repo.consume_otp("b@example.com", "123456", now).await.unwrap();
        assert!(again.is_none(), "a code is consumed at most once");
    }

    #[tokio::test]
    async fn test_clear_otp_leaves_newer_code_alone() {
        let repo = setup_repo().await;
        let now = Utc::now();
        repo.upsert_pending_otp("c@example.com", "Cy", "999999", now)
            .await
            .unwrap();

        repo.clear_otp("c@example.com", "000000").await.unwrap();
        let user = repo.find_by_email("c@example.com").await.unwrap().unwrap();
        assert_eq!(user.otp.as_deref(), Some("999999"));

        repo.clear_otp("c@example.com", "999999").await.unwrap();
        let user = repo.find_by_email("c@example.com").await.unwrap().unwrap();
        assert!(user.otp.is_none());
    }

    #[tokio::test]
    async fn test_clear_otps_issued_before_cutoff() {
        let repo = setup_repo().await;
        let now = Utc::now();
        repo.upsert_pending_otp("old@example.com", "Old", "111111", now - Duration::minutes(30))
            .await
            .unwrap();
        repo.upsert_pending_otp("new@example.com", "New", "222222", now)
            .await
            .unwrap();

        let cleared = repo
            .clear_otps_issued_before(now - Duration::minutes(10))
            .await
            .unwrap();
        assert_eq!(cleared, 1);

        let old = repo.find_by_email("old@example.com").await.unwrap().unwrap();
        let new = repo.find_by_email("new@example.com").await.unwrap().unwrap();
        assert!(old.otp.is_none());
        assert_eq!(new.otp.as_deref(), Some("222222"));
    }
}
