use chrono::{DateTime, Utc};

use crate::{
    auth::otp::{generate_otp, is_expired, is_valid_email, otp_ttl},
    error::{Error, Result},
    helpers::thing_helpers::thing_key,
    models::user::VerifiedIdentity,
    repositories::UserRepository,
    services::mail_service::{EmailMessage, Mailer},
};

const DEFAULT_USER_NAME: &str = "User";

pub struct OtpService;

impl OtpService {
    /// Stores a fresh passcode for `email` and mails it out.
    ///
    /// If delivery fails the stored passcode is cleared again, so a code the
    /// user never received cannot be redeemed later.
    pub async fn issue(
        users: &dyn UserRepository,
        mailer: &dyn Mailer,
        app_name: &str,
        email: &str,
        name: Option<&str>,
    ) -> Result<()> {
        if email.trim().is_empty() {
            return Err(Error::InvalidInput {
                reason: "Email is required".to_string(),
            });
        }

        if !is_valid_email(email) {
            return Err(Error::InvalidEmail);
        }

        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_USER_NAME);
        let otp = generate_otp();

        users
            .upsert_pending_otp(email, name, &otp, Utc::now())
            .await?;

        let message = EmailMessage::otp(app_name, email, name, &otp);
        if let Err(err) = mailer.send(&message).await {
            tracing::warn!("OTP delivery to {} failed: {}", email, err);

            if let Err(rollback_err) = users.clear_otp(email, &otp).await {
                tracing::error!(
                    "Could not roll back undelivered OTP for {}: {}",
                    email,
                    rollback_err
                );
            }

            return Err(err);
        }

        tracing::info!("OTP issued for {}", email);

        Ok(())
    }

    /// Redeems `otp` for `email`. Every failure is the same `InvalidOtp`.
    pub async fn verify(
        users: &dyn UserRepository,
        email: &str,
        otp: &str,
    ) -> Result<VerifiedIdentity> {
        if email.is_empty() || otp.is_empty() {
            return Err(Error::InvalidInput {
                reason: "Email and OTP are required".to_string(),
            });
        }

        let now = Utc::now();
        let user = users.find_by_email(email).await?.ok_or(Error::InvalidOtp)?;

        let live = match (&user.otp, &user.otp_issued_at) {
            (Some(stored), Some(issued_at)) => stored == otp && !is_expired(issued_at.0, now),
            _ => false,
        };

        if !live {
            tracing::debug!("Rejected OTP for {}", email);
            return Err(Error::InvalidOtp);
        }

        // Lost a race with a concurrent verify or a re-issue.
        let consumed = users
            .consume_otp(email, otp, now)
            .await?
            .ok_or(Error::InvalidOtp)?;

        let user_id = consumed
            .id
            .as_ref()
            .map(thing_key)
            .ok_or_else(|| Error::DbError(format!("user {email} has no id")))?;

        tracing::info!("OTP verified for user {}", user_id);

        Ok(VerifiedIdentity {
            user_id,
            user_name: consumed.name,
        })
    }

    /// Clears passcodes older than the TTL. Verification already ignores them;
    /// this just keeps stale codes out of the store.
    pub async fn purge_expired(users: &dyn UserRepository, now: DateTime<Utc>) -> Result<usize> {
        users.clear_otps_issued_before(now - otp_ttl()).await
    }
}
