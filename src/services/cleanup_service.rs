use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::task::JoinHandle;

use crate::{repositories::UserRepository, services::otp_service::OtpService};

/// Periodically clears expired passcodes. Failures are logged and the next
/// tick tries again; requests never wait on this task.
pub fn spawn_otp_sweeper(users: Arc<dyn UserRepository>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match OtpService::purge_expired(users.as_ref(), Utc::now()).await {
                Ok(0) => {}
                Ok(cleared) => tracing::info!("Cleared {} expired OTPs", cleared),
                Err(e) => tracing::warn!("OTP sweep failed: {}", e),
            }
        }
    })
}
