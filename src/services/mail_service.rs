use async_trait::async_trait;
use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EmailMessage {
    pub receiver_email: String,
    pub subject: String,
    pub message: String,
}

impl EmailMessage {
    pub fn otp(app_name: &str, email: &str, name: &str, otp: &str) -> Self {
        Self {
            receiver_email: email.to_string(),
            subject: format!("Your OTP for {app_name}"),
            message: format!(
                "Hi {name},\n\nYour OTP for {app_name} is: {otp}\nThis OTP will expire in 10 minutes."
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &EmailMessage) -> Result<()>;
}

/// Posts messages as JSON to an email-sending HTTP API.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
}

impl HttpMailer {
    pub fn new(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &EmailMessage) -> Result<()> {
        let res = self
            .client
            .post(&self.api_url)
            .json(email)
            .send()
            .await
            .map_err(|e| Error::OtpDeliveryFailed {
                reason: format!("email API unreachable: {e}"),
            })?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(Error::OtpDeliveryFailed {
                reason: format!("email API responded with {}", res.status()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_message_contents() {
        let email = EmailMessage::otp("JStream", "user@example.com", "Sam", "483920");

        assert_eq!(email.receiver_email, "user@example.com");
        assert_eq!(email.subject, "Your OTP for JStream");
        assert!(email.message.starts_with("Hi Sam,"));
        assert!(email.message.contains("is: 483920"));
        assert!(email.message.contains("expire in 10 minutes"));
    }

    #[test]
    fn test_payload_field_names() {
        let email = EmailMessage::otp("JStream", "user@example.com", "Sam", "000001");
        let json = serde_json::to_value(&email).unwrap();

        assert_eq!(json["receiver_email"], "user@example.com");
        assert!(json.get("subject").is_some());
        assert!(json.get("message").is_some());
    }
}
