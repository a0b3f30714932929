use serde::{Deserialize, Serialize};

use crate::models::user::VerifiedIdentity;

#[derive(Debug, Deserialize)]
pub struct SendOtpPayload {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpPayload {
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    #[serde(flatten)]
    pub identity: VerifiedIdentity,
}
