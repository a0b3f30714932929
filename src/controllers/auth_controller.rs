use axum::{extract::State, Json};

use crate::{
    auth::models::{MessageResponse, SendOtpPayload, VerifyOtpPayload, VerifyOtpResponse},
    services::otp_service::OtpService,
    validators::{
        json_body::JsonBody,
        request_validator::{present, require},
    },
    AppState, Result,
};

pub struct AuthController;

impl AuthController {
    pub async fn send_otp_handler(
        State(state): State<AppState>,
        JsonBody(payload): JsonBody<SendOtpPayload>,
    ) -> Result<Json<MessageResponse>> {
        let email = require(payload.email, "Email is required")?;
        let name = present(payload.name);

        OtpService::issue(
            state.users.as_ref(),
            state.mailer.as_ref(),
            &state.app_name,
            &email,
            name.as_deref(),
        )
        .await?;

        Ok(Json(MessageResponse::new("OTP sent successfully")))
    }

    pub async fn verify_otp_handler(
        State(state): State<AppState>,
        JsonBody(payload): JsonBody<VerifyOtpPayload>,
    ) -> Result<Json<VerifyOtpResponse>> {
        let reason = "Email and OTP are required";
        let email = require(payload.email, reason)?;
        let otp = require(payload.otp, reason)?;

        let identity = OtpService::verify(state.users.as_ref(), &email, &otp).await?;

        Ok(Json(VerifyOtpResponse {
            message: "OTP verified successfully".to_string(),
            identity,
        }))
    }
}
