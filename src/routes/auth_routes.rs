use axum::{routing::post, Router};

use crate::{controllers::auth_controller::AuthController, AppState};

pub struct AuthRoutes;

impl AuthRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/send-otp", post(AuthController::send_otp_handler))
            .route("/verify-otp", post(AuthController::verify_otp_handler))
    }
}
