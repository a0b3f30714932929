use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, Serialize, strum_macros::AsRefStr)]
#[serde(tag = "type", content = "data")]
pub enum Error {
    // -- Request errors.
    InvalidInput { reason: String },
    InvalidEmail,

    // -- Otp errors.
    InvalidOtp,
    OtpDeliveryFailed { reason: String },

    // -- Playlist errors.
    PlaylistAlreadyExists { name: String },
    PlaylistNotFound { id: String },
    SongAlreadyExistsInPlaylist { song_id: String, playlist_id: String },

    // -- Catalog errors.
    CatalogError(String),
    CatalogNoResults,

    // -- Infrastructure errors.
    DbError(String),
    EnvVarError(String),
    Io(String),
}

impl core::fmt::Display for Error {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, client_error) = self.client_status_and_error();

        if status_code.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let response_body = serde_json::json!({
            "error": self.client_message(),
            "code": client_error.as_ref(),
        });

        (status_code, Json(response_body)).into_response()
    }
}

impl Error {
    pub fn client_status_and_error(&self) -> (StatusCode, ClientError) {
        match self {
            Self::InvalidInput { .. } | Self::InvalidEmail => {
                (StatusCode::BAD_REQUEST, ClientError::INVALID_PARAMS)
            }

            Self::InvalidOtp => (StatusCode::BAD_REQUEST, ClientError::INVALID_OTP),

            Self::PlaylistAlreadyExists { .. } | Self::SongAlreadyExistsInPlaylist { .. } => {
                (StatusCode::BAD_REQUEST, ClientError::DUPLICATE)
            }

            Self::PlaylistNotFound { .. } => {
                (StatusCode::NOT_FOUND, ClientError::RESOURCE_NOT_FOUND)
            }

            Self::CatalogError(_) | Self::CatalogNoResults => {
                (StatusCode::BAD_REQUEST, ClientError::UPSTREAM_ERROR)
            }

            Self::OtpDeliveryFailed { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::UPSTREAM_ERROR,
            ),

            Self::DbError(_) | Self::EnvVarError(_) | Self::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::SERVICE_ERROR,
            ),
        }
    }

    /// Message shown to API callers. Infrastructure details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidInput { reason } => reason.clone(),
            Self::InvalidEmail => "Invalid email format".to_string(),
            Self::InvalidOtp => "Invalid or expired OTP".to_string(),
            Self::OtpDeliveryFailed { .. } => "Failed to send OTP".to_string(),
            Self::PlaylistAlreadyExists { .. } => {
                "A playlist with this name already exists".to_string()
            }
            Self::PlaylistNotFound { .. } => "Playlist not found or unauthorized".to_string(),
            Self::SongAlreadyExistsInPlaylist { .. } => {
                "Song already exists in playlist".to_string()
            }
            Self::CatalogError(_) => "Failed to fetch data".to_string(),
            Self::CatalogNoResults => "No results found".to_string(),
            Self::DbError(_) | Self::EnvVarError(_) | Self::Io(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

#[derive(Debug, strum_macros::AsRefStr)]
#[allow(non_camel_case_types)]
pub enum ClientError {
    INVALID_PARAMS,
    INVALID_OTP,
    DUPLICATE,
    RESOURCE_NOT_FOUND,
    UPSTREAM_ERROR,
    SERVICE_ERROR,
}

impl From<surrealdb::Error> for Error {
    fn from(err: surrealdb::Error) -> Self {
        Error::DbError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
