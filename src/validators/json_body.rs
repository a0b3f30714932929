use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::Error;

/// `Json` whose rejections go through `Error`, so a bad body gets the same
/// `{error, code}` 400 as any other invalid input.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                Err(Error::InvalidInput {
                    reason: "Invalid JSON request body".to_string(),
                })
            }
        }
    }
}
