use super::error::{error_response, ApiError};
use crate::error::TiosaError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const ERR_INVALID_BODY: &str = "Invalid request body";
pub const ERR_BODY_TOO_LARGE: &str = "Request body too large";

/// `Json<T>` whose rejections use the API's `{"error": reason}` body
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                log::debug!("Request body over limit: {}", rejection.body_text());
                Err(error_response(StatusCode::PAYLOAD_TOO_LARGE, ERR_BODY_TOO_LARGE))
            }
            Err(rejection) => {
                log::debug!("Bad request body: {}", rejection.body_text());
                Err(ApiError(TiosaError::BadRequest(ERR_INVALID_BODY.into())).into_response())
            }
        }
    }
}
