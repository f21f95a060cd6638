use crate::error::TiosaError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Handler error: a library error rendered as `{"error": reason}`
#[derive(Debug)]
pub struct ApiError(pub TiosaError);

impl From<TiosaError> for ApiError {
    fn from(err: TiosaError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TiosaError::NotFound(_) => StatusCode::NOT_FOUND,
            TiosaError::BadRequest(_) => StatusCode::BAD_REQUEST,
            TiosaError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self.0);
        } else {
            log::debug!("Request rejected ({}): {}", status, self.0);
        }

        error_response(status, &self.0.to_string())
    }
}

/// `{"error": reason}` with the given status
pub fn error_response(status: StatusCode, reason: &str) -> Response {
    let body = Json(serde_json::json!({ "error": reason }));
    (status, body).into_response()
}
