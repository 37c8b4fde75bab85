use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

use crate::authors_client::AuthorsClientError;

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

/// Closed set of failure kinds crossing the HTTP boundary. Each kind owns its
/// status code; nothing dispatches on message text.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Email {0} already exists")]
    EmailConflict(String),

    #[error("Author with ID {0} does not exist")]
    MissingAuthor(i64),

    #[error("Authors service unavailable")]
    UpstreamUnavailable,

    #[error("Authors service error: {0}")]
    UpstreamFailed(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_)
            | ApiError::InvalidRequest(_)
            | ApiError::EmailConflict(_)
            | ApiError::MissingAuthor(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UpstreamFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // do not leak internals to clients
            ApiError::Internal(e) => {
                error!("Internal error: {e:#}");
                "An error occurred processing your request".to_string()
            }
            other => {
                debug!("Request failed: {other}");
                other.to_string()
            }
        };
        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<pressroom_dal::Error> for ApiError {
    fn from(error: pressroom_dal::Error) -> Self {
        match error {
            pressroom_dal::Error::RecordNotFound(what) => ApiError::NotFound(what),
            pressroom_dal::Error::EmailAlreadyUsed(email) => ApiError::EmailConflict(email),
            pressroom_dal::Error::DatabaseError(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<AuthorsClientError> for ApiError {
    fn from(error: AuthorsClientError) -> Self {
        match error {
            AuthorsClientError::Unavailable(e) => {
                error!("Authors service unavailable: {e}");
                ApiError::UpstreamUnavailable
            }
            AuthorsClientError::UnexpectedStatus(status) => {
                ApiError::UpstreamFailed(format!("unexpected status {status}"))
            }
            AuthorsClientError::InvalidBody(e) => {
                ApiError::UpstreamFailed(format!("invalid response body: {e}"))
            }
        }
    }
}
