use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Trakt(#[from] trakt::Error),
    #[error(transparent)]
    Tmdb(#[from] tmdb::Error),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("request failed with {self}");
        let (status, error_message) = match self {
            Self::Trakt(trakt::Error::NotAuthenticated) | Self::Tmdb(tmdb::Error::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, "not authenticated")
            }
            Self::Trakt(trakt::Error::NotFound) | Self::Tmdb(tmdb::Error::NotFound) => {
                (StatusCode::NOT_FOUND, "not found")
            }
            Self::Trakt(trakt::Error::Status(code)) => {
                (code, code.canonical_reason().unwrap_or_default())
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };
        let body = Json(json!({
            "error": error_message,
        }));
        (status, body).into_response()
    }
}

pub type InternalError = anyhow::Error;
