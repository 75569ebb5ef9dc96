use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Library(#[from] libwaypoint::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error("Resource Not Found: {0}")]
    NotFound(String),
    #[error("The request was rejected: {1}")]
    Rejected(StatusCode, String),
    #[error("Required parameter '{0}' is missing")]
    RequiredParameterMissing(String),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::Library(libwaypoint::Error::LocationNotFound(_)) => {
                (StatusCode::NOT_FOUND, "Location not found".to_string())
            }
            Error::Library(e) if e.is_invalid_data() => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            Error::Library(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error".to_string(),
            ),
            Error::Other(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error".to_string(),
            ),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Error::Rejected(status, message) => (*status, message.clone()),
            Error::RequiredParameterMissing(param) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Missing parameter '{param}'"),
            ),
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),+) => {
        $(
            impl From<$rejection> for Error {
                fn from(value: $rejection) -> Self {
                    Error::Rejected(value.status(), value.body_text())
                }
            }
        )+
    };
}

impl_from_rejection!(JsonRejection, FormRejection, QueryRejection, PathRejection);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warn!("Got error for response: {self:?}");
        let (status, error) = self.to_client_status();
        (status, Json(ErrorBody { error })).into_response()
    }
}
