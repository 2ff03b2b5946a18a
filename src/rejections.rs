use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, PartialEq)]
pub enum AppError {
    Internal(&'static str),
    Input(&'static str),
    NotFound(&'static str),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            AppError::Internal(msg) | AppError::Input(msg) | AppError::NotFound(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

// The `/api` routes answer with a JSON error body instead of plain text.
// `From` lets `?` lift any `AppError` produced by `ResultExt` into it.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.0.message() }));
        (self.0.status(), body).into_response()
    }
}

pub trait ResultExt<T> {
    fn reject(self, msg: &'static str) -> Result<T, AppError>;
    fn reject_input(self, msg: &'static str) -> Result<T, AppError>;
    fn reject_not_found(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for Result<T, E> {
    fn reject(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{msg}: {e:?}");
            AppError::Internal(msg)
        })
    }

    fn reject_input(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{msg}: {e:?}");
            AppError::Input(msg)
        })
    }

    fn reject_not_found(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::warn!("{msg}: {e:?}");
            AppError::NotFound(msg)
        })
    }
}
