use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("User not found")]
    UserNotFound,
    #[error("User ID already exists")]
    DuplicateUser,
    #[error("No data found for the specified user and date range")]
    NoData,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::DuplicateUser => StatusCode::BAD_REQUEST,
            AppError::UserNotFound | AppError::NoData => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let key = match self {
            AppError::NoData => "message",
            _ => "error",
        };
        let mut body = Map::new();
        body.insert(key.to_string(), Value::String(self.to_string()));
        (self.status(), Json(Value::Object(body))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
