use std::any::Any;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use diesel_async::pooled_connection::deadpool::PoolError;
use serde_json::json;
use tracing::error;

use crate::mapper::MapperError;

pub const SERVER_ERROR_DETAIL: &str = "server error: issue logged for investigation";
pub const EMPTY_BODY_DETAIL: &str =
    "received empty request body; body must contain correct fields";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("result mapping error: {0}")]
    Mapping(#[from] MapperError),
}

impl ApiError {
    pub fn empty_body() -> Self {
        ApiError::BadRequest(EMPTY_BODY_DETAIL.to_string())
    }

    pub fn area_not_found(area_id: i32) -> Self {
        ApiError::NotFound(format!("no match for area with ID {area_id}"))
    }

    pub fn restaurant_not_found(restaurant_id: i32) -> Self {
        ApiError::NotFound(format!("no match for restaurant with ID {restaurant_id}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Pool(_) | ApiError::Mapping(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Unprocessable(msg) => {
                msg
            }
            fault => {
                error!(error = %fault, "unhandled database fault");
                SERVER_ERROR_DETAIL.to_string()
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

/// Response for a handler that panicked. Same body as any other server fault.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = message, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": SERVER_ERROR_DETAIL })),
    )
        .into_response()
}
