//! HTTP 错误响应

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use forum_errors::AppError;

/// 以 Problem Details JSON 返回的错误
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        (status, Json(self.0.to_problem_details())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
