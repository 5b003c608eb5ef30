// ABOUTME: API error type and its HTTP mapping
// ABOUTME: Converts portfolio failures into status codes with sanitized messages

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use tracing::{error, warn};

use crate::response::ApiResponse;
use steamfolio_portfolio::PortfolioError;

#[derive(Debug)]
pub struct ApiError(pub PortfolioError);

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            PortfolioError::ProfileNotFound(_) | PortfolioError::GameNotInLibrary { .. } => {
                StatusCode::NOT_FOUND
            }
            PortfolioError::SteamIdTaken(_) => StatusCode::CONFLICT,
            PortfolioError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PortfolioError::Steam(_) => StatusCode::BAD_GATEWAY,
            PortfolioError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to callers; upstream and database details stay in the logs
    fn user_message(&self) -> String {
        match &self.0 {
            PortfolioError::Steam(_) => "Steam API request failed".to_string(),
            PortfolioError::Storage(_) => "Data storage error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected: {}", self.0);
        }

        (
            status,
            ResponseJson(ApiResponse::<()>::error(self.user_message())),
        )
            .into_response()
    }
}
