use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Tool not found")]
    ToolNotFound,
    #[error("Agent not found")]
    AgentNotFound,
    #[error("One or more tools not found")]
    UnknownToolIds,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ToolNotFound | ApiError::AgentNotFound => StatusCode::NOT_FOUND,
            ApiError::UnknownToolIds => StatusCode::BAD_REQUEST,
        };

        let body = Json(serde_json::json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
