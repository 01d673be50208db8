use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quiz_generator::{GenerationError, GenerationResult};

/// A failed generation request, rendered in the same JSON shape as a
/// successful one so the client only has to read `success`.
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

pub fn status_for(err: &GenerationError) -> StatusCode {
    match err {
        GenerationError::Validation(_) => StatusCode::BAD_REQUEST,
        GenerationError::MissingCredentials | GenerationError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        let status = status_for(&err);
        let message = match &err {
            GenerationError::Internal(inner) => {
                log::error!("Unexpected error generating questions: {:?}", inner);
                "Error generating questions: internal server error".to_string()
            }
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(GenerationResult::failure(self.message))).into_response()
    }
}
