// Route exports
pub mod matches;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use crate::core::MatchError;
use crate::models::ErrorResponse;

pub use matches::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(matches::configure),
    );
}

/// Error returned by handlers, rendered as an [`ErrorResponse`] body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::new(error, message),
        }
    }

    pub fn internal(error: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorResponse::new(error, message),
        }
    }

    pub fn for_student(mut self, student_id: &str) -> Self {
        self.body = self.body.for_student(student_id);
        self
    }

    /// Map a refused request onto an HTTP error, keeping the student id
    pub fn from_match_error(student_id: &str, err: MatchError) -> Self {
        let api_error = match &err {
            MatchError::EmptyQuery => Self::bad_request("empty_query", err.to_string()),
            MatchError::EmptyCandidateSet => Self::bad_request("empty_job_set", err.to_string()),
            MatchError::ComputationFault { .. } => {
                tracing::error!("{}", err);
                Self::internal("computation_fault", err.to_string())
            }
        };
        api_error.for_student(student_id)
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// JSON extractor config shared by the server and tests
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}
