use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for both match endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSkillsResponse {
    pub student_id: String,
    pub best_matches: Vec<MatchResult>,
    /// Number of jobs considered, before any limit was applied
    pub total_jobs: usize,
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.into(),
            message: message.into(),
            student_id: None,
        }
    }

    pub fn for_student(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }
}
