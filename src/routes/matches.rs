use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{validate_match_inputs, Matcher};
use crate::models::{
    Candidate, HealthResponse, MatchJobsRequest, MatchSkillsRequest, MatchSkillsResponse, ScoreMap,
};
use crate::routes::ApiError;
use crate::services::JobLoader;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<JobLoader>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/match-skills", web::post().to(match_skills))
        .route("/match-jobs", web::post().to(match_jobs));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match a student against the configured job file
///
/// POST /api/match-skills
///
/// Request body:
/// ```json
/// {
///   "student_id": "string",
///   "student_scores": {"python": 15, "sql": 12},
///   "limit": 10
/// }
/// ```
async fn match_skills(
    state: web::Data<AppState>,
    req: web::Json<MatchSkillsRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    validate_request(&req, &req.student_id)?;

    tracing::info!(
        "Matching student {} ({} skills) against {}",
        req.student_id,
        req.student_scores.len(),
        state.loader.path().display()
    );

    let jobs = state.loader.load().await.map_err(|e| {
        tracing::error!("Failed to load job data for {}: {}", req.student_id, e);
        ApiError::internal("job_data_unavailable", e.to_string()).for_student(&req.student_id)
    })?;

    run_match(&state.matcher, req.student_id, &req.student_scores, jobs, req.limit)
}

/// Match a student against jobs supplied in the request
///
/// POST /api/match-jobs
///
/// Request body:
/// ```json
/// {
///   "student_id": "string",
///   "student_scores": {"rust": 16},
///   "jobs": [
///     {"job_title": "string", "skills": {"rust": 18}},
///     {"job_title": "string", "skills": [{"name": "rust", "score": 18, "level": "expert", "required": true}],
///      "satisfied_skills": ["rust"]}
///   ]
/// }
/// ```
async fn match_jobs(
    state: web::Data<AppState>,
    req: web::Json<MatchJobsRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    validate_request(&req, &req.student_id)?;

    tracing::info!(
        "Matching student {} ({} skills) against {} supplied jobs",
        req.student_id,
        req.student_scores.len(),
        req.jobs.len()
    );

    let jobs: Vec<Candidate> = req.jobs.into_iter().map(Candidate::from).collect();

    run_match(&state.matcher, req.student_id, &req.student_scores, jobs, req.limit)
}

fn validate_request<T: Validate>(req: &T, student_id: &str) -> Result<(), ApiError> {
    req.validate().map_err(|errors| {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        ApiError::bad_request("validation_failed", errors.to_string()).for_student(student_id)
    })
}

fn run_match(
    matcher: &Matcher,
    student_id: String,
    student_scores: &ScoreMap,
    jobs: Vec<Candidate>,
    limit: Option<usize>,
) -> Result<HttpResponse, ApiError> {
    if let Err(e) = validate_match_inputs(&student_id, student_scores, &jobs) {
        tracing::info!("Rejected match request for {}: {}", student_id, e);
        return Err(ApiError::from_match_error(&student_id, e));
    }

    let outcome = matcher.find_matches(student_scores, jobs, limit);

    tracing::info!(
        "Returning {} matches for student {} (from {} jobs)",
        outcome.matches.len(),
        student_id,
        outcome.total_candidates
    );

    Ok(HttpResponse::Ok().json(MatchSkillsResponse {
        student_id,
        best_matches: outcome.matches,
        total_jobs: outcome.total_candidates,
        status: "success".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MatchError;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_empty_scores_map_to_bad_request() {
        let err = run_match(&Matcher::default(), "s1".to_string(), &ScoreMap::new(), vec![], None)
            .unwrap_err();

        assert_eq!(err.body().error, "empty_query");
        assert_eq!(err.body().status, "error");
        assert_eq!(err.body().student_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_computation_fault_carries_student_id() {
        let err = ApiError::from_match_error(
            "s9",
            MatchError::ComputationFault {
                query_id: "s9".to_string(),
                reason: "bad value".to_string(),
            },
        );

        assert_eq!(err.body().error, "computation_fault");
        assert_eq!(err.body().student_id.as_deref(), Some("s9"));
        assert!(err.body().message.contains("bad value"));
    }
}
