// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, ExperienceTier, JobLabel, MatchResult, ScoreMap};
pub use requests::{JobPayload, MatchJobsRequest, MatchSkillsRequest, SkillEntry, SkillsPayload};
pub use responses::{ErrorResponse, HealthResponse, MatchSkillsResponse};
