//! Skill Match - ranks jobs against a student's skill scores
//!
//! Every request aligns the student's scores and each job's skill weights onto
//! one sorted skill universe, scores each job by cosine similarity plus an
//! optional required-skill bonus, and returns a stably ranked list.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{build_universe, cosine_similarity, rank, vectorize, Matcher, MatchingConfig};
pub use crate::models::{Candidate, JobLabel, MatchResult, MatchSkillsRequest, MatchSkillsResponse, ScoreMap};
