use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::models::domain::{Candidate, ExperienceTier, JobLabel, ScoreMap};

/// Request to match a student against the configured job file
///
/// POST /api/match-skills
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchSkillsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "studentId")]
    pub student_id: String,
    #[serde(default, alias = "studentScores")]
    pub student_scores: ScoreMap,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Request carrying its own job list from an upstream system
///
/// POST /api/match-jobs
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchJobsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "studentId")]
    pub student_id: String,
    #[serde(default, alias = "studentScores")]
    pub student_scores: ScoreMap,
    #[serde(default)]
    pub jobs: Vec<JobPayload>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Job as sent by upstream systems or stored in a JSON job file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPayload {
    #[serde(alias = "jobTitle", alias = "title")]
    pub job_title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub recruiter: Option<String>,
    pub skills: SkillsPayload,
    #[serde(default, alias = "requiredSkills")]
    pub required_skills: Vec<String>,
    #[serde(default, alias = "satisfiedSkills")]
    pub satisfied_skills: Vec<String>,
}

/// The two skill shapes upstream systems send
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsPayload {
    /// `{"python": 12, "sql": 8}`
    Map(HashMap<String, f64>),
    /// `[{"name": "python", "score": 12, "level": "expert", "required": true}]`
    List(Vec<SkillEntry>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    #[serde(alias = "skill")]
    pub name: String,
    #[serde(alias = "weight")]
    pub score: f64,
    #[serde(default)]
    pub level: Option<ExperienceTier>,
    #[serde(default)]
    pub required: bool,
}

impl From<JobPayload> for Candidate {
    fn from(payload: JobPayload) -> Self {
        let label = JobLabel {
            job_title: payload.job_title,
            company: payload.company,
            recruiter: payload.recruiter,
        };

        let mut candidate = Candidate::new(label, ScoreMap::new())
            .with_required(payload.required_skills)
            .with_satisfied(payload.satisfied_skills);

        match payload.skills {
            SkillsPayload::Map(skills) => candidate.skills = skills,
            SkillsPayload::List(entries) => {
                for entry in entries {
                    if entry.required {
                        candidate.required_skills.insert(entry.name.clone());
                    }
                    if let Some(level) = entry.level {
                        candidate.skill_levels.insert(entry.name.clone(), level);
                    }
                    // Repeated names accumulate, same as summing duplicate rows
                    *candidate.skills.entry(entry.name).or_insert(0.0) += entry.score;
                }
            }
        }

        candidate
    }
}
