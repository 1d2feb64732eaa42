use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Sparse mapping from skill name to a raw score.
///
/// Skill names are taken exactly as given: no case folding, no trimming.
/// Absent skills count as zero.
pub type ScoreMap = HashMap<String, f64>;

/// Experience level a job asks for on a given skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceTier {
    Beginner,
    Intermediate,
    Expert,
}

/// Passthrough metadata identifying a job. Never interpreted by the matcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobLabel {
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<String>,
}

impl JobLabel {
    pub fn titled(job_title: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            ..Self::default()
        }
    }
}

/// A job under evaluation, already reduced to the one shape the matcher consumes
#[derive(Debug, Clone, Default)]
pub struct Candidate {
    pub label: JobLabel,
    /// Skill weights of the job; the only map that enters vector similarity
    pub skills: ScoreMap,
    /// Skills the job marks as required (bonus term and weighting only)
    pub required_skills: BTreeSet<String>,
    /// Required skills the student has been marked as satisfying
    pub satisfied_skills: BTreeSet<String>,
    /// Experience level requested per skill
    pub skill_levels: HashMap<String, ExperienceTier>,
}

impl Candidate {
    pub fn new(label: JobLabel, skills: ScoreMap) -> Self {
        Self {
            label,
            skills,
            ..Self::default()
        }
    }

    pub fn with_required<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_skills.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_satisfied<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.satisfied_skills.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_level(mut self, skill: impl Into<String>, tier: ExperienceTier) -> Self {
        self.skill_levels.insert(skill.into(), tier);
        self
    }

    pub fn is_required(&self, skill: &str) -> bool {
        self.required_skills.contains(skill)
    }
}

/// Scored job in a ranked result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub job: JobLabel,
    /// Percentage in [0, 100], rounded to 2 decimals
    pub match_score: f64,
    /// Skills where both the student and the job carry a non-zero value
    #[serde(default)]
    pub shared_skills: Vec<String>,
}
