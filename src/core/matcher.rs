use thiserror::Error;

use crate::core::{
    ranking::rank,
    scoring::{score, BonusStrategy},
    universe::{build_universe, KeyUniverse},
    vectorize::{vectorize, DenseVector, Normalization},
    weights::TierWeights,
};
use crate::models::{Candidate, MatchResult, ScoreMap};

/// Reasons a matching request is refused before any scoring happens
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("Missing student scores")]
    EmptyQuery,

    #[error("Missing job data")]
    EmptyCandidateSet,

    #[error("Computation failed for {query_id}: {reason}")]
    ComputationFault { query_id: String, reason: String },
}

/// Strategies the matcher applies on every request
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MatchingConfig {
    pub normalization: Normalization,
    pub bonus: BonusStrategy,
    pub weights: TierWeights,
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
}

/// Check that a request can be handed to [`Matcher::find_matches`]
///
/// Rejects an empty score map, an empty job list, and any non-finite score.
/// `query_id` is carried into the fault so callers can correlate it.
pub fn validate_match_inputs(
    query_id: &str,
    query: &ScoreMap,
    candidates: &[Candidate],
) -> Result<(), MatchError> {
    if query.is_empty() {
        return Err(MatchError::EmptyQuery);
    }
    if candidates.is_empty() {
        return Err(MatchError::EmptyCandidateSet);
    }

    if let Some((skill, value)) = query.iter().find(|(_, v)| !v.is_finite()) {
        return Err(MatchError::ComputationFault {
            query_id: query_id.to_string(),
            reason: format!("student score for '{}' is not a finite number ({})", skill, value),
        });
    }

    for candidate in candidates {
        if let Some((skill, value)) = candidate.skills.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MatchError::ComputationFault {
                query_id: query_id.to_string(),
                reason: format!(
                    "job '{}' has a non-finite weight for '{}' ({})",
                    candidate.label.job_title, skill, value
                ),
            });
        }
    }

    Ok(())
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Key universe over the student's and every job's skills
/// 2. Vectorization of the student once and of each job once
/// 3. Cosine scoring plus the configured bonus
/// 4. Stable ranking by descending score
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatchingConfig,
}

impl Matcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self {
            config: MatchingConfig::default(),
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Rank `candidates` against the student's `query` scores
    ///
    /// Total for finite inputs: empty maps and zero vectors produce scores of
    /// 0.0 rather than errors. `limit` truncates after ranking;
    /// `total_candidates` always counts every job considered.
    pub fn find_matches(
        &self,
        query: &ScoreMap,
        candidates: Vec<Candidate>,
        limit: Option<usize>,
    ) -> MatchOutcome {
        let total_candidates = candidates.len();

        let universe = build_universe(query, &candidates);
        let query_vec = vectorize(query, &universe, None, self.config.normalization);

        tracing::debug!(
            "Scoring {} jobs over {} skills",
            total_candidates,
            universe.len()
        );

        let scored: Vec<MatchResult> = candidates
            .into_iter()
            .map(|candidate| self.score_candidate(&universe, &query_vec, candidate))
            .collect();

        let mut matches = rank(scored);
        if let Some(limit) = limit {
            matches.truncate(limit);
        }

        MatchOutcome {
            matches,
            total_candidates,
        }
    }

    fn score_candidate(
        &self,
        universe: &KeyUniverse,
        query_vec: &DenseVector,
        candidate: Candidate,
    ) -> MatchResult {
        let weights = self.config.weights.weight_map(&candidate);
        let candidate_vec = vectorize(
            &candidate.skills,
            universe,
            weights.as_ref(),
            self.config.normalization,
        );

        let bonus = self.config.bonus.bonus_for(&candidate);
        let match_score = score(query_vec, &candidate_vec, bonus);

        MatchResult {
            shared_skills: shared_skills(universe, query_vec, &candidate_vec),
            job: candidate.label,
            match_score,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Universe keys where both vectors are non-zero, in universe order
fn shared_skills(universe: &KeyUniverse, a: &DenseVector, b: &DenseVector) -> Vec<String> {
    universe
        .keys()
        .iter()
        .zip(a.as_slice().iter().zip(b.as_slice()))
        .filter(|(_, (x, y))| **x != 0.0 && **y != 0.0)
        .map(|(key, _)| key.clone())
        .collect()
}
