use std::collections::BTreeSet;

use crate::core::vectorize::DenseVector;
use crate::models::Candidate;

/// Upper bound of a match score
pub const MAX_MATCH_SCORE: f64 = 100.0;

/// Bonus cap used when none is configured (30 percentage points)
pub const DEFAULT_BONUS_CAP: f64 = 0.3;

/// How the additive bonus term is computed for a candidate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BonusStrategy {
    /// Plain similarity
    None,
    /// `satisfied required / required × cap`
    RequiredCoverage { cap: f64 },
}

impl Default for BonusStrategy {
    fn default() -> Self {
        BonusStrategy::RequiredCoverage {
            cap: DEFAULT_BONUS_CAP,
        }
    }
}

impl BonusStrategy {
    pub fn bonus_for(&self, candidate: &Candidate) -> f64 {
        match *self {
            BonusStrategy::None => 0.0,
            BonusStrategy::RequiredCoverage { cap } => required_coverage_bonus(
                &candidate.required_skills,
                &candidate.satisfied_skills,
                cap,
            ),
        }
    }
}

/// Fraction of required skills marked satisfied, scaled by `cap`
///
/// Zero when nothing is required. Satisfied skills outside `required` are
/// ignored, so the result stays within `[0, cap]`.
pub fn required_coverage_bonus(
    required: &BTreeSet<String>,
    satisfied: &BTreeSet<String>,
    cap: f64,
) -> f64 {
    if required.is_empty() {
        return 0.0;
    }

    let matched = required.intersection(satisfied).count();
    matched as f64 / required.len() as f64 * cap.max(0.0)
}

#[inline]
fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0, |max, x| max.max(x.abs()))
}

/// Cosine similarity of two vectors built against the same universe
///
/// Returns 0.0 only when either vector is all zeros. Each vector is divided
/// by its largest absolute entry first, so very large or very small finite
/// values neither overflow nor underflow the norms.
pub fn cosine_similarity(a: &DenseVector, b: &DenseVector) -> f64 {
    let (a, b) = (a.as_slice(), b.as_slice());
    debug_assert_eq!(a.len(), b.len(), "vectors must share one key universe");

    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    if scale_a == 0.0 || scale_b == 0.0 {
        return 0.0;
    }

    let (mut dot, mut sq_a, mut sq_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        sq_a += x * x;
        sq_b += y * y;
    }

    let similarity = dot / (sq_a.sqrt() * sq_b.sqrt());
    if similarity.is_finite() {
        similarity.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Round to 2 decimal places, half away from zero (`0.125 -> 0.13`)
#[inline]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Turn a similarity plus bonus into a percentage
///
/// Scaled by 100, clamped to `[0, 100]`, rounded to 2 decimals. Negative
/// bonuses are treated as zero.
pub fn to_match_score(similarity: f64, bonus: f64) -> f64 {
    let raw = (similarity + bonus.max(0.0)) * 100.0;
    round_to_hundredths(raw.clamp(0.0, MAX_MATCH_SCORE))
}

/// Match score of a candidate vector against the query vector
pub fn score(query_vec: &DenseVector, candidate_vec: &DenseVector, bonus: f64) -> f64 {
    to_match_score(cosine_similarity(query_vec, candidate_vec), bonus)
}
