use std::cmp::Ordering;

use crate::models::MatchResult;

/// Order results by descending score
///
/// `sort_by` is stable, so results with equal scores keep the order they were
/// supplied in. Callers rely on that order carrying an external priority.
pub fn rank(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
    results
}
