// Core algorithm exports
pub mod matcher;
pub mod ranking;
pub mod scoring;
pub mod universe;
pub mod vectorize;
pub mod weights;

pub use matcher::{validate_match_inputs, MatchError, MatchOutcome, Matcher, MatchingConfig};
pub use ranking::rank;
pub use scoring::{cosine_similarity, required_coverage_bonus, round_to_hundredths, score, to_match_score, BonusStrategy};
pub use universe::{build_universe, KeyUniverse};
pub use vectorize::{vectorize, vectorize_with, DenseVector, Normalization, WeightMap};
pub use weights::TierWeights;
