use std::collections::HashMap;

use crate::core::universe::KeyUniverse;
use crate::models::ScoreMap;

/// Per-skill multipliers, already joined from whatever metadata produced them
pub type WeightMap = HashMap<String, f64>;

/// Dense projection of a score map onto a [`KeyUniverse`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseVector(Vec<f64>);

impl DenseVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for DenseVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// How raw scores are rescaled before similarity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Normalization {
    /// Use scores as given
    #[default]
    Raw,
    /// Divide by a fixed maximum and cap at 1.0
    MaxScore(f64),
}

impl Normalization {
    /// Negative values are not floored; they pass through scaled.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Normalization::Raw => value,
            Normalization::MaxScore(max) if max > 0.0 => (value / max).min(1.0),
            Normalization::MaxScore(_) => value,
        }
    }
}

/// Project `map` onto `universe`, applying `weight_fn` then `normalize_fn` to
/// every position. Absent keys read as 0.0.
pub fn vectorize_with<W, N>(
    map: &ScoreMap,
    universe: &KeyUniverse,
    weight_fn: W,
    normalize_fn: N,
) -> DenseVector
where
    W: Fn(&str) -> f64,
    N: Fn(f64) -> f64,
{
    DenseVector(
        universe
            .iter()
            .map(|key| {
                let raw = map.get(key).copied().unwrap_or(0.0);
                normalize_fn(raw * weight_fn(key))
            })
            .collect(),
    )
}

/// Project `map` onto `universe` with an optional weight map (missing keys
/// weigh 1.0) and a normalization policy
pub fn vectorize(
    map: &ScoreMap,
    universe: &KeyUniverse,
    weights: Option<&WeightMap>,
    normalization: Normalization,
) -> DenseVector {
    match weights {
        Some(weights) => vectorize_with(
            map,
            universe,
            |key| weights.get(key).copied().unwrap_or(1.0),
            |value| normalization.apply(value),
        ),
        None => vectorize_with(map, universe, |_| 1.0, |value| normalization.apply(value)),
    }
}
