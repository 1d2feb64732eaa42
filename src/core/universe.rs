use std::collections::BTreeSet;

use crate::models::{Candidate, ScoreMap};

/// Sorted, deduplicated set of skill names shared by every vector of one
/// matching run. Position `i` of any vector built against it refers to
/// `keys()[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyUniverse {
    keys: Vec<String>,
}

impl KeyUniverse {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of `key`, if it is part of the universe
    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.binary_search_by(|probe| probe.as_str().cmp(key)).ok()
    }
}

/// Build the key universe for one request
///
/// Only the skill maps contribute: required and satisfied skill sets feed the
/// bonus term and never add dimensions. Keys are ordered by their UTF-8 bytes,
/// so index assignment is identical across runs.
pub fn build_universe(query: &ScoreMap, candidates: &[Candidate]) -> KeyUniverse {
    let keys: BTreeSet<&str> = query
        .keys()
        .chain(candidates.iter().flat_map(|candidate| candidate.skills.keys()))
        .map(String::as_str)
        .collect();

    KeyUniverse {
        keys: keys.into_iter().map(str::to_owned).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobLabel;

    fn scores(pairs: &[(&str, f64)]) -> ScoreMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_universe_is_sorted_union() {
        let query = scores(&[("sql", 5.0), ("python", 12.0)]);
        let candidates = vec![
            Candidate::new(JobLabel::titled("a"), scores(&[("excel", 3.0), ("sql", 9.0)])),
            Candidate::new(JobLabel::titled("b"), scores(&[("aws", 1.0)])),
        ];

        let universe = build_universe(&query, &candidates);

        assert_eq!(universe.keys(), &["aws", "excel", "python", "sql"]);
    }

    #[test]
    fn test_universe_ignores_bonus_sets() {
        let query = scores(&[("rust", 10.0)]);
        let candidates = vec![Candidate::new(JobLabel::titled("a"), scores(&[("go", 4.0)]))
            .with_required(["kubernetes"])
            .with_satisfied(["terraform"])];

        let universe = build_universe(&query, &candidates);

        assert_eq!(universe.len(), 2);
        assert!(universe.position("kubernetes").is_none());
        assert!(universe.position("terraform").is_none());
    }

    #[test]
    fn test_universe_is_case_sensitive() {
        let query = scores(&[("SQL", 1.0), ("sql", 1.0), (" sql", 1.0)]);

        let universe = build_universe(&query, &[]);

        assert_eq!(universe.len(), 3);
        assert_eq!(universe.keys(), &[" sql", "SQL", "sql"]);
    }

    #[test]
    fn test_position_lookup() {
        let universe = KeyUniverse::from_keys(["c", "a", "b", "a"]);

        assert_eq!(universe.len(), 3);
        assert_eq!(universe.position("a"), Some(0));
        assert_eq!(universe.position("c"), Some(2));
        assert_eq!(universe.position("z"), None);
    }
}
