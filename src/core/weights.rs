use crate::core::vectorize::WeightMap;
use crate::models::{Candidate, ExperienceTier};

/// Multipliers applied to a job's skill weights from its per-skill hints
///
/// A skill's weight is `tier multiplier × required multiplier` (the latter only
/// when the job lists the skill as required). Skills without hints weigh 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierWeights {
    pub beginner: f64,
    pub intermediate: f64,
    pub expert: f64,
    pub required: f64,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            beginner: 1.0,
            intermediate: 1.0,
            expert: 1.0,
            required: 1.0,
        }
    }
}

impl TierWeights {
    #[inline]
    pub fn tier_multiplier(&self, tier: ExperienceTier) -> f64 {
        match tier {
            ExperienceTier::Beginner => self.beginner,
            ExperienceTier::Intermediate => self.intermediate,
            ExperienceTier::Expert => self.expert,
        }
    }

    /// True when every multiplier is 1.0, i.e. weighting changes nothing
    pub fn is_neutral(&self) -> bool {
        [self.beginner, self.intermediate, self.expert, self.required]
            .iter()
            .all(|m| *m == 1.0)
    }

    pub fn weight_for(&self, candidate: &Candidate, skill: &str) -> f64 {
        let tier = candidate
            .skill_levels
            .get(skill)
            .map_or(1.0, |tier| self.tier_multiplier(*tier));

        if candidate.is_required(skill) {
            tier * self.required
        } else {
            tier
        }
    }

    /// Key→weight map for a candidate's skills, or `None` when no skill would
    /// be weighted differently from 1.0
    pub fn weight_map(&self, candidate: &Candidate) -> Option<WeightMap> {
        if self.is_neutral()
            || (candidate.skill_levels.is_empty() && candidate.required_skills.is_empty())
        {
            return None;
        }

        Some(
            candidate
                .skills
                .keys()
                .map(|skill| (skill.clone(), self.weight_for(candidate, skill)))
                .collect(),
        )
    }
}
