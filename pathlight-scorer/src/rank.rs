//! Weighted composite scoring and deterministic ranking.

use thiserror::Error;

use pathlight_core::{CandidateItem, LearnerProfile};

use crate::metrics::{
    compensation_score, education_score, location_score, matched_skill_count, sanitise,
    skill_match_score,
};

/// Neutral component used when compensation data is missing on either side.
pub const NEUTRAL_COMPENSATION: f32 = 0.5;

/// Provided weights were unusable.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("weights must be finite, non-negative, and total more than zero")]
pub struct InvalidWeights;

/// Relative weighting of the four ranking factors.
///
/// Callers are expected to supply weights summing to `1.0` so composite
/// scores stay within `0.0..=1.0`; the sum is a documented precondition and
/// is never silently normalised. [`WeightConfig::validate`] rejects the
/// configurations that can never be correct: non-finite values, negative
/// values, and an all-zero total.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WeightConfig {
    /// Multiplier applied to the skill-match ratio.
    pub skill_match: f32,
    /// Multiplier applied to the education comparison.
    pub education: f32,
    /// Multiplier applied to the location comparison.
    pub location: f32,
    /// Multiplier applied to the compensation closeness.
    pub compensation: f32,
}

impl WeightConfig {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`InvalidWeights`] when any weight is non-finite or
    /// negative, or when the total is zero.
    pub fn validate(self) -> Result<Self, InvalidWeights> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(InvalidWeights)
        }
    }

    const fn is_valid(self) -> bool {
        self.has_finite_values() && self.has_non_negative_values() && self.has_non_zero_total()
    }

    const fn has_finite_values(self) -> bool {
        self.skill_match.is_finite()
            && self.education.is_finite()
            && self.location.is_finite()
            && self.compensation.is_finite()
    }

    const fn has_non_negative_values(self) -> bool {
        self.skill_match >= 0.0_f32
            && self.education >= 0.0_f32
            && self.location >= 0.0_f32
            && self.compensation >= 0.0_f32
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums weights to ensure a non-zero total"
    )]
    const fn has_non_zero_total(self) -> bool {
        (self.skill_match + self.education + self.location + self.compensation) != 0.0_f32
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            skill_match: 0.4_f32,
            education: 0.3_f32,
            location: 0.2_f32,
            compensation: 0.1_f32,
        }
    }
}

/// The ranking factor that contributed most to a composite score.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Factor {
    /// Skill-match ratio dominated.
    SkillMatch,
    /// Education comparison dominated.
    Education,
    /// Location comparison dominated.
    Location,
    /// Compensation closeness dominated.
    Compensation,
}

/// Unweighted sub-scores measured for one candidate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Skill-match ratio in `0.0..=1.0`.
    pub skill_match: f32,
    /// Education comparison in `{0.0, 1.0}`.
    pub education: f32,
    /// Location comparison in `{0.5, 1.0}`.
    pub location: f32,
    /// Compensation closeness in `0.0..=1.0`.
    pub compensation: f32,
}

impl ScoreBreakdown {
    /// Measure every sub-score for a candidate against a learner.
    ///
    /// Missing optional data falls back explicitly: no education
    /// requirement scores `1.0`, missing location data scores the flat
    /// partial credit, and missing compensation data on either side scores
    /// [`NEUTRAL_COMPENSATION`].
    #[must_use]
    pub fn measure(item: &CandidateItem, learner: &LearnerProfile) -> Self {
        let compensation = match (learner.expected_compensation, item.compensation) {
            (Some(expected), Some(offered)) => compensation_score(expected, offered),
            _ => NEUTRAL_COMPENSATION,
        };
        Self {
            skill_match: skill_match_score(&item.required_skills, learner),
            education: education_score(learner.education, item.required_education),
            location: location_score(
                learner.preferred_location.as_deref(),
                item.location.as_deref(),
            ),
            compensation,
        }
    }

    /// Weighted composite of the sub-scores, clamped into `0.0..=1.0`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the composite is a weighted sum of sub-scores"
    )]
    pub fn composite(&self, weights: WeightConfig) -> f32 {
        sanitise(
            self.skill_match * weights.skill_match
                + self.education * weights.education
                + self.location * weights.location
                + self.compensation * weights.compensation,
        )
    }

    /// The factor contributing the largest weighted share of the composite.
    ///
    /// Ties resolve in declaration order, so skill match wins over the
    /// softer factors.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "factor attribution compares weighted contributions"
    )]
    pub fn dominant_factor(&self, weights: WeightConfig) -> Factor {
        let contributions = [
            (Factor::SkillMatch, self.skill_match * weights.skill_match),
            (Factor::Education, self.education * weights.education),
            (Factor::Location, self.location * weights.location),
            (Factor::Compensation, self.compensation * weights.compensation),
        ];
        let mut best = Factor::SkillMatch;
        let mut best_contribution = f32::MIN;
        for (factor, contribution) in contributions {
            if contribution > best_contribution {
                best = factor;
                best_contribution = contribution;
            }
        }
        best
    }
}

/// One candidate with its composite score, sub-scores, and reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// The scored item.
    pub item: CandidateItem,
    /// Composite score in `0.0..=1.0`.
    pub score: f32,
    /// Unweighted sub-scores behind the composite.
    pub breakdown: ScoreBreakdown,
    /// Human-readable reason naming the dominant factor.
    pub reason: String,
}

/// Order candidates by descending score, breaking exact ties by ascending
/// item identifier so identical inputs always produce identical output.
pub fn sort_by_score(ranked: &mut [RankedCandidate]) {
    ranked.sort_unstable_by(|lhs, rhs| {
        rhs.score
            .partial_cmp(&lhs.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| lhs.item.id.cmp(&rhs.item.id))
    });
}

/// Weighted multi-factor ranker.
///
/// # Examples
/// ```
/// use pathlight_core::{CandidateItem, ItemKind, ItemStatus, LearnerProfile, ProficiencyLevel};
/// use pathlight_scorer::{Ranker, WeightConfig};
///
/// let ranker = Ranker::new(WeightConfig::default())?;
/// let learner = LearnerProfile::new(1).with_skill("rust", ProficiencyLevel::Advanced);
/// let item = CandidateItem::new(10, ItemKind::Course, "Rust")
///     .with_status(ItemStatus::Open)
///     .with_required_skills(["rust"]);
/// let ranked = ranker.rank(vec![item], &learner, 5);
/// assert_eq!(ranked.len(), 1);
/// # Ok::<(), pathlight_scorer::InvalidWeights>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    weights: WeightConfig,
}

impl Default for Ranker {
    /// Ranker using [`WeightConfig::default`], which is valid by
    /// construction.
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
        }
    }
}

impl Ranker {
    /// Construct a ranker after validating the weights.
    ///
    /// # Errors
    /// Returns [`InvalidWeights`] when the configuration is malformed;
    /// validation happens here so a bad configuration fails before any
    /// candidate is fetched or scored.
    pub fn new(weights: WeightConfig) -> Result<Self, InvalidWeights> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// The validated weights in use.
    #[must_use]
    pub const fn weights(&self) -> WeightConfig {
        self.weights
    }

    /// Score every candidate without ordering the results.
    ///
    /// Exposed separately from [`Ranker::rank`] so callers layering an
    /// exploration strategy can perturb scores before the final sort.
    #[must_use]
    pub fn score_candidates(
        &self,
        candidates: Vec<CandidateItem>,
        learner: &LearnerProfile,
    ) -> Vec<RankedCandidate> {
        candidates
            .into_iter()
            .map(|item| {
                let breakdown = ScoreBreakdown::measure(&item, learner);
                let score = breakdown.composite(self.weights);
                let reason = reason_for(&breakdown, self.weights, &item, learner);
                RankedCandidate {
                    item,
                    score,
                    breakdown,
                    reason,
                }
            })
            .collect()
    }

    /// Score, sort descending with the identifier tie-break, and truncate
    /// to `limit`.
    #[must_use]
    pub fn rank(
        &self,
        candidates: Vec<CandidateItem>,
        learner: &LearnerProfile,
        limit: usize,
    ) -> Vec<RankedCandidate> {
        let mut ranked = self.score_candidates(candidates, learner);
        sort_by_score(&mut ranked);
        ranked.truncate(limit);
        ranked
    }
}

/// Template a reason from the dominant weighted factor.
///
/// Deterministic by construction: the same breakdown and weights always
/// produce the same string.
fn reason_for(
    breakdown: &ScoreBreakdown,
    weights: WeightConfig,
    item: &CandidateItem,
    learner: &LearnerProfile,
) -> String {
    match breakdown.dominant_factor(weights) {
        Factor::SkillMatch => {
            let matched = matched_skill_count(&item.required_skills, learner);
            let total = item.required_skills.len();
            format!("Matches {matched} of {total} required skills")
        }
        Factor::Education => "Fits your education background".to_owned(),
        Factor::Location => {
            if breakdown.location >= 1.0 {
                "Based in your preferred location".to_owned()
            } else {
                "Compatible with your location preferences".to_owned()
            }
        }
        Factor::Compensation => "Compensation aligns with your expectations".to_owned(),
    }
}
