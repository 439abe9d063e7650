//! Pure scoring functions over learner profiles and candidate items.
//!
//! Every function is side-effect free and total: degenerate inputs resolve
//! to explicit fallback values instead of propagating `NaN`, and each
//! fallback is logged at debug level so miscalibrated catalogues surface in
//! traces without failing requests.

use pathlight_core::{EducationLevel, LearnerProfile, ProficiencyLevel};

/// Minimum proficiency a learner must hold for a skill to count as matched.
pub const MIN_PROFICIENCY: ProficiencyLevel = ProficiencyLevel::Intermediate;

/// Flat partial credit granted when locations differ or are unknown.
pub const LOCATION_PARTIAL_CREDIT: f32 = 0.5;

/// Clamp a raw score into `0.0..=1.0`, mapping non-finite values to `0.0`.
#[must_use]
pub fn sanitise(score: f32) -> f32 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Fraction of `required` skills the learner holds at [`MIN_PROFICIENCY`]
/// or above.
///
/// Returns `0.0` when `required` is empty; an item demanding nothing gives
/// no evidence of a match and must not divide by zero.
///
/// # Examples
/// ```
/// use pathlight_core::{LearnerProfile, ProficiencyLevel};
/// use pathlight_scorer::skill_match_score;
///
/// let learner = LearnerProfile::new(1)
///     .with_skill("react", ProficiencyLevel::Advanced)
///     .with_skill("node.js", ProficiencyLevel::Intermediate);
/// let required = vec!["react".to_owned(), "node.js".to_owned(), "mongodb".to_owned()];
/// let score = skill_match_score(&required, &learner);
/// assert!((score - 2.0 / 3.0).abs() < 1e-6);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the match ratio divides small bounded counts"
)]
pub fn skill_match_score(required: &[String], learner: &LearnerProfile) -> f32 {
    if required.is_empty() {
        log::debug!("skill match requested with an empty requirement list; scoring 0.0");
        return 0.0;
    }
    let matched = matched_skill_count(required, learner);
    matched as f32 / required.len() as f32
}

/// Number of `required` skills the learner holds at [`MIN_PROFICIENCY`] or
/// above.
#[must_use]
pub fn matched_skill_count(required: &[String], learner: &LearnerProfile) -> usize {
    required
        .iter()
        .filter(|skill| {
            learner
                .skill(skill)
                .is_some_and(|level| level.meets(MIN_PROFICIENCY))
        })
        .count()
}

/// Cosine similarity between two equal-length vectors, in `-1.0..=1.0`.
///
/// Returns `0.0` when either magnitude is zero or the lengths differ; both
/// cases would otherwise produce `NaN` or compare incomparable spaces.
///
/// # Examples
/// ```
/// use pathlight_scorer::cosine_similarity;
///
/// let v = [0.5_f32, 1.0, 0.0];
/// assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
/// assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity is a dot product over magnitudes"
)]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        log::debug!(
            "cosine similarity over mismatched lengths ({} vs {}); scoring 0.0",
            a.len(),
            b.len()
        );
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        log::debug!("cosine similarity against a zero-magnitude vector; scoring 0.0");
        return 0.0;
    }
    dot / (magnitude_a * magnitude_b)
}

/// Whether the learner's education satisfies an item's requirement.
///
/// Items without a requirement score `1.0` for everyone; a requirement with
/// unknown learner education scores `0.0`.
#[must_use]
pub fn education_score(
    learner: Option<EducationLevel>,
    required: Option<EducationLevel>,
) -> f32 {
    required.map_or(1.0, |minimum| {
        if learner.is_some_and(|attained| attained >= minimum) {
            1.0
        } else {
            0.0
        }
    })
}

/// Exact location match scores `1.0`; anything else, including missing data
/// on either side, scores the flat [`LOCATION_PARTIAL_CREDIT`].
///
/// This is an acknowledged placeholder, not a geodistance model.
#[must_use]
pub fn location_score(learner: Option<&str>, item: Option<&str>) -> f32 {
    match (learner, item) {
        (Some(preferred), Some(offered)) if preferred == offered => 1.0,
        _ => LOCATION_PARTIAL_CREDIT,
    }
}

/// Relative closeness of offered compensation to the learner's expectation.
///
/// `max(0, 1 - |expected - offered| / expected)`, clamped into `0.0..=1.0`.
/// When `expected` is zero the ratio is undefined, so the result is `1.0`
/// for a matching zero offer and `0.0` otherwise.
///
/// # Examples
/// ```
/// use pathlight_scorer::compensation_score;
///
/// assert!((compensation_score(1_000.0, 900.0) - 0.9).abs() < 1e-6);
/// assert_eq!(compensation_score(0.0, 0.0), 1.0);
/// assert_eq!(compensation_score(0.0, 500.0), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the tolerance ratio is a normalised absolute difference"
)]
pub fn compensation_score(expected: f32, offered: f32) -> f32 {
    if expected == 0.0 {
        log::debug!("compensation expectation of zero; falling back to exact-match scoring");
        return if offered == 0.0 { 1.0 } else { 0.0 };
    }
    sanitise(1.0 - ((expected - offered).abs() / expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlight_core::ProficiencyLevel;
    use rstest::rstest;

    fn learner_with(skills: &[(&str, ProficiencyLevel)]) -> LearnerProfile {
        let mut learner = LearnerProfile::new(1);
        for (name, level) in skills {
            learner.set_skill(*name, *level);
        }
        learner
    }

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[rstest]
    fn empty_requirements_score_zero() {
        let learner = learner_with(&[("rust", ProficiencyLevel::Expert)]);
        assert_eq!(skill_match_score(&[], &learner), 0.0);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn beginner_proficiency_does_not_count() {
        let learner = learner_with(&[
            ("rust", ProficiencyLevel::Beginner),
            ("sql", ProficiencyLevel::Intermediate),
        ]);
        let score = skill_match_score(&required(&["rust", "sql"]), &learner);
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn full_match_scores_one() {
        let learner = learner_with(&[
            ("rust", ProficiencyLevel::Advanced),
            ("sql", ProficiencyLevel::Expert),
        ]);
        let score = skill_match_score(&required(&["rust", "sql"]), &learner);
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn cosine_self_similarity_is_one() {
        let v = [0.3_f32, 0.0, 2.5, 1.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[rstest]
    fn cosine_zero_vector_is_zero_not_nan() {
        let zero = [0.0_f32; 4];
        let other = [1.0_f32, 2.0, 3.0, 4.0];
        let score = cosine_similarity(&zero, &other);
        assert_eq!(score, 0.0);
        assert!(score.is_finite());
    }

    #[rstest]
    fn cosine_mismatched_lengths_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn cosine_opposite_vectors_score_negative_one() {
        let a = [1.0_f32, 0.0];
        let b = [-1.0_f32, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[rstest]
    #[case(Some(EducationLevel::Master), Some(EducationLevel::Bachelor), 1.0)]
    #[case(Some(EducationLevel::Bachelor), Some(EducationLevel::Bachelor), 1.0)]
    #[case(Some(EducationLevel::HighSchool), Some(EducationLevel::Bachelor), 0.0)]
    #[case(None, Some(EducationLevel::Bachelor), 0.0)]
    #[case(None, None, 1.0)]
    #[case(Some(EducationLevel::HighSchool), None, 1.0)]
    fn education_threshold(
        #[case] learner: Option<EducationLevel>,
        #[case] item: Option<EducationLevel>,
        #[case] expected: f32,
    ) {
        assert_eq!(education_score(learner, item), expected);
    }

    #[rstest]
    #[case(Some("Berlin"), Some("Berlin"), 1.0)]
    #[case(Some("Berlin"), Some("Munich"), LOCATION_PARTIAL_CREDIT)]
    #[case(None, Some("Berlin"), LOCATION_PARTIAL_CREDIT)]
    #[case(Some("Berlin"), None, LOCATION_PARTIAL_CREDIT)]
    fn location_exact_or_partial(
        #[case] learner: Option<&str>,
        #[case] item: Option<&str>,
        #[case] expected: f32,
    ) {
        assert_eq!(location_score(learner, item), expected);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn compensation_within_range() {
        assert!((compensation_score(2_000.0, 1_800.0) - 0.9).abs() < 1e-6);
        assert!((compensation_score(2_000.0, 2_200.0) - 0.9).abs() < 1e-6);
    }

    #[rstest]
    fn compensation_far_below_floors_at_zero() {
        assert_eq!(compensation_score(1_000.0, 3_000.0), 0.0);
    }

    #[rstest]
    fn sanitise_rejects_non_finite() {
        assert_eq!(sanitise(f32::NAN), 0.0);
        assert_eq!(sanitise(f32::INFINITY), 0.0);
        assert_eq!(sanitise(1.5), 1.0);
        assert_eq!(sanitise(-0.5), 0.0);
    }
}
