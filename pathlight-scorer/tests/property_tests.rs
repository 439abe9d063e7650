//! Property-based tests for the scoring and ranking laws.
//!
//! These use `proptest` to assert invariants that must hold for all valid
//! inputs, complementing the example-based unit tests and BDD behavioural
//! tests.
//!
//! # Invariants tested
//!
//! - **Score bounds:** every composite score lies in `0.0..=1.0` for
//!   weights summing to one.
//! - **Ordering:** rankings are non-increasing by score with the
//!   identifier tie-break, and identical inputs produce identical output.
//! - **Degenerate inputs:** empty requirement lists score zero; zero
//!   vectors never produce `NaN`; self-similarity of non-zero vectors is
//!   one.

use proptest::prelude::*;

use pathlight_core::{CandidateItem, ItemKind, ItemStatus, LearnerProfile, ProficiencyLevel};
use pathlight_scorer::{
    Ranker, WeightConfig, compensation_score, cosine_similarity, skill_match_score,
};

const SKILL_POOL: [&str; 8] = [
    "rust",
    "react",
    "node.js",
    "sql",
    "python",
    "kubernetes",
    "figma",
    "mongodb",
];

fn proficiency_strategy() -> impl Strategy<Value = ProficiencyLevel> {
    prop_oneof![
        Just(ProficiencyLevel::Beginner),
        Just(ProficiencyLevel::Intermediate),
        Just(ProficiencyLevel::Advanced),
        Just(ProficiencyLevel::Expert),
    ]
}

fn learner_strategy() -> impl Strategy<Value = LearnerProfile> {
    proptest::collection::vec((0_usize..SKILL_POOL.len(), proficiency_strategy()), 0..6).prop_map(
        |skills| {
            let mut learner = LearnerProfile::new(1);
            for (index, level) in skills {
                if let Some(name) = SKILL_POOL.get(index) {
                    learner.set_skill(*name, level);
                }
            }
            learner
        },
    )
}

fn item_strategy(id: u64) -> impl Strategy<Value = CandidateItem> {
    proptest::collection::vec(0_usize..SKILL_POOL.len(), 0..5).prop_map(move |indices| {
        let skills: Vec<&str> = indices
            .into_iter()
            .filter_map(|index| SKILL_POOL.get(index).copied())
            .collect();
        CandidateItem::new(id, ItemKind::Internship, format!("Internship {id}"))
            .with_status(ItemStatus::Open)
            .with_required_skills(skills)
    })
}

fn items_strategy() -> impl Strategy<Value = Vec<CandidateItem>> {
    proptest::collection::vec(0_u64..50, 1..12).prop_flat_map(|ids| {
        let unique: Vec<u64> = {
            let mut sorted = ids;
            sorted.sort_unstable();
            sorted.dedup();
            sorted
        };
        unique.into_iter().map(item_strategy).collect::<Vec<_>>()
    })
}

fn normalised_weights() -> impl Strategy<Value = WeightConfig> {
    (0.01_f32..1.0, 0.01_f32..1.0, 0.01_f32..1.0, 0.01_f32..1.0).prop_map(
        |(skill, education, location, compensation)| {
            let total = skill + education + location + compensation;
            WeightConfig {
                skill_match: skill / total,
                education: education / total,
                location: location / total,
                compensation: compensation / total,
            }
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: composite scores stay in the unit interval for any weights
    /// summing to one.
    #[test]
    fn composite_scores_stay_in_unit_interval(
        learner in learner_strategy(),
        items in items_strategy(),
        weights in normalised_weights(),
    ) {
        let ranker = Ranker::new(weights).expect("normalised weights validate");
        let ranked = ranker.rank(items, &learner, usize::MAX);
        for entry in &ranked {
            prop_assert!(
                (0.0..=1.0).contains(&entry.score),
                "score {} escaped the unit interval",
                entry.score
            );
        }
    }

    /// Property: rankings are non-increasing by score, with exact ties in
    /// ascending identifier order.
    #[test]
    fn rankings_are_sorted_with_identifier_tie_break(
        learner in learner_strategy(),
        items in items_strategy(),
    ) {
        let ranker = Ranker::new(WeightConfig::default()).expect("default weights validate");
        let ranked = ranker.rank(items, &learner, usize::MAX);
        for pair in ranked.windows(2) {
            if let [left, right] = pair {
                prop_assert!(left.score >= right.score);
                if left.score == right.score {
                    prop_assert!(left.item.id < right.item.id);
                }
            }
        }
    }

    /// Property: two identical calls produce identical output sequences.
    #[test]
    fn ranking_is_idempotent(
        learner in learner_strategy(),
        items in items_strategy(),
    ) {
        let ranker = Ranker::new(WeightConfig::default()).expect("default weights validate");
        let first = ranker.rank(items.clone(), &learner, usize::MAX);
        let second = ranker.rank(items, &learner, usize::MAX);
        prop_assert_eq!(first, second);
    }

    /// Property: an empty requirement list scores zero for any learner.
    #[test]
    fn empty_requirements_always_score_zero(learner in learner_strategy()) {
        prop_assert_eq!(skill_match_score(&[], &learner), 0.0);
    }

    /// Property: a non-zero vector is perfectly similar to itself.
    #[test]
    fn self_similarity_is_one(
        vector in proptest::collection::vec(0.1_f32..10.0, 1..16),
    ) {
        let similarity = cosine_similarity(&vector, &vector);
        prop_assert!((similarity - 1.0).abs() < 1e-4);
    }

    /// Property: comparing against a zero vector yields zero, never `NaN`.
    #[test]
    fn zero_vector_similarity_is_zero(
        vector in proptest::collection::vec(-10.0_f32..10.0, 1..16),
    ) {
        let zero = vec![0.0_f32; vector.len()];
        let similarity = cosine_similarity(&zero, &vector);
        prop_assert_eq!(similarity, 0.0);
        prop_assert!(similarity.is_finite());
    }

    /// Property: compensation closeness stays in the unit interval.
    #[test]
    fn compensation_score_stays_bounded(
        expected in 0.0_f32..100_000.0,
        offered in 0.0_f32..100_000.0,
    ) {
        let score = compensation_score(expected, offered);
        prop_assert!((0.0..=1.0).contains(&score));
    }
}
