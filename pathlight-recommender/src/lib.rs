//! Recommendation orchestration for Pathlight.
//!
//! This crate provides [`MatchingRecommender`], the default implementation
//! of the [`Recommend`](pathlight_core::Recommend) trait. It composes the
//! engine boundaries — a profile store, a catalogue store, and an injected
//! clock — with the scoring layer: candidates are fetched under coarse
//! filters, gated on hard eligibility constraints, ranked by weighted
//! composite score, and truncated to the requested limit.
//!
//! The pipeline is deterministic end to end. When ranking diversity is
//! wanted, [`Exploration`] adds a seeded, reproducible jitter; there is no
//! ambient randomness anywhere on the scoring path.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod exploration;
mod recommender;

pub use exploration::{DEFAULT_EXPLORATION_WEIGHT, Exploration, InvalidExploration};
pub use recommender::{
    EvaluatedCandidate, MAX_CANDIDATES, MatchingRecommender, RecommenderConfig,
};
