//! Facade crate for the Pathlight matching engine.
//!
//! This crate re-exports the core domain types and exposes the recommender
//! and the SQLite-backed stores behind feature flags.

#![forbid(unsafe_code)]

pub use pathlight_core::{
    CandidateItem, CatalogFilter, CatalogStore, Clock, CompletedItem, Diagnostics,
    EducationLevel, ItemKind, ItemStatus, LearnerProfile, ProficiencyLevel, ProfileStore,
    Recommend, RecommendError, RecommendRequest, RecommendResponse, Recommendation, StoreError,
    SystemClock, Timestamp,
};

#[cfg(feature = "store-sqlite")]
pub use pathlight_core::{SqliteStore, SqliteStoreError};

#[cfg(feature = "recommender")]
pub use pathlight_recommender::{
    EvaluatedCandidate, Exploration, MatchingRecommender, RecommenderConfig,
};
