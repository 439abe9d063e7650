//! Core domain types for the Pathlight matching engine.
//!
//! The crate defines the vocabulary shared by every other Pathlight
//! component: learner profiles, candidate items (courses and internships),
//! the ordinal proficiency and education scales, and the collaborator
//! boundaries the engine depends on — read-only stores, an injected clock,
//! and the [`Recommend`] trait implemented by the orchestrator.
//!
//! The engine itself performs no I/O and holds no shared mutable state;
//! everything that touches the outside world enters through the traits in
//! [`store`] and [`Clock`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
mod item;
mod learner;
mod level;
mod recommend;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use clock::{Clock, SystemClock, Timestamp};
pub use item::{CandidateItem, ItemKind, ItemStatus};
pub use learner::{CompletedItem, LearnerProfile};
pub use level::{EducationLevel, ProficiencyLevel};
pub use recommend::{
    DEFAULT_LIMIT, Diagnostics, Recommend, RecommendError, RecommendRequest, RecommendResponse,
    Recommendation,
};
pub use store::{CatalogFilter, CatalogStore, ProfileStore, StoreError};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteStore, SqliteStoreError};
