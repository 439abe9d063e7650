//! Data access traits for learner profiles and the item catalogue.
//!
//! Both traits are read-only: the engine computes recommendations per
//! request and never writes back. Store failures carry enough context for
//! the caller to distinguish a missing entity from an unreachable backend;
//! the latter is the retryable case.

use std::sync::Arc;

use thiserror::Error;

use crate::{CandidateItem, ItemKind, ItemStatus, LearnerProfile, Timestamp};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteStore, SqliteStoreError};

/// Errors raised by [`ProfileStore`] and [`CatalogStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested learner does not exist.
    #[error("learner {learner_id} was not found")]
    ProfileNotFound {
        /// Identifier of the missing learner.
        learner_id: u64,
    },
    /// The backing store is unreachable or timed out. Retryable by the
    /// caller; the engine itself never retries.
    #[error("backing store unavailable")]
    Unavailable {
        /// Underlying transport or driver failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl StoreError {
    /// Wrap a driver failure as the retryable `Unavailable` variant.
    pub fn unavailable(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable {
            source: Box::new(source),
        }
    }
}

/// Coarse predicates applied when fetching candidates.
///
/// Predicates combine conjunctively. Items without a deadline always pass a
/// `deadline_after` filter; items with one must be strictly later.
///
/// # Examples
/// ```
/// use pathlight_core::{
///     CandidateItem, CatalogFilter, ItemKind, ItemStatus, Timestamp,
/// };
///
/// let filter = CatalogFilter::open_items()
///     .with_deadline_after(Timestamp::from_unix_seconds(500));
/// let expired = CandidateItem::new(1, ItemKind::Internship, "Expired")
///     .with_status(ItemStatus::Open)
///     .with_deadline(Timestamp::from_unix_seconds(400));
/// assert!(!filter.matches(&expired));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Required lifecycle status, when set.
    pub status: Option<ItemStatus>,
    /// Required item kind, when set.
    pub kind: Option<ItemKind>,
    /// Required category, when set.
    pub category: Option<String>,
    /// Required exact location, when set.
    pub location: Option<String>,
    /// Items must have no deadline, or one strictly after this instant.
    pub deadline_after: Option<Timestamp>,
    /// Upper bound on returned items, when set.
    pub max_results: Option<usize>,
}

impl CatalogFilter {
    /// Filter matching every item.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Filter matching only `Open` items.
    #[must_use]
    pub fn open_items() -> Self {
        Self {
            status: Some(ItemStatus::Open),
            ..Self::default()
        }
    }

    /// Require the given kind while returning `self` for chaining.
    #[must_use]
    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require the given category while returning `self` for chaining.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Require the given location while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Exclude items whose deadline has passed by `now`.
    #[must_use]
    pub fn with_deadline_after(mut self, now: Timestamp) -> Self {
        self.deadline_after = Some(now);
        self
    }

    /// Bound the number of returned items.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Report whether an item satisfies every set predicate.
    ///
    /// `max_results` is a fetch bound, not a predicate, and is ignored here.
    #[must_use]
    pub fn matches(&self, item: &CandidateItem) -> bool {
        if self.status.is_some_and(|status| item.status != status) {
            return false;
        }
        if self.kind.is_some_and(|kind| item.kind != kind) {
            return false;
        }
        if self
            .category
            .as_deref()
            .is_some_and(|category| item.category.as_deref() != Some(category))
        {
            return false;
        }
        if self
            .location
            .as_deref()
            .is_some_and(|location| item.location.as_deref() != Some(location))
        {
            return false;
        }
        if let Some(cutoff) = self.deadline_after
            && item.deadline.is_some_and(|deadline| deadline <= cutoff)
        {
            return false;
        }
        true
    }
}

/// Read-only access to learner profiles.
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for a learner.
    ///
    /// # Errors
    /// Returns [`StoreError::ProfileNotFound`] when the learner does not
    /// exist and [`StoreError::Unavailable`] when the backend cannot be
    /// reached.
    fn get_profile(&self, learner_id: u64) -> Result<LearnerProfile, StoreError>;
}

/// Read-only access to the item catalogue.
///
/// Implementations must return items sorted by ascending identifier so
/// downstream ranking is deterministic, and must honour
/// `filter.max_results` as an upper bound on the result length.
///
/// # Examples
/// ```
/// use pathlight_core::{
///     CandidateItem, CatalogFilter, CatalogStore, ItemKind, ItemStatus, StoreError,
/// };
///
/// struct SliceCatalog {
///     items: Vec<CandidateItem>,
/// }
///
/// impl CatalogStore for SliceCatalog {
///     fn query(&self, filter: &CatalogFilter) -> Result<Vec<CandidateItem>, StoreError> {
///         let mut found: Vec<_> = self
///             .items
///             .iter()
///             .filter(|item| filter.matches(item))
///             .cloned()
///             .collect();
///         found.sort_unstable_by_key(|item| item.id);
///         if let Some(max) = filter.max_results {
///             found.truncate(max);
///         }
///         Ok(found)
///     }
/// }
///
/// let open = CandidateItem::new(1, ItemKind::Course, "Rust").with_status(ItemStatus::Open);
/// let catalog = SliceCatalog { items: vec![open.clone()] };
/// let found = catalog.query(&CatalogFilter::open_items())?;
/// assert_eq!(found, vec![open]);
/// # Ok::<(), StoreError>(())
/// ```
pub trait CatalogStore: Send + Sync {
    /// Return all items satisfying the filter, up to `filter.max_results`.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] when the backend cannot be
    /// reached.
    fn query(&self, filter: &CatalogFilter) -> Result<Vec<CandidateItem>, StoreError>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    fn get_profile(&self, learner_id: u64) -> Result<LearnerProfile, StoreError> {
        (**self).get_profile(learner_id)
    }
}

impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    fn query(&self, filter: &CatalogFilter) -> Result<Vec<CandidateItem>, StoreError> {
        (**self).query(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryCatalog;
    use rstest::rstest;

    fn open_internship(id: u64, category: &str) -> CandidateItem {
        CandidateItem::new(id, ItemKind::Internship, format!("Internship {id}"))
            .with_status(ItemStatus::Open)
            .with_category(category)
    }

    #[rstest]
    fn filter_predicates_are_conjunctive() {
        let item = open_internship(1, "engineering").with_location("Remote");
        let matching = CatalogFilter::open_items()
            .with_kind(ItemKind::Internship)
            .with_category("engineering")
            .with_location("Remote");
        let wrong_category = CatalogFilter::open_items().with_category("design");
        assert!(matching.matches(&item));
        assert!(!wrong_category.matches(&item));
    }

    #[rstest]
    fn deadline_filter_passes_items_without_deadline() {
        let filter = CatalogFilter::any().with_deadline_after(Timestamp::from_unix_seconds(100));
        let undated = open_internship(1, "engineering");
        let dated = open_internship(2, "engineering")
            .with_deadline(Timestamp::from_unix_seconds(100));
        assert!(filter.matches(&undated));
        // An exact tie counts as passed: the deadline must be strictly later.
        assert!(!filter.matches(&dated));
    }

    #[rstest]
    fn memory_catalog_sorts_and_bounds_results() {
        let catalog = MemoryCatalog::with_items([
            open_internship(3, "engineering"),
            open_internship(1, "engineering"),
            open_internship(2, "engineering"),
        ]);
        let found = catalog
            .query(&CatalogFilter::open_items().with_max_results(2))
            .unwrap();
        let ids: Vec<_> = found.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    fn unavailable_wraps_source() {
        let error = StoreError::unavailable(std::io::Error::other("connection refused"));
        assert!(matches!(error, StoreError::Unavailable { .. }));
        assert_eq!(error.to_string(), "backing store unavailable");
    }
}
