//! Test-only, in-memory store and clock implementations used by unit and
//! behaviour tests.

use std::collections::HashMap;

use crate::{
    CandidateItem, CatalogFilter, CatalogStore, Clock, LearnerProfile, ProfileStore, StoreError,
    Timestamp,
};

/// In-memory `CatalogStore` performing a linear scan.
///
/// Intended only for small datasets in tests.
#[derive(Default, Debug)]
pub struct MemoryCatalog {
    items: Vec<CandidateItem>,
}

impl MemoryCatalog {
    /// Create a catalogue containing a single item.
    #[must_use]
    pub fn with_item(item: CandidateItem) -> Self {
        Self::with_items(std::iter::once(item))
    }

    /// Create a catalogue from a collection of items.
    pub fn with_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = CandidateItem>,
    {
        Self {
            items: items.into_iter().collect(),
        }
    }
}

impl CatalogStore for MemoryCatalog {
    fn query(&self, filter: &CatalogFilter) -> Result<Vec<CandidateItem>, StoreError> {
        let mut found: Vec<_> = self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        found.sort_unstable_by_key(|item| item.id);
        if let Some(max) = filter.max_results {
            found.truncate(max);
        }
        Ok(found)
    }
}

/// In-memory `ProfileStore` keyed by learner identifier.
#[derive(Default, Debug)]
pub struct MemoryProfiles {
    profiles: HashMap<u64, LearnerProfile>,
}

impl MemoryProfiles {
    /// Create a store containing a single profile.
    #[must_use]
    pub fn with_profile(profile: LearnerProfile) -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(profile.id, profile);
        Self { profiles }
    }

    /// Insert a profile.
    pub fn insert(&mut self, profile: LearnerProfile) {
        self.profiles.insert(profile.id, profile);
    }
}

impl ProfileStore for MemoryProfiles {
    fn get_profile(&self, learner_id: u64) -> Result<LearnerProfile, StoreError> {
        self.profiles
            .get(&learner_id)
            .cloned()
            .ok_or(StoreError::ProfileNotFound { learner_id })
    }
}

/// Store that always reports the backend as unreachable.
///
/// Implements both store traits so either collaborator can be made to fail.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnavailableStore;

impl CatalogStore for UnavailableStore {
    fn query(&self, _filter: &CatalogFilter) -> Result<Vec<CandidateItem>, StoreError> {
        Err(StoreError::unavailable(std::io::Error::other(
            "catalogue offline",
        )))
    }
}

impl ProfileStore for UnavailableStore {
    fn get_profile(&self, _learner_id: u64) -> Result<LearnerProfile, StoreError> {
        Err(StoreError::unavailable(std::io::Error::other(
            "profiles offline",
        )))
    }
}

/// Deterministic clock pinned to a fixed instant.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    /// Clock pinned to the given seconds-since-epoch value.
    #[must_use]
    pub const fn at(seconds: i64) -> Self {
        Self(Timestamp::from_unix_seconds(seconds))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
