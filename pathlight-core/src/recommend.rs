//! The recommendation entry point and its request/response types.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CandidateItem, StoreError};

/// Default number of recommendations returned when the caller does not ask
/// for a specific limit.
pub const DEFAULT_LIMIT: usize = 5;

/// Parameters for a recommendation request.
///
/// # Examples
/// ```
/// use pathlight_core::RecommendRequest;
///
/// let request = RecommendRequest::new(42).with_limit(3);
/// assert_eq!(request.limit, 3);
/// assert!(!request.include_completed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecommendRequest {
    /// Learner to recommend for.
    pub learner_id: u64,
    /// Maximum number of results to return.
    pub limit: usize,
    /// Keep items the learner has already completed.
    pub include_completed: bool,
}

impl RecommendRequest {
    /// Construct a request with the default limit.
    #[must_use]
    pub const fn new(learner_id: u64) -> Self {
        Self {
            learner_id,
            limit: DEFAULT_LIMIT,
            include_completed: false,
        }
    }

    /// Override the result limit while returning `self` for chaining.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Keep completed items while returning `self` for chaining.
    #[must_use]
    pub const fn with_include_completed(mut self, include_completed: bool) -> Self {
        self.include_completed = include_completed;
        self
    }
}

/// One ranked candidate with its composite score and reason.
///
/// Results are ephemeral: computed per request, never persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Recommendation {
    /// The recommended item.
    pub item: CandidateItem,
    /// Composite score in `0.0..=1.0`.
    pub score: f32,
    /// Human-readable reason derived from the dominant scoring factor.
    pub reason: String,
}

/// Measurements describing how a response was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostics {
    /// Candidates fetched and considered before gating.
    pub candidates_evaluated: u64,
    /// Wall-clock time spent producing the response.
    pub elapsed: Duration,
}

/// Response from a successful recommendation request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecommendResponse {
    /// Ranked results, highest composite score first.
    pub recommendations: Vec<Recommendation>,
    /// Request measurements.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Recommend::recommend`].
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The learner does not exist. Maps to a 404 at the web layer; not
    /// retryable.
    #[error("learner {learner_id} was not found")]
    ProfileNotFound {
        /// Identifier of the missing learner.
        learner_id: u64,
    },
    /// A backing store was unreachable. Maps to a 503; retryable with
    /// backoff by the caller.
    #[error("recommendation data unavailable")]
    DataUnavailable {
        /// The store failure that interrupted the request.
        #[source]
        source: StoreError,
    },
    /// The configured weights are malformed. Programmer error; fails fast
    /// before any fetch and is never silently normalised.
    #[error("invalid weight configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: &'static str,
    },
}

impl From<StoreError> for RecommendError {
    fn from(source: StoreError) -> Self {
        match source {
            StoreError::ProfileNotFound { learner_id } => Self::ProfileNotFound { learner_id },
            StoreError::Unavailable { .. } => Self::DataUnavailable { source },
        }
    }
}

/// Produce ranked recommendations for a learner.
///
/// Implementations are read-only and idempotent for identical inputs within
/// the same data snapshot, perform no retries, and must be `Send + Sync` so
/// one instance can serve concurrent requests.
pub trait Recommend: Send + Sync {
    /// Recommend items for the learner described by `request`.
    ///
    /// # Errors
    /// Returns [`RecommendError::ProfileNotFound`] for unknown learners and
    /// [`RecommendError::DataUnavailable`] when a collaborator store fails;
    /// store failures propagate unchanged rather than degrading to partial
    /// results.
    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, RecommendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn request_defaults() {
        let request = RecommendRequest::new(7);
        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert!(!request.include_completed);
    }

    #[rstest]
    fn profile_not_found_converts() {
        let error: RecommendError = StoreError::ProfileNotFound { learner_id: 3 }.into();
        assert!(matches!(
            error,
            RecommendError::ProfileNotFound { learner_id: 3 }
        ));
    }

    #[rstest]
    fn unavailable_converts_and_keeps_source() {
        let error: RecommendError =
            StoreError::unavailable(std::io::Error::other("timed out")).into();
        assert!(matches!(error, RecommendError::DataUnavailable { .. }));
        let source = std::error::Error::source(&error);
        assert!(source.is_some());
    }
}
