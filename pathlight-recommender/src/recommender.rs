//! `MatchingRecommender` implementation over the store and clock
//! boundaries.

use std::time::Instant;

use pathlight_core::{
    CandidateItem, CatalogFilter, CatalogStore, Clock, Diagnostics, LearnerProfile, ProfileStore,
    Recommend, RecommendError, RecommendRequest, RecommendResponse, Recommendation, Timestamp,
};
use pathlight_scorer::{
    EligibilityReport, Ranker, WeightConfig, check_eligibility, sanitise, sort_by_score,
};

use crate::Exploration;

/// Upper bound on candidates fetched per request, keeping ranking cost
/// bounded regardless of catalogue size.
pub const MAX_CANDIDATES: usize = 200;

/// Configuration for [`MatchingRecommender`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderConfig {
    /// Factor weights handed to the ranker. Expected to sum to `1.0`.
    pub weights: WeightConfig,
    /// Fetch bound applied to every catalogue query.
    pub max_candidates: usize,
    /// Optional seeded jitter applied before the final sort.
    pub exploration: Option<Exploration>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            max_candidates: MAX_CANDIDATES,
            exploration: None,
        }
    }
}

/// A candidate annotated with its eligibility outcome.
///
/// Produced by [`MatchingRecommender::evaluate`], which keeps ineligible
/// items and reports why they failed instead of dropping them.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedCandidate {
    /// The evaluated item.
    pub item: CandidateItem,
    /// The full eligibility outcome, failures included.
    pub report: EligibilityReport,
}

/// Default recommender: fetch, gate, rank, truncate.
///
/// The recommender is generic over the engine boundaries: a read-only
/// profile store, a read-only catalogue store, and an injected clock. Each
/// request is an independent, stateless computation over data fetched at
/// request time; the instance holds no mutable state and can serve
/// concurrent requests.
///
/// # Examples
/// ```
/// use pathlight_core::test_support::{FixedClock, MemoryCatalog, MemoryProfiles};
/// use pathlight_core::{LearnerProfile, Recommend, RecommendRequest};
/// use pathlight_recommender::MatchingRecommender;
///
/// let profiles = MemoryProfiles::with_profile(LearnerProfile::new(1));
/// let recommender =
///     MatchingRecommender::new(profiles, MemoryCatalog::default(), FixedClock::at(0));
/// let response = recommender.recommend(&RecommendRequest::new(1))?;
/// assert!(response.recommendations.is_empty());
/// # Ok::<(), pathlight_core::RecommendError>(())
/// ```
pub struct MatchingRecommender<P, C, K>
where
    P: ProfileStore,
    C: CatalogStore,
    K: Clock,
{
    profiles: P,
    catalog: C,
    clock: K,
    ranker: Ranker,
    max_candidates: usize,
    exploration: Option<Exploration>,
}

impl<P, C, K> MatchingRecommender<P, C, K>
where
    P: ProfileStore,
    C: CatalogStore,
    K: Clock,
{
    /// Construct a recommender using default configuration.
    #[must_use]
    pub fn new(profiles: P, catalog: C, clock: K) -> Self {
        Self {
            profiles,
            catalog,
            clock,
            ranker: Ranker::default(),
            max_candidates: MAX_CANDIDATES,
            exploration: None,
        }
    }

    /// Construct a recommender with explicit configuration.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidConfiguration`] when the weights
    /// are malformed. Validation happens here, before any request touches
    /// a store.
    pub fn with_config(
        profiles: P,
        catalog: C,
        clock: K,
        config: RecommenderConfig,
    ) -> Result<Self, RecommendError> {
        let ranker =
            Ranker::new(config.weights).map_err(|_| RecommendError::InvalidConfiguration {
                reason: "weights must be finite, non-negative, and total more than zero",
            })?;
        Ok(Self {
            profiles,
            catalog,
            clock,
            ranker,
            max_candidates: config.max_candidates,
            exploration: config.exploration,
        })
    }

    /// Annotate every fetched candidate with its eligibility outcome.
    ///
    /// Unlike [`Recommend::recommend`], which drops ineligible items, this
    /// entry point keeps them and reports every failed check — the mode
    /// used by audit and "why am I not seeing this?" surfaces. No ranking
    /// is applied; results keep the store's ascending-identifier order.
    ///
    /// # Errors
    /// Propagates the same failures as [`Recommend::recommend`].
    pub fn evaluate(&self, learner_id: u64) -> Result<Vec<EvaluatedCandidate>, RecommendError> {
        let learner = self.profiles.get_profile(learner_id)?;
        let now = self.clock.now();
        let filter = CatalogFilter::any().with_max_results(self.max_candidates);
        let candidates = self.catalog.query(&filter)?;
        Ok(candidates
            .into_iter()
            .map(|item| {
                let report = check_eligibility(&item, &learner, now);
                EvaluatedCandidate { item, report }
            })
            .collect())
    }

    fn gate_candidates(
        &self,
        candidates: Vec<CandidateItem>,
        learner: &LearnerProfile,
        request: &RecommendRequest,
        now: Timestamp,
    ) -> Vec<CandidateItem> {
        let fetched = candidates.len();
        let survivors: Vec<CandidateItem> = candidates
            .into_iter()
            .filter(|item| request.include_completed || !learner.has_completed(item.id))
            .filter(|item| check_eligibility(item, learner, now).eligible)
            .collect();
        log::debug!(
            "eligibility gate kept {} of {} candidates for learner {}",
            survivors.len(),
            fetched,
            learner.id
        );
        survivors
    }
}

impl<P, C, K> Recommend for MatchingRecommender<P, C, K>
where
    P: ProfileStore + Send + Sync,
    C: CatalogStore + Send + Sync,
    K: Clock + Send + Sync,
{
    #[expect(
        clippy::float_arithmetic,
        reason = "exploration adds a bounded jitter to composite scores"
    )]
    fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse, RecommendError> {
        let started_at = Instant::now();
        let learner = self.profiles.get_profile(request.learner_id)?;

        let now = self.clock.now();
        let filter = CatalogFilter::open_items()
            .with_deadline_after(now)
            .with_max_results(self.max_candidates);
        let candidates = self.catalog.query(&filter)?;
        let candidates_evaluated = candidates.len() as u64;

        let survivors = self.gate_candidates(candidates, &learner, request, now);
        let mut ranked = self.ranker.score_candidates(survivors, &learner);
        if let Some(exploration) = self.exploration {
            for entry in &mut ranked {
                entry.score = sanitise(entry.score + exploration.jitter(entry.item.id));
            }
        }
        sort_by_score(&mut ranked);
        ranked.truncate(request.limit);

        let recommendations = ranked
            .into_iter()
            .map(|entry| Recommendation {
                item: entry.item,
                score: entry.score,
                reason: entry.reason,
            })
            .collect();

        Ok(RecommendResponse {
            recommendations,
            diagnostics: Diagnostics {
                candidates_evaluated,
                elapsed: started_at.elapsed(),
            },
        })
    }
}
