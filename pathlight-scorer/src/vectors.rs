//! Per-item term vectors and content-similarity ranking.

use std::collections::BTreeMap;

use pathlight_core::CandidateItem;
use serde::{Deserialize, Serialize};

use crate::metrics::cosine_similarity;
use crate::tfidf::TfIdfModel;

/// TF-IDF vectors keyed by catalogue item identifier.
///
/// Built offline from the full catalogue and persisted to `vectors.bin`, or
/// built on the fly from an in-memory item set. The wrapper is immutable
/// after construction, so one instance can serve concurrent requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogVectors {
    vectors: BTreeMap<u64, Vec<f32>>,
}

impl CatalogVectors {
    /// Construct from a pre-computed map.
    #[must_use]
    pub const fn new(vectors: BTreeMap<u64, Vec<f32>>) -> Self {
        Self { vectors }
    }

    /// Fit a TF-IDF model over the items' descriptions and vectorise each
    /// item.
    #[must_use]
    pub fn build(items: &[CandidateItem]) -> Self {
        let model = TfIdfModel::fit(items.iter().map(|item| item.description.as_str()));
        let vectors = items
            .iter()
            .map(|item| (item.id, model.vector(&item.description)))
            .collect();
        Self { vectors }
    }

    /// Return the vector for an item, if present.
    #[must_use]
    pub fn get(&self, item_id: u64) -> Option<&[f32]> {
        self.vectors.get(&item_id).map(Vec::as_slice)
    }

    /// Number of vectorised items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Report whether any vectors are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Consume the wrapper and return the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<u64, Vec<f32>> {
        self.vectors
    }

    /// Cosine similarity between two items' vectors.
    ///
    /// Unknown identifiers score `0.0`.
    #[must_use]
    pub fn similarity(&self, a: u64, b: u64) -> f32 {
        match (self.get(a), self.get(b)) {
            (Some(vector_a), Some(vector_b)) => cosine_similarity(vector_a, vector_b),
            _ => 0.0,
        }
    }

    /// Rank other items by similarity to `reference`, most similar first.
    ///
    /// The reference item is excluded from its own results. Ties order by
    /// ascending identifier; an unknown reference yields no results.
    #[must_use]
    pub fn similar_to(&self, reference: u64, limit: usize) -> Vec<(u64, f32)> {
        let Some(reference_vector) = self.get(reference) else {
            log::debug!("similarity requested for unvectorised item {reference}");
            return Vec::new();
        };
        let mut scored: Vec<(u64, f32)> = self
            .vectors
            .iter()
            .filter(|(id, _)| **id != reference)
            .map(|(id, vector)| (*id, cosine_similarity(reference_vector, vector)))
            .collect();
        scored.sort_unstable_by(|(lhs_id, lhs_score), (rhs_id, rhs_score)| {
            rhs_score
                .partial_cmp(lhs_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| lhs_id.cmp(rhs_id))
        });
        scored.truncate(limit);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlight_core::{CandidateItem, ItemKind};
    use rstest::{fixture, rstest};

    fn course(id: u64, description: &str) -> CandidateItem {
        CandidateItem::new(id, ItemKind::Course, format!("Course {id}"))
            .with_description(description)
    }

    #[fixture]
    fn sample_vectors() -> CatalogVectors {
        CatalogVectors::build(&[
            course(1, "rust systems programming"),
            course(2, "rust programming fundamentals"),
            course(3, "figure drawing and portraiture"),
        ])
    }

    #[rstest]
    fn build_vectorises_every_item(sample_vectors: CatalogVectors) {
        assert_eq!(sample_vectors.len(), 3);
        assert!(sample_vectors.get(2).is_some());
        assert!(sample_vectors.get(99).is_none());
    }

    #[rstest]
    fn similar_items_rank_by_content(sample_vectors: CatalogVectors) {
        let similar = sample_vectors.similar_to(1, 2);
        let ids: Vec<_> = similar.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[rstest]
    fn reference_excluded_from_results(sample_vectors: CatalogVectors) {
        let similar = sample_vectors.similar_to(1, 10);
        assert!(similar.iter().all(|(id, _)| *id != 1));
        assert_eq!(similar.len(), 2);
    }

    #[rstest]
    fn unknown_reference_yields_nothing(sample_vectors: CatalogVectors) {
        assert!(sample_vectors.similar_to(42, 5).is_empty());
    }

    #[rstest]
    fn identical_descriptions_tie_break_by_id() {
        let vectors = CatalogVectors::build(&[
            course(5, "identical text"),
            course(3, "identical text"),
            course(4, "identical text"),
        ]);
        let similar = vectors.similar_to(5, 10);
        let ids: Vec<_> = similar.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
