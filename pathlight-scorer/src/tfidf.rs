//! Term-frequency / inverse-document-frequency vectors over item
//! descriptions.
//!
//! The model is plain data: fit it from a corpus, keep it on the stack or
//! pass it by value, and drop it with the request. Nothing here is cached in
//! module state, so concurrent requests can each hold their own model (or
//! share one immutably) without coordination.

use std::collections::BTreeMap;

/// Corpus statistics mapping terms to vector dimensions.
///
/// # Examples
/// ```
/// use pathlight_scorer::TfIdfModel;
///
/// let model = TfIdfModel::fit(["rust systems programming", "frontend javascript"]);
/// let vector = model.vector("rust programming");
/// assert_eq!(vector.len(), model.vocabulary_size());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfModel {
    terms: BTreeMap<String, usize>,
    idf: Vec<f32>,
    document_count: usize,
}

impl TfIdfModel {
    /// Fit a model from a corpus of documents.
    ///
    /// Terms are lowercased alphanumeric runs; everything else separates
    /// tokens. An empty corpus yields an empty vocabulary and every vector
    /// it produces is empty.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "inverse document frequency is a smoothed log ratio of bounded counts"
    )]
    pub fn fit<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        let mut document_count = 0_usize;
        for document in documents {
            document_count += 1;
            let mut seen: Vec<String> = tokenize(document.as_ref()).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, frequency)) in document_frequency.into_iter().enumerate() {
            terms.insert(term, index);
            // Smoothed IDF keeps terms present in every document at a small
            // positive weight instead of zeroing them out.
            let ratio = (1.0 + document_count as f32) / (1.0 + frequency as f32);
            idf.push(ratio.ln() + 1.0);
        }

        Self {
            terms,
            idf,
            document_count,
        }
    }

    /// Number of distinct terms in the fitted vocabulary.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Number of documents the model was fitted on.
    #[must_use]
    pub const fn document_count(&self) -> usize {
        self.document_count
    }

    /// Produce the TF-IDF vector for a piece of text.
    ///
    /// Terms outside the fitted vocabulary are ignored; magnitudes are left
    /// unnormalised because cosine similarity normalises at comparison
    /// time.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "term weights multiply counts by inverse document frequency"
    )]
    pub fn vector(&self, text: &str) -> Vec<f32> {
        let mut counts = vec![0.0_f32; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&index) = self.terms.get(&token)
                && let Some(slot) = counts.get_mut(index)
            {
                *slot += 1.0;
            }
        }
        counts
            .iter()
            .zip(&self.idf)
            .map(|(count, weight)| count * weight)
            .collect()
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|character: char| !character.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::cosine_similarity;
    use rstest::rstest;

    #[rstest]
    fn vocabulary_spans_all_documents() {
        let model = TfIdfModel::fit(["alpha beta", "beta gamma"]);
        assert_eq!(model.vocabulary_size(), 3);
        assert_eq!(model.document_count(), 2);
    }

    #[rstest]
    fn vectors_have_vocabulary_dimensions() {
        let model = TfIdfModel::fit(["alpha beta", "beta gamma"]);
        assert_eq!(model.vector("alpha").len(), 3);
        assert_eq!(model.vector("").len(), 3);
    }

    #[rstest]
    fn unknown_terms_are_ignored() {
        let model = TfIdfModel::fit(["alpha beta"]);
        let vector = model.vector("delta epsilon");
        assert!(vector.iter().all(|weight| *weight == 0.0));
    }

    #[rstest]
    fn tokenisation_is_case_insensitive() {
        let model = TfIdfModel::fit(["Rust Programming"]);
        let upper = model.vector("RUST");
        let lower = model.vector("rust");
        assert_eq!(upper, lower);
        assert!(upper.iter().any(|weight| *weight > 0.0));
    }

    #[rstest]
    fn similar_documents_outscore_dissimilar_ones() {
        let systems = "advanced rust systems programming";
        let intro = "introductory rust programming";
        let painting = "watercolour painting for beginners";
        let model = TfIdfModel::fit([systems, intro, painting]);
        let reference = model.vector(systems);
        let related = model.vector(intro);
        let unrelated = model.vector(painting);
        assert!(
            cosine_similarity(&reference, &related) > cosine_similarity(&reference, &unrelated)
        );
    }

    #[rstest]
    fn empty_corpus_produces_empty_vectors() {
        let model = TfIdfModel::fit(std::iter::empty::<&str>());
        assert_eq!(model.vocabulary_size(), 0);
        assert!(model.vector("anything").is_empty());
    }
}
