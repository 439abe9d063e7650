//! Scoring utilities for Pathlight catalogue items.
//!
//! The crate provides two complementary capabilities:
//! - **Offline vector computation** fits a TF-IDF model over every item
//!   description in a catalogue, produces one term vector per item, and
//!   optionally serialises the result to `vectors.bin` via `bincode`. The
//!   vectors feed content-similarity lookups ("learners who finished this
//!   also match that").
//! - **Request-time match scoring** combines the pure metric functions
//!   (skill-match ratio, education and location comparison, compensation
//!   closeness) into a weighted composite via [`Ranker`], gates hard
//!   constraints through [`check_eligibility`], and yields deterministic,
//!   identifier-tie-broken rankings.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use pathlight_core::{CandidateItem, ItemKind};
//! use pathlight_scorer::write_vectors_file;
//!
//! let items = vec![
//!     CandidateItem::new(1, ItemKind::Course, "Rust basics")
//!         .with_description("ownership borrowing lifetimes"),
//! ];
//! let output = Utf8Path::new("artifacts/vectors.bin");
//! write_vectors_file(&items, output).expect("persist catalogue vectors");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use std::fs::File;
use std::io::BufWriter;

use bincode::Options;
use camino::Utf8Path;
use pathlight_core::CandidateItem;

mod artifact;
mod eligibility;
mod error;
mod metrics;
mod rank;
mod tfidf;
mod vectors;

pub use eligibility::{
    EligibilityReport, IneligibilityReason, SKILL_MATCH_THRESHOLD, check_eligibility,
};
pub use error::VectorsError;
pub use metrics::{
    LOCATION_PARTIAL_CREDIT, MIN_PROFICIENCY, compensation_score, cosine_similarity,
    education_score, location_score, matched_skill_count, sanitise, skill_match_score,
};
pub use rank::{
    Factor, InvalidWeights, NEUTRAL_COMPENSATION, RankedCandidate, Ranker, ScoreBreakdown,
    WeightConfig, sort_by_score,
};
pub use tfidf::TfIdfModel;
pub use vectors::CatalogVectors;

use artifact::ensure_parent_dir;

/// Bincode options used for serialising and deserialising catalogue
/// vectors.
pub(crate) fn bincode_options() -> impl bincode::Options {
    bincode::DefaultOptions::new()
}

/// Public helper exposing the bincode configuration used for vector files.
#[must_use]
pub fn vectors_bincode_options() -> impl bincode::Options {
    bincode_options()
}

/// Compute catalogue vectors and persist them to `vectors.bin`.
///
/// The parent directory is created when missing. The function returns the
/// in-memory vectors as well as writing them to disk.
///
/// # Errors
/// Returns [`VectorsError`] when the output file cannot be created or the
/// vectors fail to serialise.
pub fn write_vectors_file(
    items: &[CandidateItem],
    output_path: &Utf8Path,
) -> Result<CatalogVectors, VectorsError> {
    let vectors = CatalogVectors::build(items);
    ensure_parent_dir(output_path).map_err(|source| VectorsError::CreateParent {
        path: output_path
            .parent()
            .map_or_else(|| Utf8Path::new(".").to_path_buf(), Utf8Path::to_path_buf),
        source,
    })?;
    let file =
        File::create(output_path.as_std_path()).map_err(|source| VectorsError::WriteFile {
            path: output_path.to_path_buf(),
            source,
        })?;
    let writer = BufWriter::new(file);
    bincode_options()
        .serialize_into(writer, &vectors)
        .map_err(|source| VectorsError::Serialise {
            path: output_path.to_path_buf(),
            source,
        })?;
    Ok(vectors)
}

/// Load catalogue vectors previously written by [`write_vectors_file`].
///
/// # Errors
/// Returns [`VectorsError`] when the artefact is unreadable or fails to
/// decode.
pub fn load_vectors_file(path: &Utf8Path) -> Result<CatalogVectors, VectorsError> {
    let bytes = std::fs::read(path.as_std_path()).map_err(|source| VectorsError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    bincode_options()
        .deserialize(&bytes)
        .map_err(|source| VectorsError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    //! Round-trip coverage for the vectors artefact.

    use super::*;
    use camino::Utf8PathBuf;
    use pathlight_core::ItemKind;
    use tempfile::TempDir;

    fn course(id: u64, description: &str) -> CandidateItem {
        CandidateItem::new(id, ItemKind::Course, format!("Course {id}"))
            .with_description(description)
    }

    #[test]
    fn written_vectors_load_back() {
        let temp = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(temp.path().join("artifacts/vectors.bin"))
            .expect("utf8 path");
        let items = vec![
            course(1, "rust ownership and borrowing"),
            course(2, "async networking in rust"),
        ];

        let written = write_vectors_file(&items, &path).expect("write vectors");
        let loaded = load_vectors_file(&path).expect("load vectors");
        assert_eq!(written, loaded);
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn loading_missing_file_reports_path() {
        let error = load_vectors_file(Utf8Path::new("/nonexistent/vectors.bin"))
            .expect_err("missing file");
        assert!(matches!(error, VectorsError::ReadFile { .. }));
    }

    #[test]
    fn corrupted_artefact_fails_to_decode() {
        let temp = TempDir::new().expect("tempdir");
        let path =
            Utf8PathBuf::from_path_buf(temp.path().join("vectors.bin")).expect("utf8 path");
        std::fs::write(path.as_std_path(), b"not-bincode-data-at-all").expect("write corrupt");
        let error = load_vectors_file(&path).expect_err("corrupt file");
        assert!(matches!(error, VectorsError::Decode { .. }));
    }
}
