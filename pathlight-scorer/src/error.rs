//! Error types raised while persisting or loading catalogue vectors.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while writing or reading the `vectors.bin` artefact.
#[derive(Debug, Error)]
pub enum VectorsError {
    /// Creating the parent directory for the output file failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Writing the vectors artefact failed.
    #[error("failed to write vectors file at {path}")]
    WriteFile {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Reading the vectors artefact failed.
    #[error("failed to read vectors file at {path}")]
    ReadFile {
        /// Path to the vectors artefact.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the vectors to `bincode` failed.
    #[error("failed to serialise catalogue vectors into {path}")]
    Serialise {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// Decoding the vectors artefact failed.
    #[error("failed to decode vectors file at {path}")]
    Decode {
        /// Path to the vectors artefact.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
}
