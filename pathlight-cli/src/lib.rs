//! Command-line interface for Pathlight's offline tooling.
#![forbid(unsafe_code)]

use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use thiserror::Error;

use pathlight_core::{RecommendError, SqliteStoreError};
use pathlight_scorer::VectorsError;

mod index;
mod recommend;

pub(crate) use index::IndexArgs;
pub(crate) use recommend::RecommendArgs;

pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_LEARNER: &str = "learner";
pub(crate) const ENV_INDEX_DATABASE: &str = "PATHLIGHT_CMDS_INDEX_DATABASE";
pub(crate) const ENV_RECOMMEND_DATABASE: &str = "PATHLIGHT_CMDS_RECOMMEND_DATABASE";
pub(crate) const ENV_RECOMMEND_LEARNER: &str = "PATHLIGHT_CMDS_RECOMMEND_LEARNER";

/// Run the Pathlight CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Index(args) => index::run_index(args, &mut stdout),
        Command::Recommend(args) => recommend::run_recommend(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pathlight",
    about = "Offline catalogue tooling for the Pathlight matching engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the content-similarity vectors artefact from a catalogue.
    Index(IndexArgs),
    /// Produce ranked recommendations for a learner.
    Recommend(RecommendArgs),
}

/// Errors emitted by the Pathlight CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing CLI flag.
        field: &'static str,
        /// Environment variable that can supply it instead.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path} does not exist")]
    MissingSourceFile {
        /// Name of the CLI flag that referenced the path.
        field: &'static str,
        /// The path that was not found.
        path: Utf8PathBuf,
    },
    /// The catalogue database failed to open or validate.
    #[error(transparent)]
    Store(#[from] SqliteStoreError),
    /// The vectors artefact failed to write or load.
    #[error(transparent)]
    Vectors(#[from] VectorsError),
    /// The recommendation pipeline failed.
    #[error("recommendation failed")]
    Recommend {
        /// Failure raised by the recommender.
        #[source]
        source: RecommendError,
    },
    /// Serialising the response to JSON failed.
    #[error("failed to serialise output")]
    SerialiseOutput(#[from] serde_json::Error),
    /// Writing to the output stream failed.
    #[error("failed to write output")]
    WriteOutput(#[source] std::io::Error),
}

pub(crate) fn require_existing(
    path: &camino::Utf8Path,
    field: &'static str,
) -> Result<(), CliError> {
    if path.as_std_path().is_file() {
        Ok(())
    } else {
        Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests;
