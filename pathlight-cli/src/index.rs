//! Index command: build the content-similarity vectors artefact.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use pathlight_core::SqliteStore;
use pathlight_scorer::write_vectors_file;

use crate::{ARG_DATABASE, CliError, ENV_INDEX_DATABASE, require_existing};

/// CLI arguments for the `index` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fit a TF-IDF model over every item description in the \
                 catalogue database and persist one term vector per item. \
                 Paths can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Build the vectors.bin artefact from a catalogue database"
)]
#[ortho_config(prefix = "PATHLIGHT")]
pub(crate) struct IndexArgs {
    /// Path to the catalogue SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Path the vectors artefact is written to.
    #[arg(long = "output", value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Directory holding default artefact filenames.
    #[arg(long = "artefacts-dir", value_name = "dir")]
    #[serde(default)]
    pub(crate) artefacts_dir: Option<Utf8PathBuf>,
}

impl IndexArgs {
    fn into_config(self) -> Result<IndexConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        IndexConfig::try_from(merged)
    }
}

/// Resolved `index` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IndexConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) output: Utf8PathBuf,
}

impl TryFrom<IndexArgs> for IndexConfig {
    type Error = CliError;

    fn try_from(args: IndexArgs) -> Result<Self, Self::Error> {
        let artefacts_dir = args.artefacts_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_INDEX_DATABASE,
        })?;
        let output = args
            .output
            .unwrap_or_else(|| artefacts_dir.join("vectors.bin"));
        Ok(Self { database, output })
    }
}

/// Summary written to stdout after a successful index run.
#[derive(Debug, Serialize)]
struct IndexSummary {
    items: usize,
    output: Utf8PathBuf,
}

pub(crate) fn run_index(args: IndexArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.database, ARG_DATABASE)?;

    let store = SqliteStore::open(config.database.as_std_path())?;
    let vectors = write_vectors_file(store.items(), &config.output)?;

    let summary = IndexSummary {
        items: vectors.len(),
        output: config.output,
    };
    let payload = serde_json::to_string_pretty(&summary)?;
    writer
        .write_all(payload.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_for_test(args: IndexArgs) -> Result<IndexConfig, CliError> {
    IndexConfig::try_from(args)
}
