//! Recommend command: wire the stores and recommender, print ranked
//! results.

use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use pathlight_core::{
    Recommend, RecommendRequest, RecommendResponse, SqliteStore, SystemClock,
};
use pathlight_recommender::{Exploration, MatchingRecommender, RecommenderConfig};

use crate::{
    ARG_DATABASE, ARG_LEARNER, CliError, ENV_RECOMMEND_DATABASE, ENV_RECOMMEND_LEARNER,
    require_existing,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load learner profiles and catalogue items from a SQLite \
                 database, gate and rank the open items for one learner, and \
                 print the ranked results as JSON. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Produce ranked recommendations for a learner"
)]
#[ortho_config(prefix = "PATHLIGHT")]
pub(crate) struct RecommendArgs {
    /// Path to the catalogue SQLite database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Identifier of the learner to recommend for.
    #[arg(long = ARG_LEARNER, value_name = "id")]
    #[serde(default)]
    pub(crate) learner: Option<u64>,
    /// Maximum number of results.
    #[arg(long = "limit", value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Keep items the learner has already completed.
    #[arg(long = "include-completed")]
    #[serde(default)]
    pub(crate) include_completed: bool,
    /// Seed enabling deterministic exploration jitter.
    #[arg(long = "explore-seed", value_name = "seed")]
    #[serde(default)]
    pub(crate) explore_seed: Option<u64>,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) request: RecommendRequest,
    pub(crate) explore_seed: Option<u64>,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_RECOMMEND_DATABASE,
        })?;
        let learner = args.learner.ok_or(CliError::MissingArgument {
            field: ARG_LEARNER,
            env: ENV_RECOMMEND_LEARNER,
        })?;
        let mut request = RecommendRequest::new(learner)
            .with_include_completed(args.include_completed);
        if let Some(limit) = args.limit {
            request = request.with_limit(limit);
        }
        Ok(Self {
            database,
            request,
            explore_seed: args.explore_seed,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.database, ARG_DATABASE)?;

    let response = execute_recommend(&config)?;
    write_response(writer, &response)
}

fn execute_recommend(config: &RecommendConfig) -> Result<RecommendResponse, CliError> {
    let store = Arc::new(SqliteStore::open(config.database.as_std_path())?);
    let exploration = config.explore_seed.map(Exploration::seeded);
    let recommender_config = RecommenderConfig {
        exploration,
        ..RecommenderConfig::default()
    };
    let recommender = MatchingRecommender::with_config(
        Arc::clone(&store),
        store,
        SystemClock,
        recommender_config,
    )
    .map_err(|source| CliError::Recommend { source })?;
    recommender
        .recommend(&config.request)
        .map_err(|source| CliError::Recommend { source })
}

fn write_response(writer: &mut dyn Write, response: &RecommendResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response)?;
    writer
        .write_all(payload.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .map_err(CliError::WriteOutput)
}

#[cfg(test)]
pub(crate) fn config_for_test(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    RecommendConfig::try_from(args)
}
