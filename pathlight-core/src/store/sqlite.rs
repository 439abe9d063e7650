//! SQLite-backed store implementation for catalogue items and learner
//! profiles.
//!
//! The store loads every row eagerly at open time and serves queries from
//! memory, which keeps it `Send + Sync` without locking a connection. It is
//! aimed at the offline tooling and at test fixtures, not at a production
//! database tier.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::{
    CandidateItem, CatalogFilter, CompletedItem, LearnerProfile, StoreError, Timestamp,
};

use super::{CatalogStore, ProfileStore};

/// Error raised when reading or validating persisted catalogue artefacts.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Preparing or executing a query failed.
    #[error("failed to query {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A row identifier could not be represented as `u64`.
    #[error("identifier {id} is outside the supported range")]
    IdOutOfRange {
        /// Identifier read from SQLite.
        id: i64,
    },
    /// A JSON payload column failed to parse.
    #[error("failed to parse {column} for row {id}")]
    InvalidPayload {
        /// Name of the offending column.
        column: &'static str,
        /// Identifier of the affected row.
        id: u64,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// An enum column held an unrecognised value.
    #[error("unrecognised {column} value '{value}' for row {id}")]
    UnknownValue {
        /// Name of the offending column.
        column: &'static str,
        /// Identifier of the affected row.
        id: u64,
        /// Raw value found in the database.
        value: String,
    },
}

/// Read-only catalogue and profile store backed by a single SQLite file.
///
/// Expects `items`, `learners`, and `completions` tables; skill payloads are
/// JSON columns.
pub struct SqliteStore {
    items: Vec<CandidateItem>,
    profiles: HashMap<u64, LearnerProfile>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("items", &self.items.len())
            .field("profiles", &self.profiles.len())
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open a store backed by the provided SQLite database.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError`] when the database cannot be opened or a
    /// row fails validation.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, SqliteStoreError> {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteStoreError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;

        let mut items = load_items(&connection)?;
        items.sort_unstable_by_key(|item| item.id);
        let mut profiles = load_learners(&connection)?;
        load_completions(&connection, &mut profiles)?;

        Ok(Self { items, profiles })
    }

    /// Number of catalogue items loaded.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// All loaded items, sorted by ascending identifier.
    #[must_use]
    pub fn items(&self) -> &[CandidateItem] {
        &self.items
    }
}

impl CatalogStore for SqliteStore {
    fn query(&self, filter: &CatalogFilter) -> Result<Vec<CandidateItem>, StoreError> {
        let mut found: Vec<_> = self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        if let Some(max) = filter.max_results {
            found.truncate(max);
        }
        Ok(found)
    }
}

impl ProfileStore for SqliteStore {
    fn get_profile(&self, learner_id: u64) -> Result<LearnerProfile, StoreError> {
        self.profiles
            .get(&learner_id)
            .cloned()
            .ok_or(StoreError::ProfileNotFound { learner_id })
    }
}

fn to_u64(raw: i64) -> Result<u64, SqliteStoreError> {
    u64::try_from(raw).map_err(|_| SqliteStoreError::IdOutOfRange { id: raw })
}

fn parse_column<T: FromStr>(
    column: &'static str,
    id: u64,
    value: &str,
) -> Result<T, SqliteStoreError> {
    value
        .parse()
        .map_err(|_| SqliteStoreError::UnknownValue {
            column,
            id,
            value: value.to_owned(),
        })
}

fn parse_optional_column<T: FromStr>(
    column: &'static str,
    id: u64,
    value: Option<&str>,
) -> Result<Option<T>, SqliteStoreError> {
    value.map(|raw| parse_column(column, id, raw)).transpose()
}

struct ItemRow {
    id: i64,
    kind: String,
    title: String,
    description: String,
    category: Option<String>,
    required_skills: String,
    difficulty: String,
    required_education: Option<String>,
    location: Option<String>,
    compensation: Option<f32>,
    deadline: Option<i64>,
    status: String,
    rating: f32,
    enrolment_count: i64,
}

fn load_items(connection: &Connection) -> Result<Vec<CandidateItem>, SqliteStoreError> {
    let mut statement = connection
        .prepare(
            "SELECT id, kind, title, description, category, required_skills, difficulty,
                    required_education, location, compensation, deadline, status, rating,
                    enrolment_count
             FROM items",
        )
        .map_err(|source| SqliteStoreError::Query {
            operation: "prepare item selection",
            source,
        })?;

    let rows = statement
        .query_map([], |row| {
            Ok(ItemRow {
                id: row.get(0)?,
                kind: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                category: row.get(4)?,
                required_skills: row.get(5)?,
                difficulty: row.get(6)?,
                required_education: row.get(7)?,
                location: row.get(8)?,
                compensation: row.get(9)?,
                deadline: row.get(10)?,
                status: row.get(11)?,
                rating: row.get(12)?,
                enrolment_count: row.get(13)?,
            })
        })
        .map_err(|source| SqliteStoreError::Query {
            operation: "query items",
            source,
        })?;

    let mut items = Vec::new();
    for row in rows {
        let raw = row.map_err(|source| SqliteStoreError::Query {
            operation: "read item row",
            source,
        })?;
        items.push(item_from_row(raw)?);
    }
    Ok(items)
}

fn item_from_row(row: ItemRow) -> Result<CandidateItem, SqliteStoreError> {
    let id = to_u64(row.id)?;
    let required_skills: Vec<String> = serde_json::from_str(&row.required_skills)
        .map_err(|source| SqliteStoreError::InvalidPayload {
            column: "required_skills",
            id,
            source,
        })?;
    let enrolment_count = u32::try_from(row.enrolment_count)
        .map_err(|_| SqliteStoreError::IdOutOfRange {
            id: row.enrolment_count,
        })?;

    Ok(CandidateItem {
        id,
        kind: parse_column("kind", id, &row.kind)?,
        title: row.title,
        description: row.description,
        category: row.category,
        required_skills,
        difficulty: parse_column("difficulty", id, &row.difficulty)?,
        required_education: parse_optional_column(
            "required_education",
            id,
            row.required_education.as_deref(),
        )?,
        location: row.location,
        compensation: row.compensation,
        deadline: row.deadline.map(Timestamp::from_unix_seconds),
        status: parse_column("status", id, &row.status)?,
        rating: row.rating,
        enrolment_count,
    })
}

fn load_learners(
    connection: &Connection,
) -> Result<HashMap<u64, LearnerProfile>, SqliteStoreError> {
    let mut statement = connection
        .prepare(
            "SELECT id, education, preferred_location, expected_compensation, skills
             FROM learners",
        )
        .map_err(|source| SqliteStoreError::Query {
            operation: "prepare learner selection",
            source,
        })?;

    let rows = statement
        .query_map([], |row| {
            let id: i64 = row.get(0)?;
            let education: Option<String> = row.get(1)?;
            let preferred_location: Option<String> = row.get(2)?;
            let expected_compensation: Option<f32> = row.get(3)?;
            let skills: String = row.get(4)?;
            Ok((id, education, preferred_location, expected_compensation, skills))
        })
        .map_err(|source| SqliteStoreError::Query {
            operation: "query learners",
            source,
        })?;

    let mut profiles = HashMap::new();
    for row in rows {
        let (raw_id, education, preferred_location, expected_compensation, skills_json) =
            row.map_err(|source| SqliteStoreError::Query {
                operation: "read learner row",
                source,
            })?;
        let id = to_u64(raw_id)?;
        let skills: HashMap<String, String> = serde_json::from_str(&skills_json).map_err(
            |source| SqliteStoreError::InvalidPayload {
                column: "skills",
                id,
                source,
            },
        )?;

        let mut profile = LearnerProfile::new(id);
        profile.education = parse_optional_column("education", id, education.as_deref())?;
        profile.preferred_location = preferred_location;
        profile.expected_compensation = expected_compensation;
        for (name, level) in skills {
            profile.set_skill(name, parse_column("skills", id, &level)?);
        }
        profiles.insert(id, profile);
    }
    Ok(profiles)
}

fn load_completions(
    connection: &Connection,
    profiles: &mut HashMap<u64, LearnerProfile>,
) -> Result<(), SqliteStoreError> {
    let mut statement = connection
        .prepare("SELECT learner_id, item_id, score, completed_at FROM completions")
        .map_err(|source| SqliteStoreError::Query {
            operation: "prepare completion selection",
            source,
        })?;

    let rows = statement
        .query_map([], |row| {
            let learner_id: i64 = row.get(0)?;
            let item_id: i64 = row.get(1)?;
            let score: f32 = row.get(2)?;
            let completed_at: i64 = row.get(3)?;
            Ok((learner_id, item_id, score, completed_at))
        })
        .map_err(|source| SqliteStoreError::Query {
            operation: "query completions",
            source,
        })?;

    for row in rows {
        let (raw_learner, raw_item, score, completed_at) =
            row.map_err(|source| SqliteStoreError::Query {
                operation: "read completion row",
                source,
            })?;
        let learner_id = to_u64(raw_learner)?;
        let completion = CompletedItem {
            item_id: to_u64(raw_item)?,
            score,
            completed_at: Timestamp::from_unix_seconds(completed_at),
        };
        // Completions for unknown learners are skipped rather than fatal;
        // the profile row is the source of truth for existence.
        if let Some(profile) = profiles.get_mut(&learner_id) {
            profile.record_completion(completion);
        }
    }
    Ok(())
}
