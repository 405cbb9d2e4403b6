//! # Seed Fixtures
//!
//! Loads activities, campers, and signups from a YAML file into an empty
//! store at startup. Activities have no creation endpoint, so this is how
//! a fresh deployment gets its catalogue.
//!
//! ```yaml
//! activities:
//!   - { name: Archery, difficulty: 2 }
//! campers:
//!   - { name: Ana, age: 12 }
//! signups:
//!   - { time: 9, activity: 1, camper: 1 }
//! ```
//!
//! Signups reference activities and campers by their 1-based position in
//! the file. Field values pass the same validators as API input; a file
//! that fails validation aborts startup.

use std::path::{Path, PathBuf};

use camp_core::{NewActivity, NewCamper, NewSignup, SignupTime};
use serde::Deserialize;
use thiserror::Error;

use crate::service::ServiceError;
use crate::state::AppState;

/// Errors while loading seed fixtures.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("cannot read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The seed file is not valid YAML, or a field failed validation.
    #[error("invalid seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A signup refers to a position with no matching record.
    #[error("signup #{index} refers to {kind} #{position}, but only {available} are defined")]
    BadReference {
        index: usize,
        kind: &'static str,
        position: usize,
        available: usize,
    },

    /// Writing a record failed.
    #[error("failed to store seed data: {0}")]
    Store(#[from] ServiceError),
}

/// Parsed seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub activities: Vec<NewActivity>,
    #[serde(default)]
    pub campers: Vec<NewCamper>,
    #[serde(default)]
    pub signups: Vec<SeedSignup>,
}

/// A signup in a seed file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedSignup {
    pub time: SignupTime,
    /// 1-based position in `activities`.
    pub activity: usize,
    /// 1-based position in `campers`.
    pub camper: usize,
}

/// Counts of records written by [`seed`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub activities: usize,
    pub campers: usize,
    pub signups: usize,
}

impl SeedFile {
    /// Read and parse a seed file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check that every signup points at a defined activity and camper.
    fn check_references(&self) -> Result<(), SeedError> {
        for (i, signup) in self.signups.iter().enumerate() {
            for (kind, position, available) in [
                ("activity", signup.activity, self.activities.len()),
                ("camper", signup.camper, self.campers.len()),
            ] {
                if position == 0 || position > available {
                    return Err(SeedError::BadReference {
                        index: i + 1,
                        kind,
                        position,
                        available,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Load `path` into `state` if the store is empty.
///
/// Returns `None` when seeding was skipped because data already exists.
pub async fn seed(state: &AppState, path: &Path) -> Result<Option<SeedSummary>, SeedError> {
    let file = SeedFile::load(path)?;
    file.check_references()?;

    if !state.store.is_empty() {
        tracing::info!(path = %path.display(), "store already populated, skipping seed");
        return Ok(None);
    }

    let mut activities = Vec::with_capacity(file.activities.len());
    for new in file.activities {
        activities.push(state.add_activity(new).await?);
    }
    let mut campers = Vec::with_capacity(file.campers.len());
    for new in file.campers {
        campers.push(state.add_camper(new).await?);
    }
    let mut signups = 0;
    for entry in file.signups {
        let new = NewSignup {
            time: entry.time,
            activity_id: activities[entry.activity - 1].id,
            camper_id: campers[entry.camper - 1].id,
        };
        state.add_signup(new).await?;
        signups += 1;
    }

    let summary = SeedSummary {
        activities: activities.len(),
        campers: campers.len(),
        signups,
    };
    tracing::info!(
        path = %path.display(),
        activities = summary.activities,
        campers = summary.campers,
        signups = summary.signups,
        "Seeded store from fixture file"
    );
    Ok(Some(summary))
}
