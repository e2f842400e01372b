//! Group and assignment files.
//!
//! Both are read as JSON when the extension is `.json` and as TOML
//! otherwise.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use drawforge::{AssignmentSet, ExclusionPair, Participant};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

/// Errors reading input files. These map to exit code 2.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Config(#[from] drawforge::ConfigError),
}

/// A group as stored on disk.
///
/// ```toml
/// exclusions = [["ann", "cid"]]
///
/// [[participants]]
/// id = "ann"
/// name = "Ann"
/// partner = "bob"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GroupFile {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub exclusions: Vec<ExclusionPair>,
}

impl GroupFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        parse_file(path.as_ref())
    }

    /// Display name of a participant, falling back to the id.
    pub fn name_of<'a>(&'a self, id: &'a drawforge::ParticipantId) -> &'a str {
        self.participants
            .iter()
            .find(|p| p.id == *id)
            .map(|p| p.name.as_str())
            .unwrap_or(id.as_str())
    }
}

/// Assignments to validate, as `[[assignments]]` tables with `giver` and
/// `receiver`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentsFile {
    pub assignments: AssignmentSet,
}

impl AssignmentsFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        parse_file(path.as_ref())
    }
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let contents = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    } else {
        toml::from_str(&contents).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| InputError::Parse {
        path: path.to_path_buf(),
        message,
    })
}
