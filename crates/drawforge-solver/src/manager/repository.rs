//! Persistence seams for groups and drawings.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use drawforge_core::{Drawing, DrawingId, ExclusionPair, GroupId, Participant};
use thiserror::Error;

/// Errors raised by a repository implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Group not found: {group}")]
    GroupNotFound { group: GroupId },

    #[error("Drawing {drawing} is already stored")]
    Conflict { drawing: DrawingId },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Solver input for one group, as held by the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupInput {
    pub participants: Vec<Participant>,
    pub exclusions: Vec<ExclusionPair>,
}

impl GroupInput {
    pub fn new(participants: Vec<Participant>, exclusions: Vec<ExclusionPair>) -> Self {
        Self {
            participants,
            exclusions,
        }
    }
}

/// Source of participants and exclusions per group.
pub trait GroupRepository: Send + Sync {
    fn load_group(&self, group: &GroupId) -> Result<GroupInput, RepositoryError>;
}

/// Append-only store of drawings.
///
/// Implementations never overwrite a stored drawing; a draw always saves a
/// new one.
pub trait DrawingRepository: Send + Sync {
    fn save_drawing(&self, drawing: Drawing) -> Result<(), RepositoryError>;

    /// All drawings of a group, oldest first.
    fn drawings(&self, group: &GroupId) -> Result<Vec<Drawing>, RepositoryError>;

    fn latest_drawing(&self, group: &GroupId) -> Result<Option<Drawing>, RepositoryError> {
        Ok(self.drawings(group)?.pop())
    }
}

/// Mutex-protected in-memory repository for tests and the CLI.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    groups: Mutex<HashMap<GroupId, GroupInput>>,
    drawings: Mutex<HashMap<GroupId, Vec<Drawing>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces a group's input.
    pub fn add_group(&self, group: GroupId, input: GroupInput) -> Result<(), RepositoryError> {
        lock(&self.groups)?.insert(group, input);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Storage("repository lock poisoned".to_string()))
}

impl GroupRepository for InMemoryRepository {
    fn load_group(&self, group: &GroupId) -> Result<GroupInput, RepositoryError> {
        lock(&self.groups)?
            .get(group)
            .cloned()
            .ok_or_else(|| RepositoryError::GroupNotFound {
                group: group.clone(),
            })
    }
}

impl DrawingRepository for InMemoryRepository {
    fn save_drawing(&self, drawing: Drawing) -> Result<(), RepositoryError> {
        let mut drawings = lock(&self.drawings)?;
        if drawings.values().flatten().any(|d| d.id() == drawing.id()) {
            return Err(RepositoryError::Conflict {
                drawing: drawing.id(),
            });
        }
        drawings
            .entry(drawing.group_id().clone())
            .or_default()
            .push(drawing);
        Ok(())
    }

    fn drawings(&self, group: &GroupId) -> Result<Vec<Drawing>, RepositoryError> {
        Ok(lock(&self.drawings)?.get(group).cloned().unwrap_or_default())
    }
}
