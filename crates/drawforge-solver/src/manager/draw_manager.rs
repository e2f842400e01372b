//! DrawManager implementation.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use drawforge_config::DrawConfig;
use drawforge_core::{ApiError, Drawing, EngineError, GroupId};
use thiserror::Error;
use tracing::{info, warn};

use super::repository::{DrawingRepository, GroupRepository, RepositoryError};
use crate::model::ConstraintModel;
use crate::options::SolveOptions;
use crate::solver::DrawSolver;
use crate::validator::Validator;

/// Errors from running a draw for a group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("A draw for group {group} is already in progress")]
    DrawInProgress { group: GroupId },
}

impl From<&DrawError> for ApiError {
    fn from(err: &DrawError) -> Self {
        match err {
            DrawError::Engine(e) => ApiError::from(e),
            DrawError::Repository(RepositoryError::GroupNotFound { .. }) => {
                ApiError::new(err.to_string(), "GROUP_NOT_FOUND", 404)
            }
            DrawError::Repository(RepositoryError::Conflict { .. }) => {
                ApiError::new(err.to_string(), "DRAWING_CONFLICT", 409)
            }
            DrawError::Repository(RepositoryError::Storage(_)) => {
                ApiError::new(err.to_string(), "STORAGE_ERROR", 500)
            }
            DrawError::DrawInProgress { .. } => {
                ApiError::new(err.to_string(), "DRAW_IN_PROGRESS", 409)
            }
        }
    }
}

impl From<DrawError> for ApiError {
    fn from(err: DrawError) -> Self {
        ApiError::from(&err)
    }
}

/// Runs draws for groups held in a repository.
///
/// Each draw loads the group, solves it, and saves a brand new complete
/// `Drawing`. Earlier drawings are never touched. Two draws for the same
/// group cannot overlap; the second fails with `DrawInProgress`. Draws for
/// different groups run independently.
///
/// # Example
///
/// ```
/// use drawforge_core::{GroupId, Participant};
/// use drawforge_solver::manager::{DrawManager, GroupInput, InMemoryRepository};
/// use drawforge_solver::SolveOptions;
///
/// let repository = InMemoryRepository::new();
/// let group = GroupId::new("family");
/// let participants = ["ann", "bob", "cid"]
///     .into_iter()
///     .map(|id| Participant::new(id, id))
///     .collect();
/// repository
///     .add_group(group.clone(), GroupInput::new(participants, Vec::new()))
///     .unwrap();
///
/// let manager = DrawManager::new(repository, SolveOptions::default());
/// let drawing = manager.draw(&group).unwrap();
///
/// assert!(drawing.is_complete());
/// assert_eq!(drawing.assignments().len(), 3);
/// ```
#[derive(Debug)]
pub struct DrawManager<R> {
    repository: R,
    options: SolveOptions,
    in_flight: Mutex<HashSet<GroupId>>,
}

impl<R> DrawManager<R>
where
    R: GroupRepository + DrawingRepository,
{
    pub fn new(repository: R, options: SolveOptions) -> Self {
        Self {
            repository,
            options,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn from_config(repository: R, config: &DrawConfig) -> Self {
        Self::new(repository, SolveOptions::from(config))
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Returns true while a draw for `group` is running.
    pub fn is_drawing(&self, group: &GroupId) -> bool {
        self.in_flight_set().contains(group)
    }

    /// Runs one draw for `group` and stores the completed drawing.
    pub fn draw(&self, group: &GroupId) -> Result<Drawing, DrawError> {
        let _guard = self.reserve(group)?;

        let input = self.repository.load_group(group)?;
        let model = ConstraintModel::build(&input.participants, &input.exclusions)?;
        let result = DrawSolver::new(self.options.clone()).solve_model(&model)?;

        let mut drawing = Drawing::new(group.clone(), model.ids().to_vec());
        let report = Validator::new(&model, self.options.allow_minimal_cycles)
            .validate(&result.assignments);
        if !report.is_valid() {
            warn!(group = %group, %report, "Refusing to complete drawing");
            return Err(EngineError::Internal(format!(
                "drawing failed validation: {report}"
            ))
            .into());
        }
        drawing.complete(result.assignments)?;

        self.repository.save_drawing(drawing.clone())?;
        info!(
            group = %group,
            drawing = %drawing.id(),
            participant_count = drawing.participants().len(),
            "Drawing completed"
        );
        Ok(drawing)
    }

    /// Drawings of `group`, oldest first.
    pub fn history(&self, group: &GroupId) -> Result<Vec<Drawing>, DrawError> {
        Ok(self.repository.drawings(group)?)
    }

    fn reserve(&self, group: &GroupId) -> Result<InFlight<'_>, DrawError> {
        if !self.in_flight_set().insert(group.clone()) {
            return Err(DrawError::DrawInProgress {
                group: group.clone(),
            });
        }
        Ok(InFlight {
            set: &self.in_flight,
            group: group.clone(),
        })
    }

    fn in_flight_set(&self) -> std::sync::MutexGuard<'_, HashSet<GroupId>> {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases a group's draw reservation when dropped.
struct InFlight<'a> {
    set: &'a Mutex<HashSet<GroupId>>,
    group: GroupId,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.group);
    }
}
