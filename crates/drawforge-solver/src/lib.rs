//! drawforge Solver Engine
//!
//! This crate provides the assignment engine including:
//! - Constraint model built from participants, couples and exclusions
//! - DrawSolver and its phases (randomized, matching, cycle cover)
//! - Termination conditions and solve statistics
//! - Validator for solved or imported assignments
//! - DrawManager for the drawing lifecycle over a repository
//!
//! Logging levels:
//! - **INFO**: Solve start/end, rejected input, completed drawings
//! - **DEBUG**: Model size, phase summaries, fallbacks
//! - **TRACE**: Dead ends, failed augmentations, cycle merges

pub mod engine;
pub mod manager;
pub mod model;
pub mod options;
pub mod permutation;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod termination;
pub mod validator;

pub use engine::{solve, validate, validate_with};
pub use manager::{
    DrawError, DrawManager, DrawingRepository, GroupInput, GroupRepository, InMemoryRepository,
    RepositoryError,
};
pub use model::ConstraintModel;
pub use options::SolveOptions;
pub use phase::{CycleCoverPhase, MatchingPhase, Phase, PhaseOutcome, RandomizedPhase};
pub use scope::SolveScope;
pub use solver::{DrawSolver, SolveResult};
pub use statistics::{PhaseKind, PhaseResult, PhaseStatistics, SolveStatistics};
pub use termination::{AttemptCountTermination, NodeCountTermination, Termination};
pub use validator::{ValidationReport, Validator, Violation};
