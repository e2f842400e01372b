//! drawforge - Gift-exchange drawings in Rust
//!
//! Give it participants, couples and exclusions; get back a draw in which
//! nobody gives to themselves, their partner, an excluded participant or
//! (by default) the person giving to them.
//!
//! # Example
//!
//! ```rust
//! use drawforge::prelude::*;
//!
//! let participants = vec![
//!     Participant::new("A", "Alice").with_partner("B"),
//!     Participant::new("B", "Bob").with_partner("A"),
//!     Participant::new("C", "Carol"),
//!     Participant::new("D", "Dave"),
//! ];
//!
//! let draw = solve(&participants, &[], &SolveOptions::default()).unwrap();
//! let report = validate(&participants, &[], &draw).unwrap();
//!
//! assert!(report.is_valid());
//! ```

// Domain and error types
pub use drawforge_core::{
    ApiError, ApiResponse, Assignment, AssignmentSet, Drawing, DrawingAssignment, DrawingId,
    EngineError, ExclusionKind, ExclusionPair, GroupId, InfeasibilityReason, Participant,
    ParticipantId, Result,
};

// Configuration
pub use drawforge_config::{ConfigError, DrawConfig, EnvironmentMode};

// Engine operations
pub use drawforge_solver::{solve, validate, validate_with};
pub use drawforge_solver::{
    DrawSolver, SolveOptions, SolveResult, SolveStatistics, ValidationReport, Violation,
};

// Drawing lifecycle
pub use drawforge_solver::manager;
pub use drawforge_solver::{DrawError, DrawManager, InMemoryRepository};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{solve, validate, validate_with};
    pub use super::{
        AssignmentSet, DrawConfig, DrawSolver, EngineError, ExclusionPair, Participant,
        ParticipantId, SolveOptions, ValidationReport,
    };
}
