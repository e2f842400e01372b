//! Termination conditions for the search phases.
//!
//! Every phase loop consults a termination before doing more work, which
//! is what bounds a solve's running time.

use std::fmt::Debug;

use crate::scope::SolveScope;

/// Trait for determining when a phase must stop.
pub trait Termination: Send + Debug {
    /// Returns true if the phase should stop.
    fn is_terminated(&self, scope: &SolveScope<'_>) -> bool;
}

/// Terminates after a number of randomized attempts.
///
/// # Example
///
/// ```
/// use drawforge_solver::termination::AttemptCountTermination;
///
/// // Give up after 1000 shuffles
/// let term = AttemptCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct AttemptCountTermination {
    limit: u32,
}

impl AttemptCountTermination {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl Termination for AttemptCountTermination {
    fn is_terminated(&self, scope: &SolveScope<'_>) -> bool {
        scope.attempt_count() >= self.limit
    }
}

/// Terminates after a number of cycle cover searches.
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn is_terminated(&self, scope: &SolveScope<'_>) -> bool {
        scope.node_count() >= self.limit
    }
}
