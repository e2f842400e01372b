//! Solver phases for different solving strategies
//!
//! Phases run in sequence until one produces an acceptable assignment:
//! - RandomizedPhase: Shuffled greedy construction with restarts
//! - MatchingPhase: Exact perfect matching, then mutual-pair repair
//! - CycleCoverPhase: Exact 2-factor search when mutual pairs cannot be repaired

mod cycle_cover;
mod matching;
mod randomized;
mod repair;

use std::fmt::Debug;
use std::time::Instant;

use drawforge_core::InfeasibilityReason;
use tracing::debug;

use crate::scope::SolveScope;
use crate::statistics::{PhaseKind, PhaseResult, PhaseStatistics};

pub use cycle_cover::CycleCoverPhase;
pub use matching::MatchingPhase;
pub use randomized::RandomizedPhase;
pub use repair::repair_mutual_pairs;

/// What a phase produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// A complete assignment satisfying every constraint, `perm[giver] == receiver`.
    Solved(Vec<usize>),
    /// A complete assignment that still contains mutual pairs.
    MutualPairsRemain(Vec<usize>),
    /// Budget ran out before the phase could decide.
    Exhausted,
    /// The phase proved no acceptable assignment exists.
    Infeasible(InfeasibilityReason),
}

impl PhaseOutcome {
    fn result(&self) -> PhaseResult {
        match self {
            PhaseOutcome::Solved(_) => PhaseResult::Solved,
            PhaseOutcome::MutualPairsRemain(_) => PhaseResult::MutualPairsRemain,
            PhaseOutcome::Exhausted => PhaseResult::Exhausted,
            PhaseOutcome::Infeasible(_) => PhaseResult::Infeasible,
        }
    }
}

/// A phase of the solving process.
///
/// Phases are executed in sequence by the solver. Each phase has its own
/// strategy for constructing an assignment over the scope's model.
pub trait Phase: Send + Debug {
    /// Executes this phase.
    fn solve(&mut self, scope: &mut SolveScope<'_>) -> PhaseOutcome;

    /// Returns the kind of this phase.
    fn kind(&self) -> PhaseKind;
}

/// Stamps and records phase statistics, then hands the outcome back.
fn finish(
    scope: &mut SolveScope<'_>,
    mut stats: PhaseStatistics,
    started: Instant,
    outcome: PhaseOutcome,
) -> PhaseOutcome {
    stats.duration = started.elapsed();
    stats.result = outcome.result();
    debug!(
        phase = %stats.kind,
        steps = stats.step_count,
        repairs = stats.repair_count,
        duration_us = stats.duration.as_micros() as u64,
        result = ?stats.result,
        "Phase ended"
    );
    scope.record_phase(stats);
    outcome
}
