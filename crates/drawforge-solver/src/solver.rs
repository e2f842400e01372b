//! Solver implementation.

use drawforge_config::DrawConfig;
use drawforge_core::{
    AssignmentSet, EngineError, ExclusionPair, InfeasibilityReason, Participant, Result,
};
use tracing::{debug, error, info};

use crate::model::ConstraintModel;
use crate::options::SolveOptions;
use crate::permutation::{cycle_lengths, to_assignment_set};
use crate::phase::{CycleCoverPhase, MatchingPhase, Phase, PhaseOutcome, RandomizedPhase};
use crate::scope::SolveScope;
use crate::statistics::SolveStatistics;
use crate::termination::{AttemptCountTermination, NodeCountTermination};
use crate::validator::Validator;

/// An accepted assignment together with how it was found.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub assignments: AssignmentSet,
    pub statistics: SolveStatistics,
}

/// Runs the phase pipeline for one group at a time.
///
/// The pipeline is randomized construction, then exact matching with
/// mutual-pair repair, then an exact cycle cover search. Every returned
/// assignment has passed the validator; a solver bug surfaces as
/// `EngineError::Internal` instead of an invalid draw.
///
/// # Example
///
/// ```
/// use drawforge_core::{Participant, ParticipantId};
/// use drawforge_solver::{DrawSolver, SolveOptions};
///
/// let participants = vec![
///     Participant::new("a", "Ann").with_partner("b"),
///     Participant::new("b", "Bob").with_partner("a"),
///     Participant::new("c", "Cid"),
///     Participant::new("d", "Dee"),
/// ];
///
/// let solver = DrawSolver::new(SolveOptions::default().with_seed(7));
/// let result = solver.solve(&participants, &[]).unwrap();
///
/// assert_eq!(result.assignments.len(), 4);
/// let a = ParticipantId::new("a");
/// assert_ne!(result.assignments.receiver_of(&a), Some(&ParticipantId::new("b")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DrawSolver {
    options: SolveOptions,
}

impl DrawSolver {
    pub fn new(options: SolveOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &DrawConfig) -> Self {
        Self::new(SolveOptions::from(config))
    }

    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    /// Builds the constraint model and solves it.
    pub fn solve(
        &self,
        participants: &[Participant],
        exclusions: &[ExclusionPair],
    ) -> Result<SolveResult> {
        let model = ConstraintModel::build(participants, exclusions)?;
        self.solve_model(&model)
    }

    /// Solves an already built model.
    pub fn solve_model(&self, model: &ConstraintModel) -> Result<SolveResult> {
        let allow_minimal_cycles = self.options.allow_minimal_cycles;
        info!(
            participant_count = model.len(),
            couple_count = model.couple_count(),
            explicit_count = model.explicit_count(),
            allow_minimal_cycles,
            seeded = self.options.random_seed.is_some(),
            "Solving started"
        );

        if let Err(e) = model.check_feasibility(allow_minimal_cycles) {
            info!(error = %e, "Solving rejected before search");
            return Err(e);
        }

        let mut scope = SolveScope::new(model, &self.options);
        let perm = match self.run_phases(&mut scope) {
            Ok(perm) => perm,
            Err(e) => {
                info!(
                    error = %e,
                    attempts = scope.attempt_count(),
                    nodes = scope.node_count(),
                    duration_ms = scope.elapsed().as_millis() as u64,
                    "Solving failed"
                );
                return Err(e);
            }
        };

        let assignments = to_assignment_set(model, &perm);
        let report = Validator::new(model, allow_minimal_cycles).validate(&assignments);
        if !report.is_valid() {
            error!(%report, "Solver produced an invalid assignment");
            return Err(EngineError::Internal(format!(
                "solver produced an invalid assignment: {report}"
            )));
        }

        let mut statistics = scope.into_statistics();
        statistics.cycle_lengths = cycle_lengths(&perm);
        info!(
            duration_ms = statistics.total_duration.as_millis() as u64,
            attempts = statistics.attempt_count,
            solved_by = ?statistics.solved_by(),
            cycle_lengths = ?statistics.cycle_lengths,
            "Solving ended"
        );

        Ok(SolveResult {
            assignments,
            statistics,
        })
    }

    fn run_phases(&self, scope: &mut SolveScope<'_>) -> Result<Vec<usize>> {
        let allow_minimal_cycles = self.options.allow_minimal_cycles;

        let mut randomized =
            RandomizedPhase::new(AttemptCountTermination::new(self.options.max_attempts));
        if let PhaseOutcome::Solved(perm) = randomized.solve(scope) {
            self.assert_phase_result(scope, &perm, false)?;
            return Ok(perm);
        }
        let retries = EngineError::RetriesExhausted {
            attempts: scope.attempt_count(),
        };
        debug!(reason = %retries, "Falling back to exact matching");

        // Kept as the answer of last resort when mutual pairs are allowed.
        let fallback = match MatchingPhase::new().solve(scope) {
            PhaseOutcome::Solved(perm) => {
                self.assert_phase_result(scope, &perm, false)?;
                return Ok(perm);
            }
            PhaseOutcome::MutualPairsRemain(perm) => {
                self.assert_phase_result(scope, &perm, true)?;
                perm
            }
            PhaseOutcome::Infeasible(reason) => {
                return Err(EngineError::InfeasibleConstraints(reason))
            }
            PhaseOutcome::Exhausted => {
                return Err(EngineError::Internal(
                    "matching phase ended without a result".to_string(),
                ))
            }
        };

        let mut cycle_cover =
            CycleCoverPhase::new(NodeCountTermination::new(self.options.search_node_limit));
        match cycle_cover.solve(scope) {
            PhaseOutcome::Solved(perm) => {
                self.assert_phase_result(scope, &perm, false)?;
                Ok(perm)
            }
            // Mutual pairs are accepted only once no draw without them exists.
            PhaseOutcome::Infeasible(reason) if allow_minimal_cycles => {
                debug!(%reason, "Accepting mutual pairs");
                Ok(fallback)
            }
            PhaseOutcome::Infeasible(reason) => Err(EngineError::InfeasibleConstraints(reason)),
            PhaseOutcome::Exhausted => Err(EngineError::InfeasibleConstraints(
                InfeasibilityReason::SearchBudgetExhausted {
                    nodes: scope.node_count(),
                },
            )),
            PhaseOutcome::MutualPairsRemain(_) => Err(EngineError::Internal(
                "cycle cover phase returned mutual pairs".to_string(),
            )),
        }
    }

    /// Validates an intermediate phase result in full-assert mode.
    fn assert_phase_result(
        &self,
        scope: &SolveScope<'_>,
        perm: &[usize],
        allow_minimal_cycles: bool,
    ) -> Result<()> {
        if !self.options.full_assert {
            return Ok(());
        }
        let model = scope.model();
        let report =
            Validator::new(model, allow_minimal_cycles).validate(&to_assignment_set(model, perm));
        if report.is_valid() {
            Ok(())
        } else {
            error!(%report, "Phase produced an invalid assignment");
            Err(EngineError::Internal(format!(
                "phase produced an invalid assignment: {report}"
            )))
        }
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
