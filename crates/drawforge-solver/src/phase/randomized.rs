//! Randomized construction with restarts.

use std::time::Instant;

use rand::seq::SliceRandom;
use tracing::trace;

use super::{finish, Phase, PhaseOutcome};
use crate::model::ConstraintModel;
use crate::permutation::UNASSIGNED;
use crate::scope::SolveScope;
use crate::statistics::{PhaseKind, PhaseStatistics};
use crate::termination::Termination;

/// Shuffles givers and receivers, then gives each giver the first allowed
/// receiver left in the pool. A giver with no allowed receiver is a dead
/// end: the attempt is discarded and a fresh shuffle starts.
///
/// Mutual pairs are always rejected here, so the phase only ever reports
/// `Solved` or `Exhausted`.
#[derive(Debug)]
pub struct RandomizedPhase<T: Termination> {
    termination: T,
}

impl<T: Termination> RandomizedPhase<T> {
    pub fn new(termination: T) -> Self {
        Self { termination }
    }
}

impl<T: Termination> Phase for RandomizedPhase<T> {
    fn solve(&mut self, scope: &mut SolveScope<'_>) -> PhaseOutcome {
        let started = Instant::now();
        let mut stats = PhaseStatistics::new(PhaseKind::Randomized);
        let model = scope.model();
        let n = model.len();

        let mut givers: Vec<usize> = (0..n).collect();
        let mut pool: Vec<usize> = Vec::with_capacity(n);
        let mut perm = vec![UNASSIGNED; n];

        while !self.termination.is_terminated(scope) {
            let attempt = scope.increment_attempt_count();
            stats.step_count += 1;

            givers.shuffle(scope.rng());
            pool.clear();
            pool.extend(0..n);
            pool.shuffle(scope.rng());
            perm.fill(UNASSIGNED);

            match construct(model, &givers, &mut pool, &mut perm) {
                Ok(()) => return finish(scope, stats, started, PhaseOutcome::Solved(perm)),
                Err(giver) => trace!(attempt, giver = %model.id(giver), "Dead end"),
            }
        }

        finish(scope, stats, started, PhaseOutcome::Exhausted)
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Randomized
    }
}

/// Greedy pass over `givers`; returns the giver that got stuck.
fn construct(
    model: &ConstraintModel,
    givers: &[usize],
    pool: &mut Vec<usize>,
    perm: &mut [usize],
) -> Result<(), usize> {
    for &giver in givers {
        let position = pool
            .iter()
            .position(|&r| model.is_allowed(giver, r) && perm[r] != giver)
            .ok_or(giver)?;
        perm[giver] = pool.remove(position);
    }
    Ok(())
}
