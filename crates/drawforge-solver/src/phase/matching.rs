//! Exact bipartite perfect matching.
//!
//! Givers on one side, receivers on the other, an edge wherever the model
//! allows the pairing. A perfect matching is exactly a valid assignment
//! (ignoring the mutual-pair rule), so failing to find one proves the
//! constraints infeasible.

use std::time::Instant;

use drawforge_core::InfeasibilityReason;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use super::{finish, repair_mutual_pairs, Phase, PhaseOutcome};
use crate::permutation::{has_mutual_pair, UNASSIGNED};
use crate::scope::SolveScope;
use crate::statistics::{PhaseKind, PhaseStatistics};

/// Augmenting-path matching with randomized giver and edge order, followed
/// by mutual-pair repair.
#[derive(Debug, Default)]
pub struct MatchingPhase;

impl MatchingPhase {
    pub fn new() -> Self {
        Self
    }
}

impl Phase for MatchingPhase {
    fn solve(&mut self, scope: &mut SolveScope<'_>) -> PhaseOutcome {
        let started = Instant::now();
        let mut stats = PhaseStatistics::new(PhaseKind::Matching);
        let model = scope.model();
        let n = model.len();

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(scope.rng());
        let adjacency: Vec<Vec<usize>> = (0..n)
            .map(|g| {
                let mut edges = model.candidates(g).to_vec();
                edges.shuffle(scope.rng());
                edges
            })
            .collect();

        // owner[receiver] = giver
        let mut owner = vec![UNASSIGNED; n];
        let mut visited = vec![false; n];
        let mut unmatched = Vec::new();

        for &giver in &order {
            visited.fill(false);
            if augment(giver, &adjacency, &mut owner, &mut visited) {
                stats.step_count += 1;
            } else {
                trace!(giver = %model.id(giver), "No augmenting path");
                unmatched.push(giver);
            }
        }

        if !unmatched.is_empty() {
            unmatched.sort_unstable();
            let reason = InfeasibilityReason::NoPerfectMatching {
                unmatched: unmatched.iter().map(|&g| model.id(g).clone()).collect(),
            };
            return finish(scope, stats, started, PhaseOutcome::Infeasible(reason));
        }

        let mut perm = vec![UNASSIGNED; n];
        for (receiver, &giver) in owner.iter().enumerate() {
            perm[giver] = receiver;
        }

        let repairs = repair_mutual_pairs(model, &mut perm, scope.rng());
        stats.repair_count = repairs as u64;

        let outcome = if has_mutual_pair(&perm) {
            debug!(repairs, "Mutual pairs remain after repair");
            PhaseOutcome::MutualPairsRemain(perm)
        } else {
            PhaseOutcome::Solved(perm)
        };
        finish(scope, stats, started, outcome)
    }

    fn kind(&self) -> PhaseKind {
        PhaseKind::Matching
    }
}

/// Tries to match `giver`, re-routing earlier givers along an augmenting path.
fn augment(giver: usize, adjacency: &[Vec<usize>], owner: &mut [usize], visited: &mut [bool]) -> bool {
    for &receiver in &adjacency[giver] {
        if visited[receiver] {
            continue;
        }
        visited[receiver] = true;

        let current = owner[receiver];
        if current == UNASSIGNED || augment(current, adjacency, owner, visited) {
            owner[receiver] = giver;
            return true;
        }
    }
    false
}
