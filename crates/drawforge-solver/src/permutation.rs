//! Index-level permutation helpers shared by the phases.
//!
//! A permutation is a `Vec<usize>` where `perm[giver] == receiver`.

use drawforge_core::{Assignment, AssignmentSet};

use crate::model::ConstraintModel;

/// Marker for an unassigned slot during construction.
pub(crate) const UNASSIGNED: usize = usize::MAX;

/// Unordered pairs `(a, b)` with `a < b` that draw each other.
pub fn mutual_pairs(perm: &[usize]) -> Vec<(usize, usize)> {
    perm.iter()
        .enumerate()
        .filter(|&(g, &r)| g < r && r < perm.len() && perm[r] == g)
        .map(|(g, &r)| (g, r))
        .collect()
}

pub fn has_mutual_pair(perm: &[usize]) -> bool {
    perm.iter()
        .enumerate()
        .any(|(g, &r)| g != r && r < perm.len() && perm[r] == g)
}

/// Lengths of all cycles, sorted ascending.
pub fn cycle_lengths(perm: &[usize]) -> Vec<usize> {
    let mut seen = vec![false; perm.len()];
    let mut lengths = Vec::new();
    for start in 0..perm.len() {
        if seen[start] {
            continue;
        }
        let mut len = 0;
        let mut current = start;
        while !seen[current] {
            seen[current] = true;
            len += 1;
            current = perm[current];
        }
        lengths.push(len);
    }
    lengths.sort_unstable();
    lengths
}

/// Returns true if every giver has an allowed receiver and no receiver repeats.
pub fn is_valid(model: &ConstraintModel, perm: &[usize], allow_minimal_cycles: bool) -> bool {
    if perm.len() != model.len() {
        return false;
    }
    let mut taken = vec![false; perm.len()];
    for (g, &r) in perm.iter().enumerate() {
        if r >= perm.len() || taken[r] || !model.is_allowed(g, r) {
            return false;
        }
        taken[r] = true;
    }
    allow_minimal_cycles || !has_mutual_pair(perm)
}

/// Converts an index permutation into participant assignments.
pub fn to_assignment_set(model: &ConstraintModel, perm: &[usize]) -> AssignmentSet {
    perm.iter()
        .enumerate()
        .map(|(g, &r)| Assignment::new(model.id(g).clone(), model.id(r).clone()))
        .collect()
}
