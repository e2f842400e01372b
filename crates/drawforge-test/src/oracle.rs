//! Brute-force oracles for small groups.
//!
//! These enumerate every permutation, so keep groups under ten members.

use std::collections::HashSet;

use drawforge_core::{AssignmentSet, ParticipantId};

use crate::group::GroupFixture;

/// All permutations of `0..n` without fixed points.
pub fn derangements(n: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(n);
    let mut used = vec![false; n];
    extend(n, &mut current, &mut used, &mut out);
    out
}

fn extend(n: usize, current: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Vec<usize>>) {
    let position = current.len();
    if position == n {
        out.push(current.clone());
        return;
    }
    for value in 0..n {
        if used[value] || value == position {
            continue;
        }
        used[value] = true;
        current.push(value);
        extend(n, current, used, out);
        current.pop();
        used[value] = false;
    }
}

/// Counts assignments valid for `group` by enumerating derangements.
pub fn count_valid_assignments(group: &GroupFixture, allow_mutual_pairs: bool) -> usize {
    let ids = group.ids();
    derangements(ids.len())
        .into_iter()
        .filter(|perm| {
            let set = AssignmentSet::from_pairs(
                perm.iter()
                    .enumerate()
                    .map(|(g, &r)| (ids[g].clone(), ids[r].clone())),
            );
            is_valid_assignment(group, &set, allow_mutual_pairs)
        })
        .count()
}

/// Independent check of an assignment against a group.
pub fn is_valid_assignment(
    group: &GroupFixture,
    set: &AssignmentSet,
    allow_mutual_pairs: bool,
) -> bool {
    let ids: HashSet<ParticipantId> = group.ids().into_iter().collect();
    let givers: HashSet<&ParticipantId> = set.iter().map(|a| &a.giver).collect();
    let receivers: HashSet<&ParticipantId> = set.iter().map(|a| &a.receiver).collect();

    if set.len() != ids.len()
        || givers.len() != ids.len()
        || receivers.len() != ids.len()
        || !givers.iter().all(|g| ids.contains(*g))
        || !receivers.iter().all(|r| ids.contains(*r))
    {
        return false;
    }

    set.iter().all(|a| {
        a.giver != a.receiver
            && !group.is_excluded(&a.giver, &a.receiver)
            && (allow_mutual_pairs || set.receiver_of(&a.receiver) != Some(&a.giver))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derangement_counts() {
        // Subfactorials
        assert_eq!(derangements(1).len(), 0);
        assert_eq!(derangements(2).len(), 1);
        assert_eq!(derangements(3).len(), 2);
        assert_eq!(derangements(4).len(), 9);
        assert_eq!(derangements(5).len(), 44);
    }

    #[test]
    fn test_three_singles_have_two_draws() {
        let group = GroupFixture::new().members(["a", "b", "c"]);

        assert_eq!(count_valid_assignments(&group, false), 2);
    }

    #[test]
    fn test_fully_excluded_triangle_has_none() {
        let group = GroupFixture::new()
            .members(["a", "b", "c"])
            .exclude_all(&["a", "b", "c"]);

        assert_eq!(count_valid_assignments(&group, true), 0);
    }
}
