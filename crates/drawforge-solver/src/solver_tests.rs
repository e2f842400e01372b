//! Tests for the solver pipeline.

use std::collections::HashSet;

use drawforge_config::DrawConfig;
use drawforge_core::{
    Assignment, AssignmentSet, EngineError, InfeasibilityReason, Participant, ParticipantId,
};
use drawforge_test::{count_valid_assignments, is_valid_assignment, GroupFixture, TEST_SEEDS};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::statistics::PhaseKind;

fn solve(group: &GroupFixture, options: SolveOptions) -> Result<SolveResult> {
    DrawSolver::new(options).solve(group.participants(), group.exclusions())
}

fn id(s: &str) -> ParticipantId {
    ParticipantId::new(s)
}

/// `n` singles `p0..` with each pair excluded with probability `density`,
/// except the pairs of a hidden ring. Returns the ring as a known draw.
fn dense_group(n: usize, density: f64, seed: u64) -> (GroupFixture, AssignmentSet) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    let ring: HashSet<(usize, usize)> = (0..n)
        .map(|i| {
            let (a, b) = (order[i], order[(i + 1) % n]);
            (a.min(b), a.max(b))
        })
        .collect();

    let mut group = GroupFixture::ring(n);
    for a in 0..n {
        for b in a + 1..n {
            if !ring.contains(&(a, b)) && rng.random_bool(density) {
                group = group.exclude(&format!("p{a}"), &format!("p{b}"));
            }
        }
    }
    let witness = AssignmentSet::from_pairs(
        (0..n).map(|i| (format!("p{}", order[i]), format!("p{}", order[(i + 1) % n]))),
    );
    (group, witness)
}

/// Fifteen `a`s and seventeen `b`s. Only `a`-`b` pairs and `b0`-`b1` are
/// allowed, so the `b`s have four more pair slots to fill than the `a`s
/// can take and every draw needs a mutual pair.
fn lopsided_group() -> GroupFixture {
    let a: Vec<String> = (0..15).map(|i| format!("a{i}")).collect();
    let b: Vec<String> = (0..17).map(|i| format!("b{i}")).collect();
    let a_ids: Vec<&str> = a.iter().map(String::as_str).collect();

    let mut group = GroupFixture::new()
        .members(a_ids.iter().copied())
        .members(b.iter().map(String::as_str))
        .exclude_all(&a_ids);
    for (i, x) in b.iter().enumerate() {
        for (j, y) in b.iter().enumerate().skip(i + 1) {
            if (i, j) != (0, 1) {
                group = group.exclude(x, y);
            }
        }
    }
    group
}

#[test]
fn test_couple_never_draws_each_other() {
    let group = GroupFixture::new().couple("A", "B").members(["C", "D"]);

    for seed in TEST_SEEDS {
        let result = solve(&group, SolveOptions::default().with_seed(seed)).unwrap();
        let set = &result.assignments;

        assert!(is_valid_assignment(&group, set, false), "seed {seed}: {set:?}");
        assert_ne!(set.receiver_of(&id("A")), Some(&id("B")));
        assert_ne!(set.receiver_of(&id("B")), Some(&id("A")));
    }
}

#[test]
fn test_three_singles_draw_one_of_two_rings() {
    let group = GroupFixture::new().members(["A", "B", "C"]);
    let forward = AssignmentSet::from_pairs([("A", "B"), ("B", "C"), ("C", "A")]);
    let backward = AssignmentSet::from_pairs([("A", "C"), ("B", "A"), ("C", "B")]);
    let mut seen = HashSet::new();

    for seed in TEST_SEEDS {
        let mut set = solve(&group, SolveOptions::default().with_seed(seed))
            .unwrap()
            .assignments;
        set.sort_by_giver();

        assert!(set == forward || set == backward, "seed {seed}: {set:?}");
        seen.insert(set.into_inner());
    }

    assert_eq!(seen.len(), 2);
}

#[test]
fn test_two_person_couple_is_infeasible() {
    let group = GroupFixture::new().couple("a", "b");

    let err = solve(&group, SolveOptions::default().with_minimal_cycles(true)).unwrap_err();

    assert_eq!(
        err,
        EngineError::InfeasibleConstraints(InfeasibilityReason::GroupTooSmall { size: 2 })
    );
    assert_eq!(err.code(), "INFEASIBLE_CONSTRAINTS");
}

#[test]
fn test_fully_excluded_triangle_is_infeasible() {
    let group = GroupFixture::new()
        .members(["a", "b", "c"])
        .exclude_all(&["a", "b", "c"]);

    let err = solve(&group, SolveOptions::default().with_seed(1)).unwrap_err();

    assert!(matches!(
        err,
        EngineError::InfeasibleConstraints(InfeasibilityReason::NoCandidates { .. })
    ));
}

#[test]
fn test_single_participant_is_infeasible() {
    let group = GroupFixture::new().member("solo");

    assert_eq!(
        solve(&group, SolveOptions::default()).unwrap_err(),
        EngineError::InfeasibleConstraints(InfeasibilityReason::GroupTooSmall { size: 1 })
    );
}

#[test]
fn test_empty_group_is_invalid_input() {
    let err = DrawSolver::default().solve(&[], &[]).unwrap_err();

    assert!(matches!(err, EngineError::InvalidInput { .. }));
}

#[test]
fn test_input_errors_propagate() {
    let participants = vec![Participant::new("a", "A"), Participant::new("a", "Again")];

    let err = DrawSolver::default().solve(&participants, &[]).unwrap_err();

    assert!(err.is_caller_error());
}

#[test]
fn test_pair_draws_each_other_when_allowed() {
    let group = GroupFixture::new().members(["a", "b"]);

    let result = solve(
        &group,
        SolveOptions::default().with_seed(3).with_minimal_cycles(true),
    )
    .unwrap();

    assert_eq!(result.assignments.receiver_of(&id("a")), Some(&id("b")));
    assert_eq!(result.assignments.receiver_of(&id("b")), Some(&id("a")));
    assert_eq!(result.statistics.mutual_pair_count(), 1);
}

#[test]
fn test_draws_differ_across_seeds() {
    let group = GroupFixture::ring(6).exclude("p0", "p3");
    let mut seen = HashSet::new();

    for seed in TEST_SEEDS {
        let result = solve(&group, SolveOptions::default().with_seed(seed)).unwrap();
        seen.insert(result.assignments.into_inner());
    }

    assert!(seen.len() > 1);
}

#[test]
fn test_same_seed_same_draw() {
    let group = GroupFixture::ring(9).couple("x", "y");
    let options = SolveOptions::default().with_seed(99);

    let first = solve(&group, options.clone()).unwrap().assignments;
    let second = solve(&group, options).unwrap().assignments;

    assert_eq!(first, second);
}

#[test]
fn test_feasibility_matches_brute_force() {
    let groups = [
        GroupFixture::ring(3),
        GroupFixture::ring(4).exclude("p0", "p1"),
        GroupFixture::new().couple("a", "b").member("c"),
        GroupFixture::new().couple("a", "b").couple("c", "d"),
        GroupFixture::new()
            .couple("a", "b")
            .couple("c", "d")
            .exclude("a", "d")
            .exclude("b", "c"),
        GroupFixture::new()
            .couple("a", "b")
            .members(["c", "d", "e"])
            .exclude("c", "d")
            .exclude("c", "e"),
        GroupFixture::new()
            .members(["a", "b", "c", "d", "e"])
            .exclude_all(&["a", "b", "c"]),
        GroupFixture::ring(5)
            .exclude("p0", "p1")
            .exclude("p0", "p2")
            .exclude("p1", "p2")
            .exclude("p3", "p4"),
    ];

    for (i, group) in groups.iter().enumerate() {
        for allow in [false, true] {
            let expected = count_valid_assignments(group, allow);
            let result = solve(
                group,
                SolveOptions::default()
                    .with_seed(i as u64)
                    .with_minimal_cycles(allow),
            );

            match result {
                Ok(result) => {
                    assert!(expected > 0, "group {i}, allow {allow}: solved an infeasible group");
                    assert!(is_valid_assignment(group, &result.assignments, allow));
                    // Mutual pairs are only a last resort.
                    if count_valid_assignments(group, false) > 0 {
                        assert!(is_valid_assignment(group, &result.assignments, false));
                    }
                }
                Err(err) => {
                    assert_eq!(expected, 0, "group {i}, allow {allow}: {err}");
                    assert!(matches!(err, EngineError::InfeasibleConstraints(_)));
                }
            }
        }
    }
}

#[test]
fn test_unavoidable_pairs_rejected_by_default() {
    let group = GroupFixture::new()
        .couple("a", "b")
        .couple("c", "d")
        .exclude("a", "d")
        .exclude("b", "c");

    let err = solve(&group, SolveOptions::default().with_seed(8)).unwrap_err();

    assert_eq!(
        err,
        EngineError::InfeasibleConstraints(InfeasibilityReason::NoCycleFreeAssignment)
    );
}

#[test]
fn test_search_budget_exhaustion_is_infeasible() {
    let group = GroupFixture::new()
        .couple("a", "b")
        .couple("c", "d")
        .exclude("a", "d")
        .exclude("b", "c");
    let options = SolveOptions::default()
        .with_seed(8)
        .with_max_attempts(5)
        .with_search_node_limit(1);

    let err = solve(&group, options).unwrap_err();

    assert_eq!(
        err,
        EngineError::InfeasibleConstraints(InfeasibilityReason::SearchBudgetExhausted {
            nodes: 1
        })
    );
}

#[test]
fn test_dense_feasible_group_solves_for_every_seed() {
    let (group, witness) = dense_group(43, 0.9, 7);
    assert!(group.exclusions().len() > 700);
    assert!(is_valid_assignment(&group, &witness, false));

    for seed in TEST_SEEDS {
        let result = solve(&group, SolveOptions::default().with_seed(seed))
            .unwrap_or_else(|err| panic!("seed {seed}: {err}"));
        assert!(is_valid_assignment(&group, &result.assignments, false));
    }
}

#[test]
fn test_dense_feasible_groups_solve_through_fallback() {
    for (i, n) in [30, 36, 42, 50].into_iter().enumerate() {
        let (group, _) = dense_group(n, 0.9, 100 + i as u64);

        for seed in 0..8 {
            let options = SolveOptions::default()
                .with_seed(seed)
                .with_max_attempts(1)
                .with_full_assert(true);
            let result = solve(&group, options)
                .unwrap_or_else(|err| panic!("n {n}, seed {seed}: {err}"));
            assert!(is_valid_assignment(&group, &result.assignments, false));
        }
    }
}

#[test]
fn test_allowed_mutual_pairs_not_used_when_avoidable() {
    let (group, _) = dense_group(43, 0.9, 7);

    for seed in TEST_SEEDS {
        let options = SolveOptions::default()
            .with_seed(seed)
            .with_max_attempts(1)
            .with_minimal_cycles(true);
        let result = solve(&group, options).unwrap();

        assert_eq!(result.statistics.mutual_pair_count(), 0, "seed {seed}");
        assert!(is_valid_assignment(&group, &result.assignments, false));
    }
}

#[test]
fn test_dense_group_without_cycle_free_draw() {
    let group = lopsided_group();

    for seed in 0..8 {
        let err = solve(&group, SolveOptions::default().with_seed(seed)).unwrap_err();
        assert_eq!(
            err,
            EngineError::InfeasibleConstraints(InfeasibilityReason::NoCycleFreeAssignment)
        );

        let options = SolveOptions::default().with_seed(seed).with_minimal_cycles(true);
        let result = solve(&group, options).unwrap();
        assert!(is_valid_assignment(&group, &result.assignments, true));
        assert!(result.statistics.mutual_pair_count() > 0);
    }
}

#[test]
fn test_fallback_statistics() {
    let group = GroupFixture::new()
        .couple("a", "b")
        .couple("c", "d")
        .exclude("a", "d")
        .exclude("b", "c");
    let options = SolveOptions::default()
        .with_seed(2)
        .with_max_attempts(5)
        .with_minimal_cycles(true)
        .with_full_assert(true);

    let result = solve(&group, options).unwrap();
    let stats = &result.statistics;

    assert!(stats.used_fallback());
    assert_eq!(stats.attempt_count, 5);
    assert_eq!(stats.cycle_lengths, vec![2, 2]);
    let kinds: Vec<PhaseKind> = stats.phase_statistics.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![PhaseKind::Randomized, PhaseKind::Matching, PhaseKind::CycleCover]
    );
}

#[test]
fn test_statistics_for_randomized_solve() {
    let group = GroupFixture::ring(5);

    let result = solve(&group, SolveOptions::default().with_seed(5)).unwrap();
    let stats = &result.statistics;

    assert_eq!(stats.participant_count, 5);
    assert_eq!(stats.solved_by(), Some(PhaseKind::Randomized));
    assert!(!stats.used_fallback());
    assert!(stats.attempt_count >= 1);
    assert_eq!(stats.cycle_lengths.iter().sum::<usize>(), 5);
    assert_eq!(stats.mutual_pair_count(), 0);
}

#[test]
fn test_large_group_with_couples() {
    let mut group = GroupFixture::new();
    for i in 0..50 {
        group = group.couple(&format!("a{i}"), &format!("b{i}"));
    }

    for seed in 0..4 {
        let result = solve(&group, SolveOptions::default().with_seed(seed)).unwrap();
        assert!(is_valid_assignment(&group, &result.assignments, false));
    }
}

#[test]
fn test_full_assert_mode_solves() {
    let group = GroupFixture::new().couple("a", "b").members(["c", "d", "e"]);
    let options = SolveOptions::default().with_seed(4).with_full_assert(true);

    let result = solve(&group, options).unwrap();

    assert!(is_valid_assignment(&group, &result.assignments, false));
}

#[test]
fn test_from_config() {
    let config = DrawConfig::default()
        .with_random_seed(11)
        .with_minimal_cycles(true)
        .with_max_attempts(50);

    let solver = DrawSolver::from_config(&config);

    assert_eq!(solver.options().random_seed, Some(11));
    assert!(solver.options().allow_minimal_cycles);
    assert_eq!(solver.options().max_attempts, 50);
}

#[test]
fn test_result_covers_every_participant() {
    let group = GroupFixture::ring(7);

    let result = solve(&group, SolveOptions::default().with_seed(0)).unwrap();
    let givers: HashSet<&ParticipantId> =
        result.assignments.iter().map(|a: &Assignment| &a.giver).collect();

    assert_eq!(givers.len(), 7);
    assert!(result
        .assignments
        .iter()
        .all(|a| !a.is_self_assignment()));
}
