//! The two operations the engine exposes to its callers.
//!
//! These are thin wrappers around [`DrawSolver`] and [`Validator`] for
//! callers that do not need statistics or a reusable solver.

use drawforge_core::{AssignmentSet, ExclusionPair, Participant, Result};

use crate::model::ConstraintModel;
use crate::options::SolveOptions;
use crate::solver::DrawSolver;
use crate::validator::{ValidationReport, Validator};

/// Draws a receiver for every participant.
///
/// # Errors
///
/// Input errors (`InvalidInput`, `UnknownParticipant`, `InvalidCoupleLink`)
/// or `InfeasibleConstraints` when no acceptable draw exists.
pub fn solve(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    options: &SolveOptions,
) -> Result<AssignmentSet> {
    DrawSolver::new(options.clone())
        .solve(participants, exclusions)
        .map(|result| result.assignments)
}

/// Validates `assignments` with mutual pairs disallowed.
///
/// Returns `Err` only when the participants or exclusions themselves are
/// malformed; broken assignments are reported in the `ValidationReport`.
pub fn validate(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    assignments: &AssignmentSet,
) -> Result<ValidationReport> {
    validate_with(participants, exclusions, assignments, &SolveOptions::default())
}

/// Validates `assignments` under the mutual-pair policy of `options`.
pub fn validate_with(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    assignments: &AssignmentSet,
    options: &SolveOptions,
) -> Result<ValidationReport> {
    let model = ConstraintModel::build(participants, exclusions)?;
    Ok(Validator::new(&model, options.allow_minimal_cycles).validate(assignments))
}

#[cfg(test)]
mod tests {
    use drawforge_core::{Assignment, EngineError};
    use drawforge_test::{GroupFixture, TEST_SEEDS};

    use super::*;
    use crate::validator::Violation;

    #[test]
    fn test_validate_accepts_solved_draws() {
        let group = GroupFixture::new()
            .couple("a", "b")
            .couple("c", "d")
            .members(["e", "f"])
            .exclude("e", "f");

        for seed in TEST_SEEDS {
            let options = SolveOptions::default().with_seed(seed);
            let set = solve(group.participants(), group.exclusions(), &options).unwrap();
            let report = validate(group.participants(), group.exclusions(), &set).unwrap();

            assert!(report.is_valid(), "seed {seed}: {report}");
        }
    }

    #[test]
    fn test_corrupted_draw_reports_self_assignment() {
        let group = GroupFixture::ring(5);
        let options = SolveOptions::default().with_seed(17);
        let set = solve(group.participants(), group.exclusions(), &options).unwrap();

        // Give p0 the receiver of whoever drew p0, and that giver p0's receiver.
        let p0 = group.ids()[0].clone();
        let drew_p0 = set.giver_of(&p0).unwrap().clone();
        let p0_receiver = set.receiver_of(&p0).unwrap().clone();
        let corrupted: AssignmentSet = set
            .iter()
            .map(|a| {
                if a.giver == p0 {
                    Assignment::new(p0.clone(), p0.clone())
                } else if a.giver == drew_p0 {
                    Assignment::new(drew_p0.clone(), p0_receiver.clone())
                } else {
                    a.clone()
                }
            })
            .collect();

        let report = validate(group.participants(), group.exclusions(), &corrupted).unwrap();

        assert_eq!(
            report.violations(),
            &[Violation::SelfAssignment { participant: p0 }]
        );
    }

    #[test]
    fn test_validate_rejects_malformed_input() {
        let group = GroupFixture::ring(3);
        let exclusions = vec![ExclusionPair::new("p0", "ghost")];

        let err =
            validate(group.participants(), &exclusions, &AssignmentSet::default()).unwrap_err();

        assert_eq!(
            err,
            EngineError::UnknownParticipant {
                id: "ghost".into()
            }
        );
    }

    #[test]
    fn test_validate_with_mutual_pair_policy() {
        let group = GroupFixture::ring(4);
        let set =
            AssignmentSet::from_pairs([("p0", "p1"), ("p1", "p0"), ("p2", "p3"), ("p3", "p2")]);

        let strict = validate(group.participants(), group.exclusions(), &set).unwrap();
        let relaxed = validate_with(
            group.participants(),
            group.exclusions(),
            &set,
            &SolveOptions::default().with_minimal_cycles(true),
        )
        .unwrap();

        assert_eq!(strict.for_invariant(4).count(), 2);
        assert!(relaxed.is_valid());
    }
}
