//! Assignment validation.
//!
//! The validator checks an assignment set against a constraint model and
//! reports every violation it finds, not only the first. The solver runs it
//! on its own output before returning, and callers can run it on imported
//! or hand-edited assignments.
//!
//! Invariants checked:
//! 1. Every participant gives exactly once and receives exactly once
//! 2. Nobody draws themselves
//! 3. Nobody draws an excluded partner (couple or explicit)
//! 4. Nobody draws the person who drew them, unless mutual pairs are allowed

mod violation;

use std::collections::HashSet;

use drawforge_core::AssignmentSet;

use crate::model::ConstraintModel;

pub use violation::{ValidationReport, Violation};

/// Checks assignment sets against one constraint model.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    model: &'a ConstraintModel,
    allow_minimal_cycles: bool,
}

impl<'a> Validator<'a> {
    pub fn new(model: &'a ConstraintModel, allow_minimal_cycles: bool) -> Self {
        Self {
            model,
            allow_minimal_cycles,
        }
    }

    /// Validates `assignments`, collecting every violation.
    pub fn validate(&self, assignments: &AssignmentSet) -> ValidationReport {
        let model = self.model;
        let n = model.len();
        let mut violations = Vec::new();
        let mut gives = vec![0usize; n];
        let mut receives = vec![0usize; n];
        // Known (giver, receiver) index pairs, in input order.
        let mut edges = Vec::with_capacity(assignments.len());

        for assignment in assignments {
            let giver = model.index_of(&assignment.giver);
            let receiver = model.index_of(&assignment.receiver);

            if giver.is_none() {
                violations.push(Violation::UnknownGiver {
                    giver: assignment.giver.clone(),
                });
            }
            if receiver.is_none() {
                violations.push(Violation::UnknownReceiver {
                    receiver: assignment.receiver.clone(),
                });
            }
            if let Some(g) = giver {
                gives[g] += 1;
            }
            if let Some(r) = receiver {
                receives[r] += 1;
            }
            if let (Some(g), Some(r)) = (giver, receiver) {
                edges.push((g, r));
            }
        }

        for p in 0..n {
            let id = model.id(p);
            match gives[p] {
                0 => violations.push(Violation::MissingGiver {
                    participant: id.clone(),
                }),
                1 => {}
                count => violations.push(Violation::DuplicateGiver {
                    giver: id.clone(),
                    count,
                }),
            }
            match receives[p] {
                0 => violations.push(Violation::MissingReceiver {
                    participant: id.clone(),
                }),
                1 => {}
                count => violations.push(Violation::DuplicateReceiver {
                    receiver: id.clone(),
                    count,
                }),
            }
        }

        for &(g, r) in &edges {
            if g == r {
                violations.push(Violation::SelfAssignment {
                    participant: model.id(g).clone(),
                });
            } else if let Some(kind) = model.exclusion_kind(g, r) {
                violations.push(Violation::ForbiddenPair {
                    giver: model.id(g).clone(),
                    receiver: model.id(r).clone(),
                    kind,
                });
            }
        }

        if !self.allow_minimal_cycles {
            let present: HashSet<(usize, usize)> = edges.iter().copied().collect();
            let mut reported = HashSet::new();
            for &(g, r) in &edges {
                let key = (g.min(r), g.max(r));
                if g != r && present.contains(&(r, g)) && reported.insert(key) {
                    violations.push(Violation::MutualPair {
                        first: model.id(key.0).clone(),
                        second: model.id(key.1).clone(),
                    });
                }
            }
        }

        ValidationReport::new(violations)
    }
}
