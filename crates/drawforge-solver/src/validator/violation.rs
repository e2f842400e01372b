//! Violation reporting.

use std::fmt;

use drawforge_core::{ExclusionKind, ParticipantId};

/// A single broken invariant in an assignment set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A giver id that is not a participant.
    UnknownGiver { giver: ParticipantId },
    /// A receiver id that is not a participant.
    UnknownReceiver { receiver: ParticipantId },
    /// A participant gives more than once.
    DuplicateGiver { giver: ParticipantId, count: usize },
    /// A participant never gives.
    MissingGiver { participant: ParticipantId },
    /// A participant receives more than once.
    DuplicateReceiver { receiver: ParticipantId, count: usize },
    /// A participant never receives.
    MissingReceiver { participant: ParticipantId },
    /// A participant drew themselves.
    SelfAssignment { participant: ParticipantId },
    /// A participant drew someone they are excluded from.
    ForbiddenPair {
        giver: ParticipantId,
        receiver: ParticipantId,
        kind: ExclusionKind,
    },
    /// Two participants drew each other.
    MutualPair {
        first: ParticipantId,
        second: ParticipantId,
    },
}

impl Violation {
    /// Returns the invariant this violation breaks, numbered 1 to 4.
    pub fn invariant(&self) -> u8 {
        match self {
            Violation::UnknownGiver { .. }
            | Violation::UnknownReceiver { .. }
            | Violation::DuplicateGiver { .. }
            | Violation::MissingGiver { .. }
            | Violation::DuplicateReceiver { .. }
            | Violation::MissingReceiver { .. } => 1,
            Violation::SelfAssignment { .. } => 2,
            Violation::ForbiddenPair { .. } => 3,
            Violation::MutualPair { .. } => 4,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownGiver { giver } => write!(f, "unknown giver {giver}"),
            Violation::UnknownReceiver { receiver } => write!(f, "unknown receiver {receiver}"),
            Violation::DuplicateGiver { giver, count } => {
                write!(f, "{giver} gives {count} times")
            }
            Violation::MissingGiver { participant } => write!(f, "{participant} gives no gift"),
            Violation::DuplicateReceiver { receiver, count } => {
                write!(f, "{receiver} receives {count} times")
            }
            Violation::MissingReceiver { participant } => {
                write!(f, "{participant} receives no gift")
            }
            Violation::SelfAssignment { participant } => {
                write!(f, "{participant} drew themselves")
            }
            Violation::ForbiddenPair {
                giver,
                receiver,
                kind,
            } => write!(f, "{giver} drew {receiver} despite a {kind} exclusion"),
            Violation::MutualPair { first, second } => {
                write!(f, "{first} and {second} drew each other")
            }
        }
    }
}

/// Outcome of validating one assignment set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Returns the violations of one invariant.
    pub fn for_invariant(&self, invariant: u8) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.invariant() == invariant)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        write!(f, "{} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {violation}")?;
        }
        Ok(())
    }
}
