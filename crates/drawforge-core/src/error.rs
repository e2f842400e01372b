//! Error types for drawforge

use std::fmt;

use thiserror::Error;

use crate::domain::{DrawingId, ParticipantId};

/// Main error type for engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed or duplicate participant data.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// An exclusion pair references an id that is not a participant.
    #[error("Unknown participant: {id}")]
    UnknownParticipant { id: ParticipantId },

    /// A partner link is dangling or not reciprocated.
    #[error("Invalid couple link from {participant} to {partner}: {reason}")]
    InvalidCoupleLink {
        participant: ParticipantId,
        partner: ParticipantId,
        reason: String,
    },

    /// No valid assignment exists for the given constraints.
    #[error("Infeasible constraints: {0}")]
    InfeasibleConstraints(InfeasibilityReason),

    /// The randomized phase ran out of attempts. Never returned by `solve`.
    #[error("Randomized construction gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    /// A completed drawing cannot be repopulated.
    #[error("Drawing {drawing} is already complete")]
    DrawingComplete { drawing: DrawingId },

    /// The engine produced an assignment that failed its own validation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Creates an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns the stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidInput { .. } => "INVALID_INPUT",
            EngineError::UnknownParticipant { .. } => "UNKNOWN_PARTICIPANT",
            EngineError::InvalidCoupleLink { .. } => "INVALID_COUPLE_LINK",
            EngineError::InfeasibleConstraints(_) => "INFEASIBLE_CONSTRAINTS",
            EngineError::RetriesExhausted { .. } => "RETRIES_EXHAUSTED",
            EngineError::DrawingComplete { .. } => "DRAWING_COMPLETE",
            EngineError::Internal(_) => "INTERNAL",
        }
    }

    /// Returns the HTTP-style status the API layer reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::InvalidInput { .. }
            | EngineError::UnknownParticipant { .. }
            | EngineError::InvalidCoupleLink { .. } => 400,
            EngineError::InfeasibleConstraints(_) => 422,
            EngineError::DrawingComplete { .. } => 409,
            EngineError::RetriesExhausted { .. } | EngineError::Internal(_) => 500,
        }
    }

    /// Returns true if the caller sent bad data.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput { .. }
                | EngineError::UnknownParticipant { .. }
                | EngineError::InvalidCoupleLink { .. }
        )
    }
}

/// Why no assignment can be produced.
///
/// Every reason renders as a message an organizer can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfeasibilityReason {
    /// Fewer participants than a draw needs.
    GroupTooSmall { size: usize },

    /// A participant is excluded from everyone else.
    NoCandidates { participant: ParticipantId },

    /// No one-to-one assignment exists; these givers could not be matched.
    NoPerfectMatching { unmatched: Vec<ParticipantId> },

    /// Every valid assignment contains two people drawing each other.
    NoCycleFreeAssignment,

    /// The exact search gave up before proving either outcome.
    SearchBudgetExhausted { nodes: u64 },
}

impl fmt::Display for InfeasibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfeasibilityReason::GroupTooSmall { size } => write!(
                f,
                "a group of {size} cannot draw; add a participant (at least 3 are needed)"
            ),
            InfeasibilityReason::NoCandidates { participant } => write!(
                f,
                "{participant} is excluded from every other participant; remove an exclusion or add a participant"
            ),
            InfeasibilityReason::NoPerfectMatching { unmatched } => {
                let names: Vec<&str> = unmatched.iter().map(ParticipantId::as_str).collect();
                write!(
                    f,
                    "no valid receiver arrangement exists for {}; remove an exclusion or add a participant",
                    names.join(", ")
                )
            }
            InfeasibilityReason::NoCycleFreeAssignment => write!(
                f,
                "every valid draw pairs two people with each other; allow mutual pairs, remove an exclusion or add a participant"
            ),
            InfeasibilityReason::SearchBudgetExhausted { nodes } => write!(
                f,
                "the search for a draw stopped after {nodes} steps before deciding; raise search_node_limit"
            ),
        }
    }
}

/// Result type alias for drawforge operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(EngineError::invalid_input("x").code(), "INVALID_INPUT");
        assert_eq!(
            EngineError::RetriesExhausted { attempts: 3 }.code(),
            "RETRIES_EXHAUSTED"
        );
        assert_eq!(EngineError::Internal("bug".into()).status_code(), 500);
    }

    #[test]
    fn test_caller_errors() {
        assert!(EngineError::invalid_input("x").is_caller_error());
        assert!(!EngineError::InfeasibleConstraints(InfeasibilityReason::NoCycleFreeAssignment)
            .is_caller_error());
    }

    #[test]
    fn test_reason_messages_are_actionable() {
        let reason = InfeasibilityReason::NoPerfectMatching {
            unmatched: vec![ParticipantId::from("a"), ParticipantId::from("b")],
        };
        let message = reason.to_string();

        assert!(message.contains("a, b"));
        assert!(message.contains("remove an exclusion"));
    }
}
