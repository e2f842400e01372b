//! drawforge Core - Core types and errors for gift-exchange drawings
//!
//! This crate provides the fundamental abstractions for drawforge:
//! - Participant and exclusion types describing a group
//! - Assignment types describing the result of a draw
//! - The `Drawing` record and its completion lifecycle
//! - Error types shared by the engine and the API layer

pub mod api;
pub mod domain;
pub mod error;

pub use api::{ApiError, ApiResponse};
pub use domain::{
    Assignment, AssignmentSet, Drawing, DrawingAssignment, DrawingId, ExclusionKind,
    ExclusionPair, GroupId, Participant, ParticipantId,
};
pub use error::{EngineError, InfeasibilityReason, Result};
