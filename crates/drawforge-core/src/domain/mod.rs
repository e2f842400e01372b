//! Domain model for gift-exchange groups
//!
//! - `Participant`: A group member, optionally linked to a couple partner
//! - `ExclusionPair`: Two participants who must not draw each other
//! - `Assignment` / `AssignmentSet`: The giver-to-receiver result of a draw
//! - `Drawing`: One persisted run of the engine for a group

mod assignment;
mod drawing;
mod exclusion;
mod participant;

pub use assignment::{Assignment, AssignmentSet};
pub use drawing::{Drawing, DrawingAssignment, DrawingId, GroupId};
pub use exclusion::{ExclusionKind, ExclusionPair};
pub use participant::{Participant, ParticipantId};
