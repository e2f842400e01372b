//! Drawing records and their completion lifecycle.
//!
//! A `Drawing` is created empty, populated once by a successful solve and
//! then frozen. Re-running a draw for the same group creates a new
//! `Drawing`, so earlier results stay available as history.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Assignment, AssignmentSet, ParticipantId};
use crate::error::{EngineError, Result};

/// Identifier of a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DrawingId(Uuid);

impl DrawingId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for DrawingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a gift-exchange group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An assignment as stored with a drawing.
///
/// Notification and view tracking belong to the surrounding system; the
/// giver and receiver are fixed once the drawing is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrawingAssignment {
    assignment: Assignment,
    pub notification_sent_at: Option<DateTime<Utc>>,
    pub viewed: bool,
}

impl DrawingAssignment {
    fn new(assignment: Assignment) -> Self {
        Self {
            assignment,
            notification_sent_at: None,
            viewed: false,
        }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn giver(&self) -> &ParticipantId {
        &self.assignment.giver
    }

    pub fn receiver(&self) -> &ParticipantId {
        &self.assignment.receiver
    }

    pub fn mark_notified(&mut self, at: DateTime<Utc>) {
        self.notification_sent_at = Some(at);
    }

    pub fn mark_viewed(&mut self) {
        self.viewed = true;
    }
}

/// One run of the engine for a group.
///
/// Deserialization goes through [`Drawing::restore`], so a stored record
/// cannot mark a drawing complete with a broken set of assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DrawingRecord"))]
pub struct Drawing {
    id: DrawingId,
    group_id: GroupId,
    draw_date: DateTime<Utc>,
    participants: Vec<ParticipantId>,
    assignments: Vec<DrawingAssignment>,
    is_complete: bool,
}

impl Drawing {
    /// Creates an empty, incomplete drawing over the given participant set.
    pub fn new(group_id: GroupId, participants: Vec<ParticipantId>) -> Self {
        Self {
            id: DrawingId::new_v4(),
            group_id,
            draw_date: Utc::now(),
            participants,
            assignments: Vec::new(),
            is_complete: false,
        }
    }

    /// Rebuilds a stored drawing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if an incomplete drawing carries assignments,
    /// or if a complete one does not give every participant exactly one
    /// receiver other than themselves among the participants.
    pub fn restore(
        id: DrawingId,
        group_id: GroupId,
        draw_date: DateTime<Utc>,
        participants: Vec<ParticipantId>,
        assignments: Vec<DrawingAssignment>,
        is_complete: bool,
    ) -> Result<Self> {
        let drawing = Self {
            id,
            group_id,
            draw_date,
            participants,
            assignments,
            is_complete,
        };
        drawing.check_assignments()?;
        Ok(drawing)
    }

    fn check_assignments(&self) -> Result<()> {
        if !self.is_complete {
            if self.assignments.is_empty() {
                return Ok(());
            }
            return Err(EngineError::invalid_input(format!(
                "drawing {} is incomplete but has assignments",
                self.id
            )));
        }

        let participants: HashSet<&ParticipantId> = self.participants.iter().collect();
        let mut givers = HashSet::new();
        let mut receivers = HashSet::new();
        for a in &self.assignments {
            let (giver, receiver) = (a.giver(), a.receiver());
            if giver == receiver
                || !participants.contains(giver)
                || !participants.contains(receiver)
                || !givers.insert(giver)
                || !receivers.insert(receiver)
            {
                return Err(EngineError::invalid_input(format!(
                    "drawing {} has an invalid assignment {giver} -> {receiver}",
                    self.id
                )));
            }
        }
        if givers.len() != participants.len() {
            return Err(EngineError::invalid_input(format!(
                "drawing {} does not assign every participant",
                self.id
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> DrawingId {
        self.id
    }

    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    pub fn draw_date(&self) -> DateTime<Utc> {
        self.draw_date
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn assignments(&self) -> &[DrawingAssignment] {
        &self.assignments
    }

    /// Mutable access to per-assignment metadata.
    pub fn assignments_mut(&mut self) -> impl Iterator<Item = &mut DrawingAssignment> {
        self.assignments.iter_mut()
    }

    /// Returns the engine-level assignment set.
    pub fn assignment_set(&self) -> AssignmentSet {
        self.assignments
            .iter()
            .map(|a| a.assignment.clone())
            .collect()
    }

    pub fn receiver_for(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.assignments
            .iter()
            .find(|a| a.giver() == giver)
            .map(DrawingAssignment::receiver)
    }

    /// Stores the assignments and marks the drawing complete.
    ///
    /// The caller is responsible for validating `assignments` first.
    ///
    /// # Errors
    ///
    /// Returns `DrawingComplete` if the drawing was already completed.
    pub fn complete(&mut self, assignments: AssignmentSet) -> Result<()> {
        if self.is_complete {
            return Err(EngineError::DrawingComplete { drawing: self.id });
        }
        self.assignments = assignments
            .into_iter()
            .map(DrawingAssignment::new)
            .collect();
        self.is_complete = true;
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DrawingRecord {
    id: DrawingId,
    group_id: GroupId,
    draw_date: DateTime<Utc>,
    participants: Vec<ParticipantId>,
    assignments: Vec<DrawingAssignment>,
    is_complete: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<DrawingRecord> for Drawing {
    type Error = EngineError;

    fn try_from(record: DrawingRecord) -> Result<Self> {
        Drawing::restore(
            record.id,
            record.group_id,
            record.draw_date,
            record.participants,
            record.assignments,
            record.is_complete,
        )
    }
}
