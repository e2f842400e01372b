//! Giver-to-receiver assignments.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ParticipantId;

/// One giver drawing one receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    pub giver: ParticipantId,
    pub receiver: ParticipantId,
}

impl Assignment {
    pub fn new(giver: impl Into<ParticipantId>, receiver: impl Into<ParticipantId>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }

    pub fn is_self_assignment(&self) -> bool {
        self.giver == self.receiver
    }
}

/// The full result of a draw.
///
/// An `AssignmentSet` is only a container: it can hold an invalid
/// assignment (for example one imported for validation). Use the validator
/// to check it against a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssignmentSet {
    assignments: Vec<Assignment>,
}

impl AssignmentSet {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Builds a set from `(giver, receiver)` pairs.
    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<ParticipantId>,
        B: Into<ParticipantId>,
    {
        Self {
            assignments: pairs
                .into_iter()
                .map(|(giver, receiver)| Assignment::new(giver, receiver))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.assignments.iter()
    }

    pub fn as_slice(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn into_inner(self) -> Vec<Assignment> {
        self.assignments
    }

    /// Returns the receiver drawn by `giver` (first match).
    pub fn receiver_of(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.assignments
            .iter()
            .find(|a| a.giver == *giver)
            .map(|a| &a.receiver)
    }

    /// Returns the giver who drew `receiver` (first match).
    pub fn giver_of(&self, receiver: &ParticipantId) -> Option<&ParticipantId> {
        self.assignments
            .iter()
            .find(|a| a.receiver == *receiver)
            .map(|a| &a.giver)
    }

    /// Sorts assignments by giver id.
    pub fn sort_by_giver(&mut self) {
        self.assignments.sort_by(|a, b| a.giver.cmp(&b.giver));
    }

    /// Decomposes the assignment into closed cycles.
    ///
    /// Chains that never return to their start (possible only in an invalid
    /// set) are not reported.
    pub fn cycles(&self) -> Vec<Vec<ParticipantId>> {
        let next: HashMap<&ParticipantId, &ParticipantId> = self
            .assignments
            .iter()
            .map(|a| (&a.giver, &a.receiver))
            .collect();

        let mut visited: HashSet<&ParticipantId> = HashSet::new();
        let mut cycles = Vec::new();

        for start in self.assignments.iter().map(|a| &a.giver) {
            if visited.contains(start) {
                continue;
            }

            let mut chain = Vec::new();
            let mut current = start;
            let closed = loop {
                if !visited.insert(current) {
                    break current == start && !chain.is_empty();
                }
                chain.push(current.clone());
                match next.get(current) {
                    Some(receiver) => current = *receiver,
                    None => break false,
                }
            };

            if closed {
                cycles.push(chain);
            }
        }

        cycles
    }

    /// Returns the sorted lengths of all closed cycles.
    pub fn cycle_lengths(&self) -> Vec<usize> {
        let mut lengths: Vec<usize> = self.cycles().iter().map(Vec::len).collect();
        lengths.sort_unstable();
        lengths
    }
}

impl FromIterator<Assignment> for AssignmentSet {
    fn from_iter<I: IntoIterator<Item = Assignment>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for AssignmentSet {
    type Item = Assignment;
    type IntoIter = std::vec::IntoIter<Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.into_iter()
    }
}

impl<'a> IntoIterator for &'a AssignmentSet {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}
