//! Unordered exclusion pairs.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ParticipantId;

/// Two participants who must not be assigned to each other in either direction.
///
/// The pair is unordered: `ExclusionPair::new(a, b) == ExclusionPair::new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "(ParticipantId, ParticipantId)"))]
#[cfg_attr(feature = "serde", serde(into = "(ParticipantId, ParticipantId)"))]
pub struct ExclusionPair {
    low: ParticipantId,
    high: ParticipantId,
}

impl ExclusionPair {
    pub fn new(a: impl Into<ParticipantId>, b: impl Into<ParticipantId>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn first(&self) -> &ParticipantId {
        &self.low
    }

    pub fn second(&self) -> &ParticipantId {
        &self.high
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.low == *id || self.high == *id
    }

    /// Returns the other member of the pair, if `id` is a member.
    pub fn other(&self, id: &ParticipantId) -> Option<&ParticipantId> {
        if self.low == *id {
            Some(&self.high)
        } else if self.high == *id {
            Some(&self.low)
        } else {
            None
        }
    }

    /// Returns true if both members are the same participant.
    pub fn is_reflexive(&self) -> bool {
        self.low == self.high
    }
}

impl From<(ParticipantId, ParticipantId)> for ExclusionPair {
    fn from((a, b): (ParticipantId, ParticipantId)) -> Self {
        ExclusionPair::new(a, b)
    }
}

impl From<ExclusionPair> for (ParticipantId, ParticipantId) {
    fn from(pair: ExclusionPair) -> Self {
        (pair.low, pair.high)
    }
}

/// Where a forbidden pairing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExclusionKind {
    /// Derived from a participant's partner link.
    Couple,
    /// Supplied by the organizer.
    Explicit,
}

impl fmt::Display for ExclusionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionKind::Couple => write!(f, "couple"),
            ExclusionKind::Explicit => write!(f, "explicit"),
        }
    }
}
