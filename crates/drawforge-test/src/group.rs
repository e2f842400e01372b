//! Group fixtures.
//!
//! # Example
//!
//! ```
//! use drawforge_test::GroupFixture;
//!
//! let group = GroupFixture::new()
//!     .members(["a", "b"])
//!     .couple("c", "d")
//!     .exclude("a", "c");
//!
//! assert_eq!(group.participants().len(), 4);
//! assert_eq!(group.exclusions().len(), 1);
//! ```

use drawforge_core::{ExclusionPair, Participant, ParticipantId};

/// Participants named after their ids, with no couples.
pub fn participants(ids: &[&str]) -> Vec<Participant> {
    ids.iter().map(|id| Participant::new(*id, id.to_uppercase())).collect()
}

/// Builder for a group's participants and exclusions.
#[derive(Debug, Clone, Default)]
pub struct GroupFixture {
    participants: Vec<Participant>,
    exclusions: Vec<ExclusionPair>,
}

impl GroupFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A group of `n` single participants named `p0`, `p1`, ...
    pub fn ring(n: usize) -> Self {
        let mut fixture = Self::new();
        for i in 0..n {
            fixture = fixture.member(&format!("p{i}"));
        }
        fixture
    }

    pub fn member(mut self, id: &str) -> Self {
        self.participants.push(Participant::new(id, id.to_uppercase()));
        self
    }

    pub fn members<'a>(mut self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        for id in ids {
            self = self.member(id);
        }
        self
    }

    /// Adds two participants linked to each other as partners.
    pub fn couple(mut self, a: &str, b: &str) -> Self {
        self.participants
            .push(Participant::new(a, a.to_uppercase()).with_partner(b));
        self.participants
            .push(Participant::new(b, b.to_uppercase()).with_partner(a));
        self
    }

    pub fn exclude(mut self, a: &str, b: &str) -> Self {
        self.exclusions.push(ExclusionPair::new(a, b));
        self
    }

    /// Excludes every pair among `ids`.
    pub fn exclude_all(mut self, ids: &[&str]) -> Self {
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                self = self.exclude(a, b);
            }
        }
        self
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn exclusions(&self) -> &[ExclusionPair] {
        &self.exclusions
    }

    pub fn ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }

    /// Returns true if `a` and `b` must not be paired (couple or explicit).
    pub fn is_excluded(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        let couple = self
            .participants
            .iter()
            .any(|p| p.id == *a && p.partner.as_ref() == Some(b));
        couple
            || self
                .exclusions
                .iter()
                .any(|pair| pair.contains(a) && pair.other(a) == Some(b))
    }
}
