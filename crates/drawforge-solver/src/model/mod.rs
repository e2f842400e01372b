//! Constraint model: participants and their forbidden pairings as a graph.
//!
//! The model maps participant ids to dense indices and stores a symmetric
//! forbidden relation. Couple links are turned into exclusions once, here,
//! so the solver never has to look at partner fields.

use std::collections::HashMap;

use drawforge_core::{
    EngineError, ExclusionKind, ExclusionPair, InfeasibilityReason, Participant, ParticipantId,
    Result,
};
use smallvec::SmallVec;
use tracing::debug;

/// Validated participant graph.
#[derive(Debug, Clone)]
pub struct ConstraintModel {
    ids: Vec<ParticipantId>,
    index: HashMap<ParticipantId, usize>,
    // Row-major n * n; symmetric.
    forbidden: Vec<Option<ExclusionKind>>,
    forbidden_neighbors: Vec<SmallVec<[usize; 4]>>,
    candidates: Vec<Vec<usize>>,
    couple_count: usize,
    explicit_count: usize,
}

impl ConstraintModel {
    /// Builds the model from raw input.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for empty or duplicate ids and self-exclusions
    /// - `UnknownParticipant` for exclusions naming a non-participant
    /// - `InvalidCoupleLink` for dangling, self-referencing or one-sided partner links
    pub fn build(participants: &[Participant], exclusions: &[ExclusionPair]) -> Result<Self> {
        let n = participants.len();
        let mut ids = Vec::with_capacity(n);
        let mut index = HashMap::with_capacity(n);

        for (i, p) in participants.iter().enumerate() {
            if p.id.as_str().is_empty() {
                return Err(EngineError::invalid_input(format!(
                    "participant at position {i} has an empty id"
                )));
            }
            if index.insert(p.id.clone(), i).is_some() {
                return Err(EngineError::invalid_input(format!(
                    "duplicate participant id {}",
                    p.id
                )));
            }
            ids.push(p.id.clone());
        }

        let mut model = Self {
            ids,
            index,
            forbidden: vec![None; n * n],
            forbidden_neighbors: vec![SmallVec::new(); n],
            candidates: Vec::new(),
            couple_count: 0,
            explicit_count: 0,
        };

        for (i, p) in participants.iter().enumerate() {
            let Some(partner) = &p.partner else {
                continue;
            };
            if *partner == p.id {
                return Err(EngineError::InvalidCoupleLink {
                    participant: p.id.clone(),
                    partner: partner.clone(),
                    reason: "participant cannot be their own partner".to_string(),
                });
            }
            let Some(&j) = model.index.get(partner) else {
                return Err(EngineError::InvalidCoupleLink {
                    participant: p.id.clone(),
                    partner: partner.clone(),
                    reason: "partner is not a participant".to_string(),
                });
            };
            if participants[j].partner.as_ref() != Some(&p.id) {
                return Err(EngineError::InvalidCoupleLink {
                    participant: p.id.clone(),
                    partner: partner.clone(),
                    reason: "partner does not link back".to_string(),
                });
            }
            if i < j {
                model.forbid(i, j, ExclusionKind::Couple);
                model.couple_count += 1;
            }
        }

        for pair in exclusions {
            if pair.is_reflexive() {
                return Err(EngineError::invalid_input(format!(
                    "exclusion pairs {} with themselves",
                    pair.first()
                )));
            }
            let a = model.require(pair.first())?;
            let b = model.require(pair.second())?;
            // A couple link already covers the pair; keep the couple kind.
            if model.forbidden[a * n + b].is_none() {
                model.forbid(a, b, ExclusionKind::Explicit);
                model.explicit_count += 1;
            }
        }

        model.candidates = (0..n)
            .map(|g| (0..n).filter(|&r| model.is_allowed(g, r)).collect())
            .collect();

        debug!(
            participant_count = n,
            couple_count = model.couple_count,
            explicit_count = model.explicit_count,
            "Constraint model built"
        );

        Ok(model)
    }

    fn require(&self, id: &ParticipantId) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownParticipant { id: id.clone() })
    }

    fn forbid(&mut self, a: usize, b: usize, kind: ExclusionKind) {
        let n = self.ids.len();
        self.forbidden[a * n + b] = Some(kind);
        self.forbidden[b * n + a] = Some(kind);
        self.forbidden_neighbors[a].push(b);
        self.forbidden_neighbors[b].push(a);
    }

    /// Rejects inputs for which no assignment can exist, before any search.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty group
    /// - `InfeasibleConstraints` for groups below three (two with mutual
    ///   pairs allowed and no exclusion between them is the only exception)
    ///   or a participant excluded from everyone else
    pub fn check_feasibility(&self, allow_minimal_cycles: bool) -> Result<()> {
        let n = self.len();
        match n {
            0 => return Err(EngineError::invalid_input("a draw needs participants")),
            1 => {
                return Err(EngineError::InfeasibleConstraints(
                    InfeasibilityReason::GroupTooSmall { size: 1 },
                ))
            }
            2 if !allow_minimal_cycles || self.exclusion_kind(0, 1).is_some() => {
                return Err(EngineError::InfeasibleConstraints(
                    InfeasibilityReason::GroupTooSmall { size: 2 },
                ))
            }
            _ => {}
        }

        if let Some(p) = (0..n).find(|&p| self.forbidden_neighbors[p].len() >= n - 1) {
            return Err(EngineError::InfeasibleConstraints(
                InfeasibilityReason::NoCandidates {
                    participant: self.ids[p].clone(),
                },
            ));
        }

        Ok(())
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Participant id at `index`.
    pub fn id(&self, index: usize) -> &ParticipantId {
        &self.ids[index]
    }

    pub fn ids(&self) -> &[ParticipantId] {
        &self.ids
    }

    pub fn index_of(&self, id: &ParticipantId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns why `a` and `b` may not be paired, if they may not.
    pub fn exclusion_kind(&self, a: usize, b: usize) -> Option<ExclusionKind> {
        self.forbidden[a * self.len() + b]
    }

    /// Returns true if `giver` may give to `receiver`.
    #[inline]
    pub fn is_allowed(&self, giver: usize, receiver: usize) -> bool {
        giver != receiver && self.forbidden[giver * self.len() + receiver].is_none()
    }

    /// Participants `index` must not be paired with (self excluded).
    pub fn forbidden(&self, index: usize) -> &[usize] {
        &self.forbidden_neighbors[index]
    }

    /// Receivers `giver` may be assigned, in index order.
    pub fn candidates(&self, giver: usize) -> &[usize] {
        &self.candidates[giver]
    }

    /// Number of couple-derived exclusions.
    pub fn couple_count(&self) -> usize {
        self.couple_count
    }

    /// Number of explicit exclusions not already implied by a couple.
    pub fn explicit_count(&self) -> usize {
        self.explicit_count
    }
}
