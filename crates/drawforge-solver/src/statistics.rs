//! Solve statistics collection and reporting.
//!
//! This module provides types for tracking what each phase did during a
//! solve: how long it ran, how much work it performed and how it ended.

use std::fmt;
use std::time::Duration;

/// The phase kinds a solve can run through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// Shuffled greedy construction with restarts.
    Randomized,
    /// Augmenting-path perfect matching plus mutual-pair repair.
    Matching,
    /// Exact search for a cover by cycles of length three or more.
    CycleCover,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::Randomized => write!(f, "Randomized"),
            PhaseKind::Matching => write!(f, "Matching"),
            PhaseKind::CycleCover => write!(f, "CycleCover"),
        }
    }
}

/// How a phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseResult {
    /// Produced an acceptable assignment.
    Solved,
    /// Ran out of budget without deciding.
    Exhausted,
    /// Proved that no acceptable assignment exists.
    Infeasible,
    /// Produced an assignment that still contains mutual pairs.
    MutualPairsRemain,
}

/// Statistics for a single phase.
#[derive(Debug, Clone)]
pub struct PhaseStatistics {
    pub kind: PhaseKind,
    /// Time spent in this phase.
    pub duration: Duration,
    /// Attempts, augmentations or searches, depending on the phase.
    pub step_count: u64,
    /// Mutual pairs removed by repair (matching phase only).
    pub repair_count: u64,
    pub result: PhaseResult,
}

impl PhaseStatistics {
    pub fn new(kind: PhaseKind) -> Self {
        Self {
            kind,
            duration: Duration::ZERO,
            step_count: 0,
            repair_count: 0,
            result: PhaseResult::Exhausted,
        }
    }

    /// Returns the average time per step.
    pub fn avg_time_per_step(&self) -> Duration {
        if self.step_count == 0 {
            Duration::ZERO
        } else {
            self.duration / self.step_count.min(u32::MAX as u64) as u32
        }
    }
}

/// Complete statistics for a solve.
#[derive(Debug, Clone)]
pub struct SolveStatistics {
    pub participant_count: usize,
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Randomized attempts used.
    pub attempt_count: u32,
    /// Cycle cover searches run.
    pub search_node_count: u64,
    /// Statistics for each phase that ran.
    pub phase_statistics: Vec<PhaseStatistics>,
    /// Cycle lengths of the returned assignment, ascending.
    pub cycle_lengths: Vec<usize>,
}

impl SolveStatistics {
    pub fn new(participant_count: usize) -> Self {
        Self {
            participant_count,
            total_duration: Duration::ZERO,
            attempt_count: 0,
            search_node_count: 0,
            phase_statistics: Vec::new(),
            cycle_lengths: Vec::new(),
        }
    }

    pub fn record_phase(&mut self, phase: PhaseStatistics) {
        self.phase_statistics.push(phase);
    }

    /// Returns the phase that produced the result, if any did.
    pub fn solved_by(&self) -> Option<PhaseKind> {
        self.phase_statistics
            .iter()
            .rev()
            .find(|p| p.result == PhaseResult::Solved)
            .map(|p| p.kind)
    }

    /// Returns true if the exact fallback had to run.
    pub fn used_fallback(&self) -> bool {
        self.phase_statistics
            .iter()
            .any(|p| p.kind != PhaseKind::Randomized)
    }

    /// Returns the number of mutual pairs in the result.
    pub fn mutual_pair_count(&self) -> usize {
        self.cycle_lengths.iter().filter(|&&len| len == 2).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_by_uses_last_solved_phase() {
        let mut stats = SolveStatistics::new(5);
        let mut randomized = PhaseStatistics::new(PhaseKind::Randomized);
        randomized.result = PhaseResult::Exhausted;
        let mut matching = PhaseStatistics::new(PhaseKind::Matching);
        matching.result = PhaseResult::Solved;
        stats.record_phase(randomized);
        stats.record_phase(matching);

        assert_eq!(stats.solved_by(), Some(PhaseKind::Matching));
        assert!(stats.used_fallback());
    }

    #[test]
    fn test_avg_time_per_step() {
        let mut phase = PhaseStatistics::new(PhaseKind::Randomized);
        assert_eq!(phase.avg_time_per_step(), Duration::ZERO);

        phase.duration = Duration::from_millis(10);
        phase.step_count = 5;
        assert_eq!(phase.avg_time_per_step(), Duration::from_millis(2));
    }

    #[test]
    fn test_mutual_pair_count() {
        let mut stats = SolveStatistics::new(7);
        stats.cycle_lengths = vec![2, 2, 3];

        assert_eq!(stats.mutual_pair_count(), 2);
    }
}
