//! Solve-level scope.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::model::ConstraintModel;
use crate::options::SolveOptions;
use crate::statistics::{PhaseStatistics, SolveStatistics};

/// State owned by a single solve call.
///
/// The RNG lives here rather than in a global so concurrent solves for
/// different groups never share random state.
pub struct SolveScope<'a> {
    model: &'a ConstraintModel,
    options: &'a SolveOptions,
    rng: ChaCha8Rng,
    start_time: Instant,
    attempt_count: u32,
    node_count: u64,
    statistics: SolveStatistics,
}

impl<'a> SolveScope<'a> {
    pub fn new(model: &'a ConstraintModel, options: &'a SolveOptions) -> Self {
        let rng = match options.random_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            model,
            options,
            rng,
            start_time: Instant::now(),
            attempt_count: 0,
            node_count: 0,
            statistics: SolveStatistics::new(model.len()),
        }
    }

    pub fn model(&self) -> &'a ConstraintModel {
        self.model
    }

    pub fn options(&self) -> &'a SolveOptions {
        self.options
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn increment_attempt_count(&mut self) -> u32 {
        self.attempt_count += 1;
        self.attempt_count
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn increment_node_count(&mut self) -> u64 {
        self.node_count += 1;
        self.node_count
    }

    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn record_phase(&mut self, phase: PhaseStatistics) {
        self.statistics.record_phase(phase);
    }

    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }

    /// Finishes the scope, stamping the total duration.
    pub fn into_statistics(mut self) -> SolveStatistics {
        self.statistics.total_duration = self.elapsed();
        self.statistics.attempt_count = self.attempt_count;
        self.statistics.search_node_count = self.node_count;
        self.statistics
    }
}
