//! Per-solve options.

use drawforge_config::{DrawConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEARCH_NODE_LIMIT};

/// Options for one `solve` or `validate` call.
///
/// # Example
///
/// ```
/// use drawforge_solver::SolveOptions;
///
/// let options = SolveOptions::default()
///     .with_seed(42)
///     .with_max_attempts(100);
///
/// assert!(!options.allow_minimal_cycles);
/// assert_eq!(options.random_seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOptions {
    /// Permit two participants to draw each other when no other draw exists.
    pub allow_minimal_cycles: bool,
    /// Attempt budget of the randomized phase.
    pub max_attempts: u32,
    /// Search budget of the cycle cover phase.
    pub search_node_limit: u64,
    /// Seed for the per-solve RNG; `None` seeds from the OS.
    pub random_seed: Option<u64>,
    /// Validate every phase result, not only the returned one.
    pub full_assert: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            allow_minimal_cycles: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            search_node_limit: DEFAULT_SEARCH_NODE_LIMIT,
            random_seed: None,
            full_assert: false,
        }
    }
}

impl SolveOptions {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_minimal_cycles(mut self, allow: bool) -> Self {
        self.allow_minimal_cycles = allow;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_search_node_limit(mut self, limit: u64) -> Self {
        self.search_node_limit = limit;
        self
    }

    pub fn with_full_assert(mut self, enabled: bool) -> Self {
        self.full_assert = enabled;
        self
    }
}

impl From<&DrawConfig> for SolveOptions {
    fn from(config: &DrawConfig) -> Self {
        Self {
            allow_minimal_cycles: config.allow_minimal_cycles,
            max_attempts: config.max_attempts,
            search_node_limit: config.search_node_limit,
            random_seed: config.random_seed,
            full_assert: config.is_full_assert(),
        }
    }
}
