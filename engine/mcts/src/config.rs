//! Search configuration parameters.

/// Configuration for the tree search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploration constant `c` in the UCB1 formula.
    /// Higher values favour rarely visited children over high value estimates.
    pub exploration: f64,

    /// Emit a debug progress line every N iterations (0 disables).
    pub log_interval: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            log_interval: 0,
        }
    }
}

impl MctsConfig {
    /// Create a quiet config for testing.
    pub fn for_testing() -> Self {
        Self::default()
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the progress log interval.
    pub fn with_log_interval(mut self, n: u64) -> Self {
        self.log_interval = n;
        self
    }
}
