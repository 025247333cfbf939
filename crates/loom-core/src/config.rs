//! Engine configuration

use loom_context::DEFAULT_DEPTH;
use loom_dispatch::{BehaviorId, ProcessorRegistry};
use loom_pipeline::STEP_DELAY;
use std::time::Duration;

/// Canvas engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Traversal bound for context bundles, in hops
    pub max_context_depth: usize,
    /// Delay between consecutive batch generation calls
    pub step_delay: Duration,
    /// Behavior offered when nothing is selected
    pub fallback_behavior: BehaviorId,
}

impl EngineConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a custom context depth
    #[inline]
    #[must_use]
    pub fn with_max_context_depth(mut self, depth: usize) -> Self {
        self.max_context_depth = depth;
        self
    }

    /// With a custom batch step delay
    #[inline]
    #[must_use]
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// With a custom fallback behavior
    #[inline]
    #[must_use]
    pub fn with_fallback_behavior(mut self, behavior: BehaviorId) -> Self {
        self.fallback_behavior = behavior;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_context_depth: DEFAULT_DEPTH,
            step_delay: STEP_DELAY,
            fallback_behavior: ProcessorRegistry::FALLBACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_component_constants() {
        let config = EngineConfig::new();
        assert_eq!(config.max_context_depth, DEFAULT_DEPTH);
        assert_eq!(config.step_delay, STEP_DELAY);
        assert_eq!(config.fallback_behavior, ProcessorRegistry::FALLBACK);
    }

    #[test]
    fn builder_overrides() {
        let config = EngineConfig::new()
            .with_max_context_depth(4)
            .with_step_delay(Duration::from_millis(10));
        assert_eq!(config.max_context_depth, 4);
        assert_eq!(config.step_delay, Duration::from_millis(10));
    }
}
