//! Engine configuration: the single cooperative cancellation primitive
//! (a deadline) and the optional `maxVisited` resource cap.
//!
//! Mirrors the plain-struct-plus-builder shape this codebase's other
//! algorithm configs use (a `*ConfigBuilder` plus `build()`), scaled down
//! to the two knobs this engine actually exposes.

use std::time::{Duration, Instant};

/// Deadline and resource bounds for a single planning request.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    deadline: Option<Instant>,
    max_visited: Option<usize>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    pub(crate) fn deadline_elapsed(&self) -> bool {
        matches!(self.deadline, Some(d) if Instant::now() >= d)
    }

    pub(crate) fn visited_cap_exceeded(&self, visited_len: usize) -> bool {
        matches!(self.max_visited, Some(cap) if visited_len > cap)
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    deadline: Option<Instant>,
    max_visited: Option<usize>,
}

impl EngineConfigBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn max_visited(mut self, cap: usize) -> Self {
        self.max_visited = Some(cap);
        self
    }

    pub fn build(self) -> EngineConfig {
        EngineConfig {
            deadline: self.deadline,
            max_visited: self.max_visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn zero_duration_timeout_elapses_immediately() {
        let config = EngineConfig::builder().timeout(Duration::from_millis(0)).build();
        sleep(Duration::from_millis(5));
        assert!(config.deadline_elapsed());
    }

    #[test]
    fn no_deadline_never_elapses() {
        let config = EngineConfig::new();
        assert!(!config.deadline_elapsed());
    }

    #[test]
    fn visited_cap_triggers_past_threshold() {
        let config = EngineConfig::builder().max_visited(2).build();
        assert!(!config.visited_cap_exceeded(2));
        assert!(config.visited_cap_exceeded(3));
    }
}
