//! Coordinator options.

/// Options for the contest coordinator itself, as opposed to the
/// per-tournament [`ContestConfig`](crate::config::ContestConfig).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Cap on the in-memory audit log; the oldest events drop off first.
    pub max_events: usize,
    /// Print every event as it is emitted.
    pub verbose: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_events: 100_000,
            verbose: false,
        }
    }
}
