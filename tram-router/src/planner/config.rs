//! Search configuration for the tram router.

use std::time::Duration;

/// Default heuristic speed in distance units per minute.
///
/// Must be at least the fastest achievable speed between any two stops,
/// otherwise the heuristic overestimates and the search loses optimality.
pub const DEFAULT_HEURISTIC_SPEED: f64 = 260.0;

/// What to do when a stop is reached again after it has been expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClosedSetPolicy {
    /// Each stop is expanded at most once per search. Later arrivals are
    /// ignored even if they are earlier, which can miss the fastest route
    /// when waiting times differ between paths.
    #[default]
    ExpandOnce,

    /// Re-expand a stop whenever a strictly earlier arrival is found.
    ReopenOnImprovement,
}

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Speed used to turn straight-line distance into an optimistic
    /// time estimate (distance units per minute).
    pub heuristic_speed: f64,

    /// Whether expanded stops stay closed.
    pub closed_set: ClosedSetPolicy,

    /// Give up after expanding this many states.
    pub max_expansions: Option<usize>,

    /// Give up after searching for this long.
    pub timeout: Option<Duration>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        heuristic_speed: f64,
        closed_set: ClosedSetPolicy,
        max_expansions: Option<usize>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            heuristic_speed,
            closed_set,
            max_expansions,
            timeout,
        }
    }

    /// Returns a copy with the given closed-set policy.
    pub fn with_closed_set(mut self, policy: ClosedSetPolicy) -> Self {
        self.closed_set = policy;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic_speed: DEFAULT_HEURISTIC_SPEED,
            closed_set: ClosedSetPolicy::ExpandOnce,
            max_expansions: None,
            timeout: None,
        }
    }
}
