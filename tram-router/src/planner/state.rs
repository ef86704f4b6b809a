//! Search states and the arena that owns them.
//!
//! Each state records a stop, the time we arrive there and the state we
//! came from. States live in an arena and point back to their predecessor
//! by index, so the chain back to the start is just a walk over indices.

use crate::domain::{Minutes, StopCode};
use crate::network::Stop;

use super::itinerary::{Itinerary, ItineraryStop};

/// Handle to a state stored in a [`StateArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// The destination of one search, used by every heuristic estimate.
#[derive(Debug, Clone, Copy)]
pub struct Goal<'n> {
    stop: &'n Stop,
    speed: f64,
}

impl<'n> Goal<'n> {
    /// `speed` is in distance units per minute and must be positive.
    pub fn new(stop: &'n Stop, speed: f64) -> Self {
        Self { stop, speed }
    }

    pub fn code(&self) -> &'n StopCode {
        self.stop.code()
    }

    /// Optimistic minutes from `from` to the goal: straight-line distance
    /// at `speed`.
    pub fn estimate(&self, from: &Stop) -> f64 {
        from.position().distance_to(&self.stop.position()) / self.speed
    }
}

/// One node of the search tree. Never modified after creation.
#[derive(Debug, Clone, Copy)]
pub struct SearchState<'n> {
    stop: &'n Stop,
    current_time: Minutes,
    previous: Option<StateId>,
}

impl<'n> SearchState<'n> {
    /// The root state at the start stop.
    pub fn start(stop: &'n Stop, departure: Minutes) -> Self {
        Self {
            stop,
            current_time: departure,
            previous: None,
        }
    }

    /// A state reached from `previous`.
    pub fn reached(stop: &'n Stop, current_time: Minutes, previous: StateId) -> Self {
        Self {
            stop,
            current_time,
            previous: Some(previous),
        }
    }

    pub fn stop(&self) -> &'n Stop {
        self.stop
    }

    pub fn current_time(&self) -> Minutes {
        self.current_time
    }

    pub fn previous(&self) -> Option<StateId> {
        self.previous
    }

    pub fn heuristic(&self, goal: &Goal<'_>) -> f64 {
        goal.estimate(self.stop)
    }

    /// Frontier priority: time so far plus the estimate to the goal.
    pub fn priority(&self, goal: &Goal<'_>) -> f64 {
        self.current_time.get() as f64 + self.heuristic(goal)
    }
}

/// Owner of every state created during one search.
#[derive(Debug, Default)]
pub struct StateArena<'n> {
    states: Vec<SearchState<'n>>,
}

impl<'n> StateArena<'n> {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    /// Store a state and return its handle.
    ///
    /// Predecessors must already be in the arena, so handles only ever point
    /// backwards and the chain to the root is finite.
    pub fn push(&mut self, state: SearchState<'n>) -> StateId {
        debug_assert!(state.previous.is_none_or(|p| p.0 < self.states.len()));
        self.states.push(state);
        StateId(self.states.len() - 1)
    }

    pub fn get(&self, id: StateId) -> &SearchState<'n> {
        &self.states[id.0]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Handles from the root to `id`, in travel order.
    pub fn chain(&self, id: StateId) -> Vec<StateId> {
        let mut chain = vec![id];
        let mut current = self.get(id).previous;
        while let Some(prev) = current {
            chain.push(prev);
            current = self.get(prev).previous;
        }
        chain.reverse();
        chain
    }

    /// Rebuild the itinerary ending at `id`.
    pub fn itinerary(&self, id: StateId) -> Itinerary {
        let stops = self
            .chain(id)
            .into_iter()
            .map(|id| {
                let state = self.get(id);
                ItineraryStop {
                    code: state.stop.code().clone(),
                    name: state.stop.name().to_string(),
                    arrival: state.current_time,
                }
            })
            .collect();
        Itinerary::new(stops)
    }
}
