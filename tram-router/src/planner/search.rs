//! Best-first route search.
//!
//! An A* search over stops where the cost of each edge depends on the time
//! we reach its source stop. States are ordered by time so far plus a
//! straight-line estimate of the time left.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, trace};

use crate::domain::{Minutes, StopCode};
use crate::network::{Network, NetworkError};

use super::config::{ClosedSetPolicy, SearchConfig};
use super::frontier::Frontier;
use super::itinerary::Itinerary;
use super::state::{Goal, SearchState, StateArena};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Start or destination is not in the network
    #[error("stop not found: {0}")]
    StopNotFound(StopCode),

    /// The network lists a neighbour no route can take us to
    #[error("no route serves the edge {from} -> {to}")]
    UnreachableEdge { from: StopCode, to: StopCode },

    /// Any other inconsistency reported by the network
    #[error("network error: {0}")]
    Network(NetworkError),

    /// Search ran past its deadline
    #[error("search timed out")]
    Timeout,

    /// Search expanded more states than allowed
    #[error("search gave up after expanding {0} states")]
    ExpansionLimit(usize),

    /// Arrival time no longer fits in a minute count
    #[error("arrival time overflowed travelling {from} -> {to}")]
    TimeOverflow { from: StopCode, to: StopCode },
}

impl From<NetworkError> for SearchError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::StopNotFound(code) => SearchError::StopNotFound(code),
            NetworkError::UnreachableEdge { from, to } => SearchError::UnreachableEdge { from, to },
            other => SearchError::Network(other),
        }
    }
}

/// Request for route search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Where the trip starts.
    pub start: StopCode,

    /// Where the trip ends.
    pub destination: StopCode,

    /// Time we are at the start stop.
    pub departure: Minutes,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(start: StopCode, destination: StopCode, departure: Minutes) -> Self {
        Self {
            start,
            destination,
            departure,
        }
    }
}

/// Result of route search with exploration counts.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The route found, or `None` if the destination is unreachable.
    pub itinerary: Option<Itinerary>,

    /// Number of states expanded.
    pub states_expanded: usize,

    /// Number of states created, including the start state.
    pub states_created: usize,
}

/// Stops already expanded, under either closed-set policy.
enum Closed<'n> {
    Once(HashSet<&'n StopCode>),
    BestArrival(HashMap<&'n StopCode, Minutes>),
}

impl<'n> Closed<'n> {
    fn new(policy: ClosedSetPolicy) -> Self {
        match policy {
            ClosedSetPolicy::ExpandOnce => Closed::Once(HashSet::new()),
            ClosedSetPolicy::ReopenOnImprovement => Closed::BestArrival(HashMap::new()),
        }
    }

    /// Claim `stop` for expansion at `time`. Returns false if the state is
    /// stale and should be dropped.
    fn try_expand(&mut self, stop: &'n StopCode, time: Minutes) -> bool {
        match self {
            Closed::Once(closed) => closed.insert(stop),
            Closed::BestArrival(best) => best.get(stop).is_none_or(|b| time <= *b),
        }
    }

    /// Whether `stop` can no longer be reached by any new state.
    fn is_closed(&self, stop: &StopCode) -> bool {
        match self {
            Closed::Once(closed) => closed.contains(stop),
            Closed::BestArrival(_) => false,
        }
    }

    /// Whether a new state at `stop` arriving at `time` is worth queueing.
    /// Records the arrival if it is.
    fn admit(&mut self, stop: &'n StopCode, time: Minutes) -> bool {
        match self {
            Closed::Once(closed) => !closed.contains(stop),
            Closed::BestArrival(best) => {
                if best.get(stop).is_some_and(|b| *b <= time) {
                    return false;
                }
                best.insert(stop, time);
                true
            }
        }
    }
}

/// Route planner over a fixed network.
///
/// A `Router` only borrows the network, so any number of routers can search
/// the same network at once, each on its own thread.
pub struct Router<'a> {
    network: &'a Network,
    config: &'a SearchConfig,
}

impl<'a> Router<'a> {
    /// Create a new router.
    pub fn new(network: &'a Network, config: &'a SearchConfig) -> Self {
        Self { network, config }
    }

    /// Find a route from `request.start` to `request.destination`.
    ///
    /// Returns `Ok(None)` when the destination can't be reached.
    pub fn search(&self, request: &SearchRequest) -> Result<Option<Itinerary>, SearchError> {
        Ok(self.search_with_stats(request)?.itinerary)
    }

    /// Like [`search`](Self::search), also reporting how much was explored.
    pub fn search_with_stats(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let network = self.network;
        let start = network.get_stop(&request.start)?;
        let goal = Goal::new(
            network.get_stop(&request.destination)?,
            self.config.heuristic_speed,
        );
        let deadline = self.config.timeout.map(|t| Instant::now() + t);

        debug!(
            start = %request.start,
            destination = %request.destination,
            departure = request.departure.get(),
            "starting route search"
        );

        let mut arena = StateArena::new();
        let mut frontier = Frontier::new();
        let mut closed = Closed::new(self.config.closed_set);

        let root = arena.push(SearchState::start(start, request.departure));
        closed.admit(start.code(), request.departure);
        frontier.push(root, 0.0);

        let mut states_expanded = 0;

        while let Some(id) = frontier.pop() {
            let state = *arena.get(id);
            let code = state.stop().code();

            if code == goal.code() {
                let itinerary = arena.itinerary(id);
                debug!(
                    states_expanded,
                    states_created = arena.len(),
                    arrival = itinerary.arrival().get(),
                    "route found"
                );
                return Ok(SearchOutcome {
                    itinerary: Some(itinerary),
                    states_expanded,
                    states_created: arena.len(),
                });
            }

            if !closed.try_expand(code, state.current_time()) {
                continue;
            }

            if let Some(max) = self.config.max_expansions
                && states_expanded >= max
            {
                debug!(max, "search hit expansion limit");
                return Err(SearchError::ExpansionLimit(max));
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                debug!(states_expanded, "search timed out");
                return Err(SearchError::Timeout);
            }
            states_expanded += 1;

            trace!(stop = %code, time = state.current_time().get(), "expanding");

            for neighbor in network.get_adjacent_codes(code)? {
                if closed.is_closed(neighbor) {
                    continue;
                }

                let cost = network.cost(code, neighbor, state.current_time())?;
                let arrival = state.current_time().checked_add(cost).ok_or_else(|| {
                    SearchError::TimeOverflow {
                        from: code.clone(),
                        to: neighbor.clone(),
                    }
                })?;

                if !closed.admit(neighbor, arrival) {
                    continue;
                }

                let next = SearchState::reached(network.get_stop(neighbor)?, arrival, id);
                let priority = next.priority(&goal);
                frontier.push(arena.push(next), priority);
            }
        }

        debug!(
            states_expanded,
            states_created = arena.len(),
            "no route found"
        );
        Ok(SearchOutcome {
            itinerary: None,
            states_expanded,
            states_created: arena.len(),
        })
    }
}
