//! Route planner using A* search.
//!
//! This module implements the core routing algorithm that answers:
//! "I'm at this stop at this time - what is the fastest way to that stop?"
//!
//! Edge costs depend on when we reach each stop, because we have to wait
//! for the next scheduled departure. The search orders states by time so
//! far plus a straight-line estimate of the time remaining.

mod config;
mod frontier;
mod itinerary;
mod search;
mod state;


pub use config::{ClosedSetPolicy, DEFAULT_HEURISTIC_SPEED, SearchConfig};
pub use frontier::Frontier;
pub use itinerary::{Itinerary, ItineraryStop, Leg};
pub use search::{Router, SearchError, SearchOutcome, SearchRequest};
pub use state::{Goal, SearchState, StateArena, StateId};
