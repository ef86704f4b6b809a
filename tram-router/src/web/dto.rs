//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::network::Stop;
use crate::planner::{Itinerary, ItineraryStop, Leg};

/// Query for a route search.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    /// Start stop code
    pub from: Option<String>,

    /// Destination stop code
    pub to: Option<String>,

    /// Departure as HH:MM or minutes (defaults to 0)
    pub departure: Option<String>,
}

/// A stop in the stop listing.
#[derive(Debug, Serialize)]
pub struct StopInfo {
    pub code: String,
    pub name: String,
}

/// Response for the stop listing.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    /// All stops, sorted by code
    pub stops: Vec<StopInfo>,
}

/// A stop on a found route.
#[derive(Debug, Serialize)]
pub struct RouteStopResult {
    pub code: String,
    pub name: String,

    /// Arrival time in minutes
    pub arrival: i64,

    /// Arrival time formatted like `1h5m`
    pub arrival_display: String,
}

/// One hop of a found route.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from: String,
    pub to: String,

    /// Wait plus travel time in minutes
    pub minutes: i64,
}

/// Response for a route search.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub stops: Vec<RouteStopResult>,
    pub legs: Vec<LegResult>,

    /// Total trip time in minutes
    pub duration_minutes: i64,

    /// Number of hops between stops
    pub hops: usize,

    /// One-line rendering of the route
    pub summary: String,

    /// Number of states the search expanded
    pub states_expanded: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StopInfo {
    pub fn from_stop(stop: &Stop) -> Self {
        Self {
            code: stop.code().to_string(),
            name: stop.name().to_string(),
        }
    }
}

impl RouteStopResult {
    pub fn from_stop(stop: &ItineraryStop) -> Self {
        Self {
            code: stop.code.to_string(),
            name: stop.name.clone(),
            arrival: stop.arrival.get(),
            arrival_display: stop.arrival.to_string(),
        }
    }
}

impl LegResult {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            minutes: leg.minutes.get(),
        }
    }
}

impl RouteResponse {
    pub fn from_itinerary(itinerary: &Itinerary, states_expanded: usize) -> Self {
        Self {
            stops: itinerary
                .stops()
                .iter()
                .map(RouteStopResult::from_stop)
                .collect(),
            legs: itinerary.legs().map(|l| LegResult::from_leg(&l)).collect(),
            duration_minutes: itinerary.duration().get(),
            hops: itinerary.hop_count(),
            summary: itinerary.to_string(),
            states_expanded,
        }
    }
}
