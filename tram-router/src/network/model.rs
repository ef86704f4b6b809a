//! Stops and routes.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Minutes, Point, RouteCode, StopCode};

use super::{NetworkError, SCHEDULE_CYCLE};

/// A tram stop.
///
/// Neighbours are kept in a sorted map so that iteration order (and with it
/// the search's tie-breaking) is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    code: StopCode,
    name: String,
    position: Point,
    neighbors: BTreeMap<StopCode, BTreeSet<RouteCode>>,
}

impl Stop {
    /// Create a new stop.
    pub fn new(
        code: StopCode,
        name: impl Into<String>,
        position: Point,
        neighbors: BTreeMap<StopCode, BTreeSet<RouteCode>>,
    ) -> Self {
        Self {
            code,
            name: name.into(),
            position,
            neighbors,
        }
    }

    pub fn code(&self) -> &StopCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Neighbouring stops, each with the routes that run there directly.
    pub fn neighbors(&self) -> &BTreeMap<StopCode, BTreeSet<RouteCode>> {
        &self.neighbors
    }

    /// Routes running directly from this stop to `to`, if it is a neighbour.
    pub fn routes_to(&self, to: &StopCode) -> Option<&BTreeSet<RouteCode>> {
        self.neighbors.get(to)
    }
}

/// A scheduled tram route.
///
/// `stop_times[i]` is the scheduled time at `stop_codes[i]`. Times never
/// decrease along the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    code: RouteCode,
    stop_codes: Vec<StopCode>,
    stop_times: Vec<Minutes>,
}

impl Route {
    /// Create a route, checking that the stop and time sequences agree.
    pub fn new(
        code: RouteCode,
        stop_codes: Vec<StopCode>,
        stop_times: Vec<Minutes>,
    ) -> Result<Self, NetworkError> {
        let invalid = |reason: String| NetworkError::InvalidRoute {
            route: code.clone(),
            reason,
        };

        if stop_codes.len() != stop_times.len() {
            return Err(invalid(format!(
                "{} stops but {} times",
                stop_codes.len(),
                stop_times.len()
            )));
        }

        if stop_codes.len() < 2 {
            return Err(invalid("must visit at least two stops".to_string()));
        }

        if let Some(i) = stop_times.windows(2).position(|w| w[1] < w[0]) {
            return Err(invalid(format!(
                "time at {} ({}) is before time at {} ({})",
                stop_codes[i + 1],
                stop_times[i + 1].get(),
                stop_codes[i],
                stop_times[i].get()
            )));
        }

        if let Some(i) = stop_codes.windows(2).position(|w| w[0] == w[1]) {
            return Err(invalid(format!("stop {} repeated back to back", stop_codes[i])));
        }

        Ok(Self {
            code,
            stop_codes,
            stop_times,
        })
    }

    pub fn code(&self) -> &RouteCode {
        &self.code
    }

    pub fn stop_codes(&self) -> &[StopCode] {
        &self.stop_codes
    }

    /// Consecutive `(from, to)` pairs this route travels.
    pub fn edges(&self) -> impl Iterator<Item = (&StopCode, &StopCode)> {
        self.stop_codes.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Index of the first leg running `from -> to`, if any.
    pub fn leg_index(&self, from: &StopCode, to: &StopCode) -> Option<usize> {
        self.stop_codes
            .windows(2)
            .position(|w| &w[0] == from && &w[1] == to)
    }

    /// Wait plus travel time for the leg `from -> to` when arriving at
    /// `from` at `current_time`.
    ///
    /// The wait is the gap to the next departure in the repeating schedule
    /// cycle, in `[0, SCHEDULE_CYCLE)`.
    pub fn transition_time(
        &self,
        from: &StopCode,
        to: &StopCode,
        current_time: Minutes,
    ) -> Option<Minutes> {
        let i = self.leg_index(from, to)?;
        let scheduled = self.stop_times[i];

        let mut wait =
            scheduled.cycle_phase(SCHEDULE_CYCLE) - current_time.cycle_phase(SCHEDULE_CYCLE);
        if wait < 0 {
            wait += SCHEDULE_CYCLE;
        }

        let travel = self.stop_times[i + 1] - scheduled;
        Some(Minutes(wait) + travel)
    }
}
