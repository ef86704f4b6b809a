//! Fluent construction of networks from routes.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Minutes, Point, RouteCode, StopCode};

use super::{Network, NetworkError, Route, Stop};

/// Builder for creating a network without hand-writing neighbour maps.
///
/// Neighbours are derived from routes: every consecutive pair of stops on a
/// route becomes a directed edge served by that route.
///
/// # Example
///
/// ```
/// use tram_router::network::NetworkBuilder;
/// use tram_router::domain::{Minutes, StopCode};
///
/// let network = NetworkBuilder::new()
///     .stop("A", "Alpha", 0.0, 0.0)
///     .stop("B", "Beta", 10.0, 0.0)
///     .route("R1", &[("A", 0), ("B", 5)])
///     .build()
///     .unwrap();
///
/// let a = StopCode::parse("A").unwrap();
/// let b = StopCode::parse("B").unwrap();
/// assert_eq!(network.cost(&a, &b, Minutes(0)).unwrap(), Minutes(5));
/// ```
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    stops: Vec<(String, String, Point)>,
    routes: Vec<(String, Vec<(String, i64)>)>,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.
    pub fn stop(mut self, code: &str, name: &str, x: f64, y: f64) -> Self {
        self.stops
            .push((code.to_string(), name.to_string(), Point::new(x, y)));
        self
    }

    /// Add a route as a sequence of `(stop code, scheduled time)` calls.
    pub fn route(mut self, code: &str, calls: &[(&str, i64)]) -> Self {
        let calls = calls
            .iter()
            .map(|(stop, time)| (stop.to_string(), *time))
            .collect();
        self.routes.push((code.to_string(), calls));
        self
    }

    /// Validate codes, derive neighbours and build the network.
    pub fn build(self) -> Result<Network, NetworkError> {
        let mut routes = Vec::with_capacity(self.routes.len());
        for (code, calls) in self.routes {
            let code = RouteCode::parse(&code)?;
            let stop_codes = calls
                .iter()
                .map(|(stop, _)| StopCode::parse(stop))
                .collect::<Result<Vec<_>, _>>()?;
            let stop_times = calls.iter().map(|(_, time)| Minutes(*time)).collect();
            routes.push(Route::new(code, stop_codes, stop_times)?);
        }

        let mut neighbors: BTreeMap<StopCode, BTreeMap<StopCode, BTreeSet<RouteCode>>> =
            BTreeMap::new();
        for route in &routes {
            for (from, to) in route.edges() {
                neighbors
                    .entry(from.clone())
                    .or_default()
                    .entry(to.clone())
                    .or_default()
                    .insert(route.code().clone());
            }
        }

        let mut stops = Vec::with_capacity(self.stops.len());
        for (code, name, position) in self.stops {
            let code = StopCode::parse(&code)?;
            let adjacent = neighbors.remove(&code).unwrap_or_default();
            stops.push(Stop::new(code, name, position, adjacent));
        }

        Network::new(stops, routes)
    }
}
