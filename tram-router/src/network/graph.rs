//! The tram network: stops and routes indexed by code.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Minutes, RouteCode, StopCode};

use super::{NetworkError, Route, Stop};

/// A static, validated tram network.
///
/// Built once, then only read. Construction checks that every neighbour
/// entry is backed by a route that actually runs that leg, so `cost` never
/// fails for a code returned by `get_adjacent_codes`.
#[derive(Debug, Clone)]
pub struct Network {
    stops: HashMap<StopCode, Stop>,
    routes: HashMap<RouteCode, Route>,
}

impl Network {
    /// Build a network from stops and routes, validating cross-references.
    pub fn new(stops: Vec<Stop>, routes: Vec<Route>) -> Result<Self, NetworkError> {
        let mut stop_map = HashMap::with_capacity(stops.len());
        for stop in stops {
            if !stop.position().is_finite() {
                return Err(NetworkError::InvalidCoordinates(stop.code().clone()));
            }
            let code = stop.code().clone();
            if stop_map.insert(code.clone(), stop).is_some() {
                return Err(NetworkError::DuplicateStop(code));
            }
        }

        let mut route_map = HashMap::with_capacity(routes.len());
        for route in routes {
            if let Some(unknown) = route
                .stop_codes()
                .iter()
                .find(|code| !stop_map.contains_key(*code))
            {
                return Err(NetworkError::InvalidRoute {
                    route: route.code().clone(),
                    reason: format!("visits unknown stop {unknown}"),
                });
            }
            let code = route.code().clone();
            if route_map.insert(code.clone(), route).is_some() {
                return Err(NetworkError::DuplicateRoute(code));
            }
        }

        for stop in stop_map.values() {
            for (neighbor, route_codes) in stop.neighbors() {
                if !stop_map.contains_key(neighbor) {
                    return Err(NetworkError::UnknownNeighbor {
                        stop: stop.code().clone(),
                        neighbor: neighbor.clone(),
                    });
                }

                if route_codes.is_empty() {
                    return Err(NetworkError::UnreachableEdge {
                        from: stop.code().clone(),
                        to: neighbor.clone(),
                    });
                }

                for route_code in route_codes {
                    let route =
                        route_map
                            .get(route_code)
                            .ok_or_else(|| NetworkError::UnknownRoute {
                                stop: stop.code().clone(),
                                route: route_code.clone(),
                            })?;

                    if route.leg_index(stop.code(), neighbor).is_none() {
                        return Err(NetworkError::RouteDoesNotServeEdge {
                            route: route_code.clone(),
                            from: stop.code().clone(),
                            to: neighbor.clone(),
                        });
                    }
                }
            }
        }

        debug!(
            stops = stop_map.len(),
            routes = route_map.len(),
            "built tram network"
        );

        Ok(Self {
            stops: stop_map,
            routes: route_map,
        })
    }

    /// Look up a stop by code.
    pub fn get_stop(&self, code: &StopCode) -> Result<&Stop, NetworkError> {
        self.stops
            .get(code)
            .ok_or_else(|| NetworkError::StopNotFound(code.clone()))
    }

    /// Look up a route by code.
    pub fn get_route(&self, code: &RouteCode) -> Result<&Route, NetworkError> {
        self.routes
            .get(code)
            .ok_or_else(|| NetworkError::RouteNotFound(code.clone()))
    }

    /// Check whether a stop exists.
    pub fn contains_stop(&self, code: &StopCode) -> bool {
        self.stops.contains_key(code)
    }

    /// Codes of all stops reachable directly from `code` on at least one route.
    ///
    /// Codes come out in sorted order.
    pub fn get_adjacent_codes<'a>(
        &'a self,
        code: &StopCode,
    ) -> Result<impl ExactSizeIterator<Item = &'a StopCode> + use<'a>, NetworkError> {
        Ok(self.get_stop(code)?.neighbors().keys())
    }

    /// Fastest transition from `from` to its neighbour `dest`, including the
    /// wait for the next departure when arriving at `current_time`.
    ///
    /// Takes the minimum over every route serving the edge. Fails with
    /// `UnreachableEdge` if `dest` is not a neighbour of `from`.
    pub fn cost(
        &self,
        from: &StopCode,
        dest: &StopCode,
        current_time: Minutes,
    ) -> Result<Minutes, NetworkError> {
        let unreachable = || NetworkError::UnreachableEdge {
            from: from.clone(),
            to: dest.clone(),
        };

        let route_codes = self.get_stop(from)?.routes_to(dest).ok_or_else(unreachable)?;

        route_codes
            .iter()
            .filter_map(|code| self.routes.get(code))
            .filter_map(|route| route.transition_time(from, dest, current_time))
            .min()
            .ok_or_else(unreachable)
    }

    /// All stops, in no particular order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.values()
    }

    /// All routes, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::NetworkBuilder;
    use proptest::prelude::*;

    fn stop(s: &str) -> StopCode {
        StopCode::parse(s).unwrap()
    }

    /// Two parallel routes over A -> B with arbitrary offsets and travel times.
    fn two_route_edge(
        offset1: i64,
        travel1: i64,
        offset2: i64,
        travel2: i64,
    ) -> Network {
        NetworkBuilder::new()
            .stop("A", "Alpha", 0.0, 0.0)
            .stop("B", "Beta", 100.0, 0.0)
            .route("R1", &[("A", offset1), ("B", offset1 + travel1)])
            .route("R2", &[("A", offset2), ("B", offset2 + travel2)])
            .build()
            .unwrap()
    }

    proptest! {
        /// Edge costs are never negative
        #[test]
        fn cost_non_negative(
            o1 in 0i64..500, t1 in 0i64..60,
            o2 in 0i64..500, t2 in 0i64..60,
            now in -1_000i64..10_000,
        ) {
            let net = two_route_edge(o1, t1, o2, t2);
            let cost = net.cost(&stop("A"), &stop("B"), Minutes(now)).unwrap();
            prop_assert!(cost >= Minutes::ZERO);
        }

        /// Cost repeats every ten minutes
        #[test]
        fn cost_periodic(
            o1 in 0i64..500, t1 in 0i64..60,
            o2 in 0i64..500, t2 in 0i64..60,
            now in -1_000i64..10_000,
        ) {
            let net = two_route_edge(o1, t1, o2, t2);
            let a = net.cost(&stop("A"), &stop("B"), Minutes(now)).unwrap();
            let b = net.cost(&stop("A"), &stop("B"), Minutes(now + 10)).unwrap();
            prop_assert_eq!(a, b);
        }

        /// Wait is strictly less than a full cycle
        #[test]
        fn wait_below_cycle(
            o1 in 0i64..500, t1 in 0i64..60,
            now in -1_000i64..10_000,
        ) {
            let net = two_route_edge(o1, t1, o1, t1);
            let cost = net.cost(&stop("A"), &stop("B"), Minutes(now)).unwrap();
            prop_assert!(cost.get() - t1 < crate::network::SCHEDULE_CYCLE);
        }

        /// Reads are pure
        #[test]
        fn reads_idempotent(
            o1 in 0i64..500, t1 in 0i64..60,
            o2 in 0i64..500, t2 in 0i64..60,
            now in 0i64..10_000,
        ) {
            let net = two_route_edge(o1, t1, o2, t2);
            let first = net.cost(&stop("A"), &stop("B"), Minutes(now)).unwrap();
            let adj1: Vec<_> = net.get_adjacent_codes(&stop("A")).unwrap().cloned().collect();
            let second = net.cost(&stop("A"), &stop("B"), Minutes(now)).unwrap();
            let adj2: Vec<_> = net.get_adjacent_codes(&stop("A")).unwrap().cloned().collect();
            prop_assert_eq!(first, second);
            prop_assert_eq!(adj1, adj2);
        }
    }
}
