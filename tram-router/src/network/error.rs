//! Network error types.

use crate::domain::{DomainError, RouteCode, StopCode};

/// Errors from building or querying a [`Network`](super::Network).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// No stop with this code exists
    #[error("stop not found: {0}")]
    StopNotFound(StopCode),

    /// No route with this code exists
    #[error("route not found: {0}")]
    RouteNotFound(RouteCode),

    /// No route provides timing data for this edge
    #[error("no route serves the edge {from} -> {to}")]
    UnreachableEdge { from: StopCode, to: StopCode },

    /// A stop code appears more than once
    #[error("duplicate stop code: {0}")]
    DuplicateStop(StopCode),

    /// A route code appears more than once
    #[error("duplicate route code: {0}")]
    DuplicateRoute(RouteCode),

    /// A stop has NaN or infinite coordinates
    #[error("stop {0} has non-finite coordinates")]
    InvalidCoordinates(StopCode),

    /// A route definition is malformed
    #[error("invalid route {route}: {reason}")]
    InvalidRoute { route: RouteCode, reason: String },

    /// A neighbour entry refers to a stop that doesn't exist
    #[error("stop {stop} lists unknown neighbour {neighbor}")]
    UnknownNeighbor { stop: StopCode, neighbor: StopCode },

    /// A neighbour entry refers to a route that doesn't exist
    #[error("stop {stop} lists unknown route {route}")]
    UnknownRoute { stop: StopCode, route: RouteCode },

    /// A neighbour entry names a route that never runs between the two stops
    #[error("route {route} does not run {from} -> {to}")]
    RouteDoesNotServeEdge {
        route: RouteCode,
        from: StopCode,
        to: StopCode,
    },

    /// A code passed to the builder failed validation
    #[error(transparent)]
    InvalidCode(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(s: &str) -> StopCode {
        StopCode::parse(s).unwrap()
    }

    #[test]
    fn error_display() {
        let err = NetworkError::StopNotFound(stop("A"));
        assert_eq!(err.to_string(), "stop not found: A");

        let err = NetworkError::UnreachableEdge {
            from: stop("A"),
            to: stop("C"),
        };
        assert_eq!(err.to_string(), "no route serves the edge A -> C");

        let err = NetworkError::RouteDoesNotServeEdge {
            route: RouteCode::parse("R1").unwrap(),
            from: stop("B"),
            to: stop("A"),
        };
        assert_eq!(err.to_string(), "route R1 does not run B -> A");
    }
}
