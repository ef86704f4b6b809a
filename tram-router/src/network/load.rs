//! Loading a network from JSON data files.
//!
//! The network ships as two files: a list of stops (with their neighbour
//! maps) and a list of routes. Both are plain JSON arrays.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Minutes, Point, RouteCode, StopCode};

use super::{Network, NetworkError, Route, Stop};

/// Errors from loading network files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid network JSON
    #[error("failed to parse {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    /// Data parsed but doesn't form a consistent network
    #[error("invalid network: {0}")]
    Network(#[from] NetworkError),
}

/// A stop as stored in the stops file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub code: StopCode,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub neighbors: BTreeMap<StopCode, Vec<RouteCode>>,
}

/// A route as stored in the routes file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub code: RouteCode,
    pub stop_codes: Vec<StopCode>,
    pub stop_times: Vec<i64>,
}

impl From<StopRecord> for Stop {
    fn from(record: StopRecord) -> Self {
        let neighbors = record
            .neighbors
            .into_iter()
            .map(|(code, routes)| (code, routes.into_iter().collect::<BTreeSet<_>>()))
            .collect();
        Stop::new(
            record.code,
            record.name,
            Point::new(record.x, record.y),
            neighbors,
        )
    }
}

impl TryFrom<RouteRecord> for Route {
    type Error = NetworkError;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        let times = record.stop_times.into_iter().map(Minutes).collect();
        Route::new(record.code, record.stop_codes, times)
    }
}

impl Network {
    /// Build a network from already-parsed records.
    pub fn from_records(
        stops: Vec<StopRecord>,
        routes: Vec<RouteRecord>,
    ) -> Result<Self, NetworkError> {
        let routes = routes
            .into_iter()
            .map(Route::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let stops = stops.into_iter().map(Stop::from).collect();
        Network::new(stops, routes)
    }

    /// Parse a network from in-memory JSON documents.
    pub fn from_json_str(stops_json: &str, routes_json: &str) -> Result<Self, LoadError> {
        let stops: Vec<StopRecord> =
            serde_json::from_str(stops_json).map_err(|source| LoadError::Json {
                what: "stops".to_string(),
                source,
            })?;
        let routes: Vec<RouteRecord> =
            serde_json::from_str(routes_json).map_err(|source| LoadError::Json {
                what: "routes".to_string(),
                source,
            })?;
        Ok(Network::from_records(stops, routes)?)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a network from a stops file and a routes file.
pub fn load_network(
    stops_path: impl AsRef<Path>,
    routes_path: impl AsRef<Path>,
) -> Result<Network, LoadError> {
    let stops_path = stops_path.as_ref();
    let routes_path = routes_path.as_ref();

    let stops: Vec<StopRecord> =
        serde_json::from_str(&read(stops_path)?).map_err(|source| LoadError::Json {
            what: stops_path.display().to_string(),
            source,
        })?;
    let routes: Vec<RouteRecord> =
        serde_json::from_str(&read(routes_path)?).map_err(|source| LoadError::Json {
            what: routes_path.display().to_string(),
            source,
        })?;

    let network = Network::from_records(stops, routes)?;
    info!(
        stops = network.stop_count(),
        routes = network.route_count(),
        "loaded network from {} and {}",
        stops_path.display(),
        routes_path.display()
    );
    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const STOPS: &str = r#"[
        {"code": "A", "name": "Alpha", "x": 0, "y": 0, "neighbors": {"B": ["R1"]}},
        {"code": "B", "name": "Beta", "x": 10, "y": 0, "neighbors": {"C": ["R1"]}},
        {"code": "C", "name": "Gamma", "x": 20, "y": 0, "neighbors": {}}
    ]"#;

    const ROUTES: &str = r#"[
        {"code": "R1", "stopCodes": ["A", "B", "C"], "stopTimes": [0, 5, 12]}
    ]"#;

    fn stop(s: &str) -> StopCode {
        StopCode::parse(s).unwrap()
    }

    #[test]
    fn parse_from_strings() {
        let net = Network::from_json_str(STOPS, ROUTES).unwrap();
        assert_eq!(net.stop_count(), 3);
        assert_eq!(net.route_count(), 1);
        assert_eq!(
            net.cost(&stop("B"), &stop("C"), Minutes(5)).unwrap(),
            Minutes(7)
        );
    }

    #[test]
    fn neighbours_default_to_empty() {
        let stops = r#"[{"code": "A", "name": "Alpha", "x": 1.5, "y": -2}]"#;
        let net = Network::from_json_str(stops, "[]").unwrap();
        assert_eq!(net.get_adjacent_codes(&stop("A")).unwrap().len(), 0);
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = Network::from_json_str("not json", ROUTES).unwrap_err();
        assert!(matches!(err, LoadError::Json { ref what, .. } if what == "stops"));
    }

    #[test]
    fn invalid_code_in_json() {
        let stops = r#"[{"code": "A A", "name": "Alpha", "x": 0, "y": 0}]"#;
        let err = Network::from_json_str(stops, "[]").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn inconsistent_data_is_reported() {
        let routes = r#"[{"code": "R1", "stopCodes": ["A", "B", "C"], "stopTimes": [0, 5]}]"#;
        let err = Network::from_json_str(STOPS, routes).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Network(NetworkError::InvalidRoute { .. })
        ));
    }

    #[test]
    fn load_from_files() {
        let dir = tempdir().unwrap();
        let stops_path = dir.path().join("stops.json");
        let routes_path = dir.path().join("routes.json");
        std::fs::write(&stops_path, STOPS).unwrap();
        std::fs::write(&routes_path, ROUTES).unwrap();

        let net = load_network(&stops_path, &routes_path).unwrap();
        assert_eq!(net.stop_count(), 3);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let err = load_network(dir.path().join("nope.json"), dir.path().join("routes.json"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn bundled_sample_data_loads() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let net = load_network(dir.join("stops.json"), dir.join("routes.json")).unwrap();

        assert_eq!(net.stop_count(), 6);
        assert_eq!(net.route_count(), 4);
        assert_eq!(
            net.cost(&stop("HAR"), &stop("CEN"), Minutes(0)).unwrap(),
            Minutes(4)
        );
    }

    #[test]
    fn record_roundtrip_through_serde() {
        let record = RouteRecord {
            code: RouteCode::parse("R1").unwrap(),
            stop_codes: vec![stop("A"), stop("B")],
            stop_times: vec![0, 4],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"stopCodes\""));
        assert!(json.contains("\"stopTimes\""));
    }
}
