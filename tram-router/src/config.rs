//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::planner::{ClosedSetPolicy, SearchConfig};

/// Default stops file, relative to the working directory.
pub const DEFAULT_STOPS_FILE: &str = "data/stops.json";

/// Default routes file, relative to the working directory.
pub const DEFAULT_ROUTES_FILE: &str = "data/routes.json";

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?} ({reason})")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: &'static str,
}

/// Everything the binary needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub stops_file: PathBuf,
    pub routes_file: PathBuf,
    pub bind_addr: SocketAddr,
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TRAM_STOPS_FILE` | `data/stops.json` |
    /// | `TRAM_ROUTES_FILE` | `data/routes.json` |
    /// | `TRAM_BIND_ADDR` | `127.0.0.1:3000` |
    /// | `TRAM_SEARCH_TIMEOUT_MS` | none |
    /// | `TRAM_MAX_EXPANSIONS` | none |
    /// | `TRAM_REOPEN_CLOSED` | `false` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());

        let stops_file = get("TRAM_STOPS_FILE").unwrap_or_else(|| DEFAULT_STOPS_FILE.to_string());
        let routes_file =
            get("TRAM_ROUTES_FILE").unwrap_or_else(|| DEFAULT_ROUTES_FILE.to_string());

        let bind_value = get("TRAM_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value.trim().parse().map_err(|_| ConfigError {
            var: "TRAM_BIND_ADDR",
            value: bind_value.clone(),
            reason: "expected host:port",
        })?;

        let timeout = get("TRAM_SEARCH_TIMEOUT_MS")
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError {
                        var: "TRAM_SEARCH_TIMEOUT_MS",
                        value: v.clone(),
                        reason: "expected milliseconds",
                    })
            })
            .transpose()?;

        let max_expansions = get("TRAM_MAX_EXPANSIONS")
            .map(|v| {
                v.trim().parse::<usize>().map_err(|_| ConfigError {
                    var: "TRAM_MAX_EXPANSIONS",
                    value: v.clone(),
                    reason: "expected a non-negative integer",
                })
            })
            .transpose()?;

        let reopen = match get("TRAM_REOPEN_CLOSED") {
            None => false,
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError {
                        var: "TRAM_REOPEN_CLOSED",
                        value: v,
                        reason: "expected true or false",
                    });
                }
            },
        };

        let closed_set = if reopen {
            ClosedSetPolicy::ReopenOnImprovement
        } else {
            ClosedSetPolicy::ExpandOnce
        };

        Ok(Self {
            stops_file: PathBuf::from(stops_file),
            routes_file: PathBuf::from(routes_file),
            bind_addr,
            search: SearchConfig {
                closed_set,
                max_expansions,
                timeout,
                ..SearchConfig::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = from_vars(&[]).unwrap();

        assert_eq!(config.stops_file, PathBuf::from("data/stops.json"));
        assert_eq!(config.routes_file, PathBuf::from("data/routes.json"));
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.search.closed_set, ClosedSetPolicy::ExpandOnce);
        assert_eq!(config.search.max_expansions, None);
        assert_eq!(config.search.timeout, None);
    }

    #[test]
    fn overrides() {
        let config = from_vars(&[
            ("TRAM_STOPS_FILE", "/srv/stops.json"),
            ("TRAM_ROUTES_FILE", "/srv/routes.json"),
            ("TRAM_BIND_ADDR", "0.0.0.0:8080"),
            ("TRAM_SEARCH_TIMEOUT_MS", "250"),
            ("TRAM_MAX_EXPANSIONS", "10000"),
            ("TRAM_REOPEN_CLOSED", "true"),
        ])
        .unwrap();

        assert_eq!(config.stops_file, PathBuf::from("/srv/stops.json"));
        assert_eq!(config.routes_file, PathBuf::from("/srv/routes.json"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.search.timeout, Some(Duration::from_millis(250)));
        assert_eq!(config.search.max_expansions, Some(10000));
        assert_eq!(
            config.search.closed_set,
            ClosedSetPolicy::ReopenOnImprovement
        );
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = from_vars(&[("TRAM_BIND_ADDR", "  "), ("TRAM_MAX_EXPANSIONS", "")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.search.max_expansions, None);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = from_vars(&[("TRAM_BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for TRAM_BIND_ADDR: \"localhost\" (expected host:port)"
        );

        assert!(from_vars(&[("TRAM_SEARCH_TIMEOUT_MS", "soon")]).is_err());
        assert!(from_vars(&[("TRAM_MAX_EXPANSIONS", "-1")]).is_err());
        assert!(from_vars(&[("TRAM_REOPEN_CLOSED", "maybe")]).is_err());
    }
}
