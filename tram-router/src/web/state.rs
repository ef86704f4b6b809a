//! Application state for the web layer.

use std::sync::Arc;

use crate::network::Network;
use crate::planner::SearchConfig;

/// Shared application state.
///
/// The network is read-only, so every request searches the same copy.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tram network
    pub network: Arc<Network>,

    /// Route search configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: Network, config: SearchConfig) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
        }
    }
}
