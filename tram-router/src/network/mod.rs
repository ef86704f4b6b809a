//! The static tram network.
//!
//! Stops, routes, and the time-dependent edge cost the planner searches
//! over. A `Network` is validated on construction and read-only afterwards,
//! so it can be shared between concurrent searches.

mod builder;
mod error;
mod graph;
pub mod load;
mod model;

pub use builder::NetworkBuilder;
pub use error::NetworkError;
pub use graph::Network;
pub use load::{LoadError, load_network};
pub use model::{Route, Stop};

/// Length of the repeating schedule cycle, in minutes.
///
/// Every route departs each of its stops once per cycle, at the phase given
/// by its scheduled time modulo the cycle.
pub const SCHEDULE_CYCLE: i64 = 10;
