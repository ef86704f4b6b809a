//! Domain types for the tram router.
//!
//! This module contains the value types shared by the network model and
//! the planner. All types enforce their invariants at construction time,
//! so code that receives these types can trust their validity.

mod code;
mod error;
mod point;
mod time;

pub use code::{MAX_CODE_LEN, RouteCode, StopCode};
pub use error::DomainError;
pub use point::Point;
pub use time::{MAX_DEPARTURE_MINUTES, Minutes};
