//! Tram route planner.
//!
//! Finds the fastest route between two stops of a scheduled tram network,
//! where the cost of each hop depends on when we reach its first stop.

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
