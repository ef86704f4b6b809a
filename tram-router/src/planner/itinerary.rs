//! Found routes, ready for display.

use std::fmt;

use serde::Serialize;

use crate::domain::{Minutes, StopCode};

/// A stop on a found route with the time we get there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryStop {
    pub code: StopCode,
    pub name: String,
    pub arrival: Minutes,
}

/// One hop between consecutive stops of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    pub from: StopCode,
    pub to: StopCode,
    /// Wait plus travel time for this hop.
    pub minutes: Minutes,
}

/// A route from start to destination.
///
/// Always contains at least the start stop; arrival times never decrease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    stops: Vec<ItineraryStop>,
}

impl Itinerary {
    /// Wrap an ordered, non-empty list of stops.
    pub(crate) fn new(stops: Vec<ItineraryStop>) -> Self {
        debug_assert!(!stops.is_empty(), "itinerary needs at least one stop");
        Self { stops }
    }

    pub fn stops(&self) -> &[ItineraryStop] {
        &self.stops
    }

    pub fn origin(&self) -> &ItineraryStop {
        &self.stops[0]
    }

    pub fn destination(&self) -> &ItineraryStop {
        &self.stops[self.stops.len() - 1]
    }

    /// Time we leave the start stop.
    pub fn departure(&self) -> Minutes {
        self.origin().arrival
    }

    /// Time we reach the destination.
    pub fn arrival(&self) -> Minutes {
        self.destination().arrival
    }

    /// Total trip time, waits included.
    pub fn duration(&self) -> Minutes {
        self.arrival() - self.departure()
    }

    /// Hops between consecutive stops.
    pub fn legs(&self) -> impl Iterator<Item = Leg> + '_ {
        self.stops.windows(2).map(|w| Leg {
            from: w[0].code.clone(),
            to: w[1].code.clone(),
            minutes: w[1].arrival - w[0].arrival,
        })
    }

    /// Number of hops.
    pub fn hop_count(&self) -> usize {
        self.stops.len() - 1
    }
}

/// Formats as `[0m]A(Alpha) -> [5m]B(Beta) -> [12m]C(Gamma)`.
impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "[{}]{}({})", stop.arrival, stop.code, stop.name)?;
        }
        Ok(())
    }
}
