//! Price and location records.

use std::fmt;

use chrono::NaiveDate;

use super::record::{Cell, Opt, Record, optional};

/// Fuel prices reported for a station.
///
/// Each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prices {
    /// Day the prices were reported
    pub date: Option<NaiveDate>,
    pub price_95: Option<f64>,
    pub price_98: Option<f64>,
    pub price_diesel: Option<f64>,
    /// Whether another user has confirmed the report
    pub confirmed: Option<bool>,
}

impl Prices {
    /// Prices reported on `date`, with confirmation state unknown.
    pub fn new(
        date: Option<NaiveDate>,
        price_95: Option<f64>,
        price_98: Option<f64>,
        price_diesel: Option<f64>,
    ) -> Self {
        Self {
            date,
            price_95,
            price_98,
            price_diesel,
            confirmed: None,
        }
    }
}

impl Record for Prices {
    const WIDTH: usize = 5;

    fn cells(&self) -> Vec<Cell> {
        vec![
            optional(self.date),
            optional(self.price_95),
            optional(self.price_98),
            optional(self.price_diesel),
            optional(self.confirmed.map(flag)),
        ]
    }
}

/// Booleans are written capitalized, as the service's other tools do.
fn flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

impl fmt::Display for Prices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Prices(date={}, price_95={}, price_98={}, price_diesel={}, confirmed={})",
            Opt(&self.date),
            Opt(&self.price_95),
            Opt(&self.price_98),
            Opt(&self.price_diesel),
            Opt(&self.confirmed.map(flag)),
        )
    }
}

/// A point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Record for Coordinates {
    const WIDTH: usize = 2;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Some(self.latitude.to_string()),
            Some(self.longitude.to_string()),
        ]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Coordinates(latitude={}, longitude={})",
            self.latitude, self.longitude
        )
    }
}
