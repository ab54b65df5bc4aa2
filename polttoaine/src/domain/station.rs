//! Fuel station records.

use std::fmt;

use super::city::City;
use super::prices::{Coordinates, Prices};
use super::record::{Cell, Opt, Record};

/// A fuel station and its latest reported prices.
///
/// The service does not always know a station's city or location, so both
/// are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: i64,
    pub prices: Prices,
    pub name: Option<String>,
    pub city: Option<City>,
    pub coordinates: Option<Coordinates>,
}

impl Station {
    /// A bare station carrying only prices, as used for submitting updates.
    pub fn new(id: i64, prices: Prices) -> Self {
        Self {
            id,
            prices,
            name: None,
            city: None,
            coordinates: None,
        }
    }
}

impl Record for Station {
    const WIDTH: usize = 1 + Prices::WIDTH + 1 + City::WIDTH + Coordinates::WIDTH;

    /// Flattens nested records in place. A missing city or location becomes
    /// a run of nulls as wide as the record it replaces.
    fn cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(Self::WIDTH);
        cells.push(Some(self.id.to_string()));
        cells.extend(self.prices.cells());
        cells.push(self.name.clone());
        match &self.city {
            Some(city) => cells.extend(city.cells()),
            None => cells.extend(std::iter::repeat_n(None, City::WIDTH)),
        }
        match &self.coordinates {
            Some(coordinates) => cells.extend(coordinates.cells()),
            None => cells.extend(std::iter::repeat_n(None, Coordinates::WIDTH)),
        }
        cells
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station(id={}, prices={}, name=", self.id, self.prices)?;
        match &self.name {
            Some(name) => write!(f, "{name:?}")?,
            None => f.write_str("None")?,
        }
        write!(
            f,
            ", city={}, coordinates={})",
            Opt(&self.city),
            Opt(&self.coordinates)
        )
    }
}
