//! Conversion from response rows to domain records.
//!
//! Column layouts are fixed by the service. Unused trailing columns are
//! ignored. The service writes `-` or leaves a column empty when it has no
//! value.

use chrono::NaiveDate;

use crate::domain::{City, Coordinates, Prices, Station, resolve_day_month};

use super::rows::Row;

/// Columns in a station row that are read.
const STATION_COLUMNS: usize = 11;

/// Columns in a city row that are read.
const CITY_COLUMNS: usize = 2;

/// Error during row to record conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("expected {expected} columns, found {found}")]
    TooFewColumns { expected: usize, found: usize },

    #[error("invalid integer in {field}: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid date: {0:?}")]
    InvalidDate(String),
}

/// Convert a `Station/GetCities` row.
pub fn city_from_row(row: &[String]) -> Result<City, ConversionError> {
    require_columns(row, CITY_COLUMNS)?;
    let id = parse_integer("city id", &row[0])?;
    Ok(City::new(id, row[1].clone()))
}

/// Convert a station listing row.
///
/// `query_city_id` is the `cityId` parameter the listing was requested
/// with. Location queries send `lat/lon` there and the service echoes it
/// back in place of a real city id, in which case the station is returned
/// without a city.
pub fn station_from_row(
    row: &[String],
    query_city_id: &str,
    today: NaiveDate,
) -> Result<Station, ConversionError> {
    let Some(
        [
            id,
            name,
            date,
            price_95,
            price_98,
            price_diesel,
            latitude,
            longitude,
            city_id,
            city_name,
            confirmed,
        ],
    ) = row.get(..STATION_COLUMNS)
    else {
        return Err(ConversionError::TooFewColumns {
            expected: STATION_COLUMNS,
            found: row.len(),
        });
    };

    let date = if is_absent(date) {
        None
    } else {
        let resolved = resolve_day_month(date, today)
            .map_err(|_| ConversionError::InvalidDate(date.clone()))?;
        Some(resolved)
    };

    let prices = Prices {
        date,
        price_95: parse_price("price 95", price_95)?,
        price_98: parse_price("price 98", price_98)?,
        price_diesel: parse_price("price diesel", price_diesel)?,
        confirmed: (!confirmed.is_empty()).then(|| confirmed.to_lowercase() == "true"),
    };

    // Coordinates are sometimes missing for no visible reason
    let coordinates = if !latitude.is_empty() && !longitude.is_empty() {
        Some(Coordinates::new(
            parse_float("latitude", latitude)?,
            parse_float("longitude", longitude)?,
        ))
    } else {
        None
    };

    let city = match parse_integer("city id", city_id) {
        Ok(id) => Some(City::new(id, city_name.clone())),
        Err(_) if city_id.contains('/') && query_city_id.contains('/') => None,
        Err(e) => return Err(e),
    };

    Ok(Station {
        id: parse_integer("station id", id)?,
        prices,
        name: Some(name.clone()),
        city,
        coordinates,
    })
}

/// Outcome of a price submission, from the first response row.
///
/// `Ok` carries the service's message. `Err` carries the rejection message,
/// which is empty if the service gave none.
pub fn submit_outcome(row: Option<&Row>) -> Result<String, String> {
    let Some(row) = row else {
        return Ok(String::new());
    };
    let status = row.first().map(String::as_str).unwrap_or_default();
    let message = row.get(1).cloned().unwrap_or_default();
    if status.is_empty() || status == "success" {
        Ok(message)
    } else {
        Err(message)
    }
}

fn require_columns(row: &[String], expected: usize) -> Result<(), ConversionError> {
    if row.len() < expected {
        return Err(ConversionError::TooFewColumns {
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

fn is_absent(value: &str) -> bool {
    value.is_empty() || value == "-"
}

fn parse_integer(field: &'static str, value: &str) -> Result<i64, ConversionError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConversionError::InvalidInteger {
            field,
            value: value.to_string(),
        })
}

fn parse_float(field: &'static str, value: &str) -> Result<f64, ConversionError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConversionError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn parse_price(field: &'static str, value: &str) -> Result<Option<f64>, ConversionError> {
    if is_absent(value) {
        return Ok(None);
    }
    parse_float(field, value).map(Some)
}
