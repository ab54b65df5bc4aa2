//! Client for the polttoaine.info fuel price API.
//!
//! Key characteristics of the service:
//! - Every response body is semicolon separated CSV, read as it streams in
//! - Failures may arrive as `200 OK` with exception text in the body; these
//!   surface as [`ApiError::Response`] just like error statuses
//! - Station listings by city and by location share one endpoint, see
//!   [`StationQuery`]
//! - Report dates carry no year, see [`crate::domain::resolve_day_month`]

mod client;
mod convert;
mod error;
mod query;
mod rows;

pub use client::{
    DEFAULT_BASE_URL, FuelClient, FuelClientConfig, RecordStream, cities, stations,
    submission_result,
};
pub use convert::{ConversionError, city_from_row, station_from_row};
pub use error::ApiError;
pub use query::{DEFAULT_MAX_DISTANCE_KM, NotifiedDay, QueryParams, StationQuery, SubmitForm};
pub use rows::{InBandError, ParserState, ResponseMeta, Row, RowReader, rows};
