//! Request parameters.
//!
//! Station listings by city and by location share one endpoint and one set
//! of parameter names; the kind of search is told apart by what the
//! parameters contain. Callers work with [`StationQuery`] and the shared
//! shape is only produced when the request is built.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::{Coordinates, Station, ValidationError, validate};

/// Default search radius for location queries.
pub const DEFAULT_MAX_DISTANCE_KM: u32 = 5;

/// `kuntaNimi` value that switches the listing endpoint to location search.
const NEAREST_STATIONS: &str = "Lähimmät asemat";

/// A station listing request.
#[derive(Debug, Clone, PartialEq)]
pub enum StationQuery {
    /// Stations in a city. Without a name, only stations with at least one
    /// price are listed.
    ByCity { id: i64, name: Option<String> },
    /// Stations within `max_distance_km` of a point.
    ByLocation {
        coordinates: Coordinates,
        max_distance_km: u32,
    },
}

impl StationQuery {
    pub fn by_city(id: i64, name: Option<impl Into<String>>) -> Self {
        StationQuery::ByCity {
            id,
            name: name.map(Into::into),
        }
    }

    /// Stations near a point, within the default radius.
    pub fn near(coordinates: Coordinates) -> Self {
        StationQuery::ByLocation {
            coordinates,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
        }
    }

    pub fn with_max_distance_km(self, km: u32) -> Self {
        match self {
            StationQuery::ByLocation { coordinates, .. } => StationQuery::ByLocation {
                coordinates,
                max_distance_km: km,
            },
            other => other,
        }
    }

    /// Validate and encode as request parameters.
    pub fn to_params(&self) -> Result<QueryParams, ValidationError> {
        match self {
            StationQuery::ByCity { id, name } => Ok(QueryParams {
                city_id: id.to_string(),
                kunta_nimi: name.clone().unwrap_or_default(),
                is_city: "true".to_string(),
            }),
            StationQuery::ByLocation {
                coordinates,
                max_distance_km,
            } => {
                let max_distance_km = validate::max_distance_km(*max_distance_km)?;
                let latitude = validate::latitude(coordinates.latitude)?;
                let longitude = validate::longitude(coordinates.longitude)?;
                Ok(QueryParams {
                    city_id: format!("{latitude:.6}/{longitude:.6}"),
                    kunta_nimi: NEAREST_STATIONS.to_string(),
                    is_city: max_distance_km.to_string(),
                })
            }
        }
    }
}

/// Query string of the station listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParams {
    #[serde(rename = "cityId")]
    pub city_id: String,
    #[serde(rename = "kuntaNimi")]
    pub kunta_nimi: String,
    #[serde(rename = "isCity")]
    pub is_city: String,
}

/// Which day a price report refers to, as the service encodes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifiedDay {
    Today,
    Yesterday,
}

impl NotifiedDay {
    /// The report day for `date`, which must be `today` or the day before.
    pub fn for_date(date: Option<NaiveDate>, today: NaiveDate) -> Result<Self, ValidationError> {
        match date {
            Some(d) if d == today => Ok(NotifiedDay::Today),
            Some(d) if Some(d) == today.checked_sub_days(Days::new(1)) => {
                Ok(NotifiedDay::Yesterday)
            }
            _ => Err(ValidationError::NotifiedDay),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            NotifiedDay::Today => 1,
            NotifiedDay::Yesterday => 2,
        }
    }
}

/// Form body of a price submission. Absent prices are sent as empty
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubmitForm {
    pub id: i64,
    pub price1: String,
    pub price2: String,
    pub price3: String,
    pub notified_day: u8,
}

impl SubmitForm {
    /// Validate a station's prices for submission on `today`.
    pub fn new(station: &Station, today: NaiveDate) -> Result<Self, ValidationError> {
        let prices = &station.prices;
        let price_95 = validate::price(prices.price_95)?;
        let price_98 = validate::price(prices.price_98)?;
        let price_diesel = validate::price(prices.price_diesel)?;
        let notified_day = NotifiedDay::for_date(prices.date, today)?;

        Ok(Self {
            id: station.id,
            price1: price_text(price_95),
            price2: price_text(price_98),
            price3: price_text(price_diesel),
            notified_day: notified_day.code(),
        })
    }
}

fn price_text(price: Option<f64>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}
