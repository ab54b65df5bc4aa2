//! Fuel price service HTTP client.
//!
//! Listings are returned as streams that parse the body while it arrives.
//! A stream holds its response open until it is exhausted or dropped.

use chrono::NaiveDate;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::domain::{City, Coordinates, Station, helsinki_today};

use super::convert::{city_from_row, station_from_row, submit_outcome};
use super::error::ApiError;
use super::query::{StationQuery, SubmitForm};
use super::rows::{ResponseMeta, Row, rows};

/// Default base URL of the fuel price API.
pub const DEFAULT_BASE_URL: &str = "https://www.omamobiili.com/pa_api";

const CITIES_PATH: &str = "Station/GetCities";
const STATIONS_PATH: &str = "Station/GetStationsKuntaNameWithEmpty";
const SUBMIT_PATH: &str = "Station/SendPricesAPI2";

/// Records parsed lazily from a response body.
pub type RecordStream<T> = BoxStream<'static, Result<T, ApiError>>;

/// Configuration for the fuel price client.
#[derive(Debug, Clone)]
pub struct FuelClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for FuelClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FuelClientConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the fuel price API.
#[derive(Debug, Clone)]
pub struct FuelClient {
    http: reqwest::Client,
    base_url: String,
}

impl FuelClient {
    /// Create a new client with the given configuration.
    pub fn new(config: FuelClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| ApiError::Config("invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// List all cities.
    pub async fn get_cities(&self) -> Result<RecordStream<City>, ApiError> {
        let url = self.url(CITIES_PATH);
        debug!(%url, "fetching cities");

        let response = check_status(self.http.get(&url).send().await?)?;
        let meta = ResponseMeta::from_response(&response);

        Ok(cities(response.bytes_stream(), meta).boxed())
    }

    /// List stations in a city.
    ///
    /// Without `city_name` the service only returns stations that have at
    /// least one price set.
    pub async fn get_stations_by_city(
        &self,
        city_id: i64,
        city_name: Option<&str>,
    ) -> Result<RecordStream<Station>, ApiError> {
        self.get_stations(&StationQuery::by_city(city_id, city_name))
            .await
    }

    /// List stations within `max_distance_km` of `coordinates`.
    pub async fn get_stations_by_location(
        &self,
        coordinates: Coordinates,
        max_distance_km: u32,
    ) -> Result<RecordStream<Station>, ApiError> {
        let query = StationQuery::near(coordinates).with_max_distance_km(max_distance_km);
        self.get_stations(&query).await
    }

    /// List stations matching `query`.
    ///
    /// Parameters are validated before any request is sent.
    pub async fn get_stations(
        &self,
        query: &StationQuery,
    ) -> Result<RecordStream<Station>, ApiError> {
        let params = query.to_params()?;
        let url = self.url(STATIONS_PATH);
        debug!(
            %url,
            city_id = %params.city_id,
            kunta_nimi = %params.kunta_nimi,
            is_city = %params.is_city,
            "fetching stations"
        );

        let response = check_status(self.http.get(&url).query(&params).send().await?)?;
        let meta = ResponseMeta::from_response(&response);

        Ok(stations(
            response.bytes_stream(),
            meta,
            params.city_id,
            helsinki_today(),
        )
        .boxed())
    }

    /// Submit updated prices for a station.
    ///
    /// `station.prices.date` must be today or yesterday in Finland. Absent
    /// prices are left unchanged by the service. Returns the service's
    /// confirmation message.
    pub async fn submit(&self, station: &Station) -> Result<String, ApiError> {
        let form = SubmitForm::new(station, helsinki_today())?;
        let url = self.url(SUBMIT_PATH);
        debug!(%url, station = form.id, notified_day = form.notified_day, "submitting prices");

        let response = check_status(self.http.post(&url).form(&form).send().await?)?;
        let meta = ResponseMeta::from_response(&response);
        submission_result(response.bytes_stream(), meta).await
    }
}

/// Cities parsed from a `Station/GetCities` body.
pub fn cities<S, B, E>(body: S, meta: ResponseMeta) -> impl Stream<Item = Result<City, ApiError>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ApiError: From<E>,
{
    rows(body, meta).map(|row: Result<Row, ApiError>| -> Result<City, ApiError> {
        Ok(city_from_row(&row?)?)
    })
}

/// Stations parsed from a station listing body requested with
/// `query_city_id` as its `cityId` parameter.
pub fn stations<S, B, E>(
    body: S,
    meta: ResponseMeta,
    query_city_id: String,
    today: NaiveDate,
) -> impl Stream<Item = Result<Station, ApiError>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ApiError: From<E>,
{
    rows(body, meta).map(move |row: Result<Row, ApiError>| -> Result<Station, ApiError> {
        Ok(station_from_row(&row?, &query_city_id, today)?)
    })
}

/// Read a price submission response.
///
/// Only the first row is interpreted, but the whole body is read so that
/// an exception reported further down is not missed.
pub async fn submission_result<S, B, E>(body: S, meta: ResponseMeta) -> Result<String, ApiError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    ApiError: From<E>,
{
    let mut body = std::pin::pin!(rows(body, meta.clone()));
    let first = body.try_next().await?;
    while body.try_next().await?.is_some() {}

    submit_outcome(first.as_ref()).map_err(|message| {
        let message = if message.is_empty() {
            meta.status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            message
        };
        debug!(status = %meta.status, %message, "price submission rejected");
        meta.error(message)
    })
}

/// Turn a non-2xx response into an error.
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = status.canonical_reason().unwrap_or("Unknown error");
    debug!(%status, "request failed");
    Err(ResponseMeta::from_response(&response).error(message))
}
