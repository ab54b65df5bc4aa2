//! Command-line interface.

mod args;
mod error;
mod output;

use std::io::Write;

use tracing::debug;

use crate::api::{DEFAULT_MAX_DISTANCE_KM, FuelClient, FuelClientConfig};
use crate::domain::{Coordinates, Prices, Station, helsinki_today};

pub use args::{Args, Command, OutputFormat, StationsCommand, When};
pub use error::{CliError, Result};
pub use output::Output;

/// Run a parsed command, writing results to `out`.
pub async fn run<W: Write>(args: Args, out: W) -> Result<W> {
    let mut output = Output::new(args.output_format, out);
    let client = || FuelClient::new(FuelClientConfig::new().with_base_url(&args.base_url));

    match args.command {
        Command::Version => {
            output.message(env!("CARGO_PKG_VERSION"))?;
        }
        Command::Cities => {
            let client = client()?;
            let count = output.records(client.get_cities().await?).await?;
            debug!(count, "listed cities");
        }
        Command::Stations {
            by: StationsCommand::City { city_id, name },
        } => {
            let client = client()?;
            let stations = client
                .get_stations_by_city(city_id, name.as_deref())
                .await?;
            let count = output.records(stations).await?;
            debug!(count, city_id, "listed stations");
        }
        Command::Stations {
            by:
                StationsCommand::Location {
                    latitude,
                    longitude,
                    max_distance_km,
                },
        } => {
            let client = client()?;
            let stations = client
                .get_stations_by_location(
                    Coordinates::new(latitude, longitude),
                    max_distance_km.unwrap_or(DEFAULT_MAX_DISTANCE_KM),
                )
                .await?;
            let count = output.records(stations).await?;
            debug!(count, latitude, longitude, "listed stations");
        }
        Command::Submit {
            station_id,
            when,
            price_95,
            price_98,
            price_diesel,
        } => {
            let client = client()?;
            let date = when.date(helsinki_today());
            let station = Station::new(
                station_id,
                Prices::new(Some(date), price_95, price_98, price_diesel),
            );
            let message = client.submit(&station).await?;
            output.message(&message)?;
        }
    }

    output.finish()
}
