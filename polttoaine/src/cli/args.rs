//! CLI argument parsing.
//!
//! ```bash
//! polttoaine cities
//! polttoaine stations city 19 --name Espoo
//! polttoaine --output-format csv stations location 60.20 24.75 --max-distance-km 3
//! polttoaine submit 2799 today --price-95 1.639 --price-diesel 1.514
//! polttoaine version
//! ```

use chrono::{Days, NaiveDate};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

use crate::api::DEFAULT_BASE_URL;
use crate::domain::validate;

/// polttoaine: fuel prices from polttoaine.info
#[derive(Parser, Debug)]
#[command(name = "polttoaine")]
#[command(about = "List fuel stations and prices, and submit price updates")]
pub struct Args {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Str)]
    pub output_format: OutputFormat,

    /// Base URL of the fuel price API
    #[arg(long, env = "POLTTOAINE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One record per line in readable form
    Str,
    /// Comma separated, one fixed-width row per record
    Csv,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List cities
    Cities,

    /// List stations
    Stations {
        #[command(subcommand)]
        by: StationsCommand,
    },

    /// Submit updated prices for a station
    Submit {
        #[arg(value_name = "STATION-ID")]
        station_id: i64,

        /// Day the prices were seen
        #[arg(value_enum, value_name = "WHEN")]
        when: When,

        #[arg(long, value_name = "PRICE", value_parser = validate::parse_price)]
        price_95: Option<f64>,

        #[arg(long, value_name = "PRICE", value_parser = validate::parse_price)]
        price_98: Option<f64>,

        #[arg(long, value_name = "PRICE", value_parser = validate::parse_price)]
        price_diesel: Option<f64>,
    },

    /// Print the version
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum StationsCommand {
    /// Stations in a city
    City {
        #[arg(value_name = "CITY-ID")]
        city_id: i64,

        /// City name; needed to include stations without prices
        #[arg(long)]
        name: Option<String>,
    },

    /// Stations near a location
    #[command(allow_negative_numbers = true)]
    Location {
        #[arg(value_name = "LATITUDE", value_parser = validate::parse_latitude)]
        latitude: f64,

        #[arg(value_name = "LONGITUDE", value_parser = validate::parse_longitude)]
        longitude: f64,

        /// Search radius in kilometres
        #[arg(long, value_name = "N", value_parser = validate::parse_max_distance_km)]
        max_distance_km: Option<u32>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum When {
    Today,
    Yesterday,
}

impl When {
    /// The calendar date this refers to, relative to `today`.
    pub fn date(self, today: NaiveDate) -> NaiveDate {
        match self {
            When::Today => today,
            When::Yesterday => today.checked_sub_days(Days::new(1)).unwrap_or(today),
        }
    }
}

impl Args {
    /// Checks that clap cannot express on its own.
    pub fn check(&self) -> Result<(), clap::Error> {
        if let Command::Submit {
            price_95: None,
            price_98: None,
            price_diesel: None,
            ..
        } = self.command
        {
            return Err(Args::command().error(
                ErrorKind::MissingRequiredArgument,
                "at least one --price-* argument is required",
            ));
        }
        Ok(())
    }
}
