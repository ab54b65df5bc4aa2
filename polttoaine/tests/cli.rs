//! Integration tests for argument parsing and output formatting.

use chrono::NaiveDate;
use clap::Parser;
use clap::error::ErrorKind;

use polttoaine::cli::{Args, Command, Output, OutputFormat, StationsCommand, When, run};
use polttoaine::domain::{City, Coordinates, Prices, Station};

fn parse(args: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("polttoaine").chain(args.iter().copied()))
}

fn sample_station() -> Station {
    Station {
        id: 2799,
        prices: Prices::new(
            NaiveDate::from_ymd_opt(2024, 3, 15),
            Some(1.639),
            None,
            Some(1.514),
        ),
        name: Some("Neste, Tapiola".into()),
        city: Some(City::new(19, "Espoo")),
        coordinates: Some(Coordinates::new(60.2, 24.75)),
    }
}

#[test]
fn parse_cities() {
    let args = parse(&["cities"]).unwrap();
    assert!(matches!(args.command, Command::Cities));
    assert_eq!(args.output_format, OutputFormat::Str);
}

#[test]
fn parse_output_format() {
    let args = parse(&["--output-format", "csv", "cities"]).unwrap();
    assert_eq!(args.output_format, OutputFormat::Csv);

    let err = parse(&["--output-format", "json", "cities"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn parse_stations_by_city() {
    let args = parse(&["stations", "city", "19", "--name", "Espoo"]).unwrap();
    match args.command {
        Command::Stations {
            by: StationsCommand::City { city_id, name },
        } => {
            assert_eq!(city_id, 19);
            assert_eq!(name.as_deref(), Some("Espoo"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_stations_by_location() {
    let args = parse(&[
        "stations",
        "location",
        "-33.86",
        "151.2",
        "--max-distance-km",
        "3",
    ])
    .unwrap();
    match args.command {
        Command::Stations {
            by:
                StationsCommand::Location {
                    latitude,
                    longitude,
                    max_distance_km,
                },
        } => {
            assert_eq!(latitude, -33.86);
            assert_eq!(longitude, 151.2);
            assert_eq!(max_distance_km, Some(3));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn location_arguments_are_validated() {
    let err = parse(&["stations", "location", "91", "24.75"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert!(err.to_string().contains("latitude must be between -90 and 90"));

    let err = parse(&["stations", "location", "60", "-181"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = parse(&["stations", "location", "60", "24", "--max-distance-km", "0"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert!(err.to_string().contains("max distance km must be >= 1"));
}

#[test]
fn parse_submit() {
    let args = parse(&["submit", "2799", "yesterday", "--price-95", "1.639"]).unwrap();
    assert!(args.check().is_ok());
    match args.command {
        Command::Submit {
            station_id,
            when,
            price_95,
            price_98,
            price_diesel,
        } => {
            assert_eq!(station_id, 2799);
            assert_eq!(when, When::Yesterday);
            assert_eq!(price_95, Some(1.639));
            assert_eq!(price_98, None);
            assert_eq!(price_diesel, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn submit_requires_a_price() {
    let args = parse(&["submit", "2799", "today"]).unwrap();
    let err = args.check().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn submit_rejects_bad_input() {
    let err = parse(&["submit", "2799", "tomorrow", "--price-95", "1.6"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);

    let err = parse(&["submit", "2799", "today", "--price-95", "0"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);
    assert!(err.to_string().contains("price must be > 0"));
}

#[test]
fn missing_command_is_an_error() {
    assert!(parse(&[]).is_err());
}

#[tokio::test]
async fn version_prints_package_version() {
    let args = parse(&["version"]).unwrap();
    let out = run(args, Vec::new()).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("{}\n", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn csv_rows_have_uniform_width() {
    let mut output = Output::new(OutputFormat::Csv, Vec::new());
    output.record(&sample_station()).unwrap();
    output.record(&Station::new(5, Prices::default())).unwrap();
    let text = String::from_utf8(output.finish().unwrap()).unwrap();

    let lines: Vec<&str> = text.split("\r\n").filter(|l| !l.is_empty()).collect();
    assert_eq!(
        lines,
        vec![
            "2799,2024-03-15,1.639,,1.514,,\"Neste, Tapiola\",19,Espoo,60.2,24.75",
            "5,,,,,,,,,,",
        ]
    );
}

#[test]
fn str_output_uses_display() {
    let mut output = Output::new(OutputFormat::Str, Vec::new());
    output.record(&City::new(1, "Helsinki")).unwrap();
    output.message("Kiitos!").unwrap();
    let text = String::from_utf8(output.finish().unwrap()).unwrap();
    assert_eq!(text, "City(id=1, name=\"Helsinki\")\nKiitos!\n");
}

#[test]
fn csv_message() {
    let mut output = Output::new(OutputFormat::Csv, Vec::new());
    output.message("Hinnat päivitetty").unwrap();
    let text = String::from_utf8(output.finish().unwrap()).unwrap();
    assert_eq!(text, "Hinnat päivitetty\r\n");
}
