//! Parameter validators.
//!
//! The numeric functions are used by the client before building a request.
//! The `parse_*` variants take raw text and are used as clap value parsers,
//! so the CLI reports the same messages as the library.

use super::error::ValidationError;

/// Validate a search radius in kilometres.
pub fn max_distance_km(value: u32) -> Result<u32, ValidationError> {
    if value < 1 {
        return Err(ValidationError::MaxDistance);
    }
    Ok(value)
}

/// Validate a latitude in degrees, inclusive of the poles.
pub fn latitude(value: f64) -> Result<f64, ValidationError> {
    if (-90.0..=90.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::Latitude)
    }
}

/// Validate a longitude in degrees, inclusive of the antimeridian.
pub fn longitude(value: f64) -> Result<f64, ValidationError> {
    if (-180.0..=180.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::Longitude)
    }
}

/// Validate an optional price. `None` passes through unchanged.
pub fn price(value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if v > 0.0 => Ok(Some(v)),
        Some(_) => Err(ValidationError::Price),
    }
}

pub fn parse_max_distance_km(s: &str) -> Result<u32, ValidationError> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber(s.to_string()))?;
    if value < 1 {
        return Err(ValidationError::MaxDistance);
    }
    u32::try_from(value).map_err(|_| ValidationError::NotANumber(s.to_string()))
}

pub fn parse_latitude(s: &str) -> Result<f64, ValidationError> {
    latitude(parse_f64(s)?)
}

pub fn parse_longitude(s: &str) -> Result<f64, ValidationError> {
    longitude(parse_f64(s)?)
}

pub fn parse_price(s: &str) -> Result<f64, ValidationError> {
    let value = parse_f64(s)?;
    price(Some(value))?.ok_or(ValidationError::Price)
}

fn parse_f64(s: &str) -> Result<f64, ValidationError> {
    s.trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_distance_bounds() {
        assert_eq!(max_distance_km(1), Ok(1));
        assert_eq!(max_distance_km(50), Ok(50));
        assert_eq!(max_distance_km(0), Err(ValidationError::MaxDistance));
    }

    #[test]
    fn parse_max_distance() {
        assert_eq!(parse_max_distance_km("5"), Ok(5));
        assert_eq!(parse_max_distance_km("0"), Err(ValidationError::MaxDistance));
        assert_eq!(parse_max_distance_km("-3"), Err(ValidationError::MaxDistance));
        assert!(matches!(
            parse_max_distance_km("1.5"),
            Err(ValidationError::NotANumber(_))
        ));
    }

    #[test]
    fn latitude_closed_range() {
        assert_eq!(latitude(-90.0), Ok(-90.0));
        assert_eq!(latitude(90.0), Ok(90.0));
        assert_eq!(latitude(60.17), Ok(60.17));
        assert_eq!(latitude(90.0 + 1e-9), Err(ValidationError::Latitude));
        assert_eq!(latitude(-90.0 - 1e-9), Err(ValidationError::Latitude));
        assert_eq!(latitude(f64::NAN), Err(ValidationError::Latitude));
    }

    #[test]
    fn longitude_closed_range() {
        assert_eq!(longitude(-180.0), Ok(-180.0));
        assert_eq!(longitude(180.0), Ok(180.0));
        assert_eq!(longitude(180.0 + 1e-9), Err(ValidationError::Longitude));
        assert_eq!(longitude(-180.0 - 1e-9), Err(ValidationError::Longitude));
    }

    #[test]
    fn price_none_passes_through() {
        assert_eq!(price(None), Ok(None));
    }

    #[test]
    fn price_must_be_positive() {
        assert_eq!(price(Some(1.639)), Ok(Some(1.639)));
        assert_eq!(price(Some(0.0)), Err(ValidationError::Price));
        assert_eq!(price(Some(-1.0)), Err(ValidationError::Price));
    }

    #[test]
    fn parse_text_inputs() {
        assert_eq!(parse_latitude("60.2"), Ok(60.2));
        assert_eq!(parse_longitude("-24.75"), Ok(-24.75));
        assert_eq!(parse_price("1.729"), Ok(1.729));
        assert_eq!(parse_price("0"), Err(ValidationError::Price));
        assert_eq!(parse_latitude("91"), Err(ValidationError::Latitude));
        assert!(matches!(
            parse_longitude("east"),
            Err(ValidationError::NotANumber(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn positive_prices_accepted(p in 1e-6f64..1e6) {
            prop_assert_eq!(price(Some(p)), Ok(Some(p)));
        }

        #[test]
        fn non_positive_prices_rejected(p in -1e6f64..=0.0) {
            prop_assert_eq!(price(Some(p)), Err(ValidationError::Price));
        }

        #[test]
        fn latitudes_in_range_accepted(lat in -90.0f64..=90.0) {
            prop_assert_eq!(latitude(lat), Ok(lat));
        }

        #[test]
        fn longitudes_out_of_range_rejected(lon in 180.0001f64..1e6) {
            prop_assert!(longitude(lon).is_err());
            prop_assert!(longitude(-lon).is_err());
        }
    }
}
