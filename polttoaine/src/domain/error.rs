//! Validation errors for user supplied input.

/// Input rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Text that should have been a number
    #[error("invalid number: {0:?}")]
    NotANumber(String),

    #[error("max distance km must be >= 1")]
    MaxDistance,

    #[error("latitude must be between -90 and 90")]
    Latitude,

    #[error("longitude must be between -180 and 180")]
    Longitude,

    #[error("price must be > 0")]
    Price,

    /// Price reports can only be dated today or yesterday
    #[error("prices date must be today or yesterday")]
    NotifiedDay,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::NotANumber("abc".into());
        assert_eq!(err.to_string(), "invalid number: \"abc\"");

        assert_eq!(
            ValidationError::MaxDistance.to_string(),
            "max distance km must be >= 1"
        );
        assert_eq!(
            ValidationError::Latitude.to_string(),
            "latitude must be between -90 and 90"
        );
        assert_eq!(
            ValidationError::Longitude.to_string(),
            "longitude must be between -180 and 180"
        );
        assert_eq!(ValidationError::Price.to_string(), "price must be > 0");
        assert_eq!(
            ValidationError::NotifiedDay.to_string(),
            "prices date must be today or yesterday"
        );
    }
}
