//! Report dates without a year.
//!
//! The service reports price dates as `dd.mm.` with no year. The year has
//! to be guessed relative to the current day in Finland.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Europe::Helsinki;

/// Error returned when a report date cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid report date {value:?}")]
pub struct DateError {
    value: String,
}

/// The current calendar day in Europe/Helsinki.
pub fn helsinki_today() -> NaiveDate {
    Utc::now().with_timezone(&Helsinki).date_naive()
}

/// Resolve a `dd.mm.` date against `today`.
///
/// The current year is tried first. A result later than `today` must belong
/// to the previous year, so it is reinterpreted with `today.year() - 1`.
/// Dates more than a year old cannot be told apart and resolve into the
/// most recent matching year.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use polttoaine::domain::resolve_day_month;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(
///     resolve_day_month("15.03.", today).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()
/// );
/// assert_eq!(
///     resolve_day_month("09.01.", today).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()
/// );
/// ```
pub fn resolve_day_month(s: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    let date = parse_with_year(s, today.year())?;
    if date > today {
        return parse_with_year(s, today.year() - 1);
    }
    Ok(date)
}

fn parse_with_year(s: &str, year: i32) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(&format!("{}{year}", s.trim()), "%d.%m.%Y").map_err(|_| DateError {
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn past_date_uses_current_year() {
        assert_eq!(resolve_day_month("05.01.", ymd(2024, 1, 10)), Ok(ymd(2024, 1, 5)));
    }

    #[test]
    fn today_uses_current_year() {
        assert_eq!(resolve_day_month("10.01.", ymd(2024, 1, 10)), Ok(ymd(2024, 1, 10)));
    }

    #[test]
    fn future_date_rolls_back_a_year() {
        assert_eq!(resolve_day_month("15.03.", ymd(2024, 1, 10)), Ok(ymd(2023, 3, 15)));
        assert_eq!(resolve_day_month("31.12.", ymd(2024, 1, 1)), Ok(ymd(2023, 12, 31)));
        assert_eq!(resolve_day_month("11.01.", ymd(2024, 1, 10)), Ok(ymd(2023, 1, 11)));
    }

    #[test]
    fn leap_day_in_leap_year() {
        assert_eq!(resolve_day_month("29.02.", ymd(2024, 3, 1)), Ok(ymd(2024, 2, 29)));
    }

    #[test]
    fn leap_day_in_common_year_is_rejected() {
        assert!(resolve_day_month("29.02.", ymd(2025, 3, 1)).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(resolve_day_month("yesterday", ymd(2024, 1, 10)).is_err());
        assert!(resolve_day_month("32.01.", ymd(2024, 1, 10)).is_err());
        assert!(resolve_day_month("", ymd(2024, 1, 10)).is_err());
    }
}
