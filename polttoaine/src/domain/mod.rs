//! Domain records for the fuel price service.
//!
//! Records are plain values built fresh from each response row. Optional
//! fields are genuinely optional: the service leaves gaps in its data and
//! an absent price is not the same thing as a zero price.

mod city;
mod date;
mod error;
mod prices;
mod record;
mod station;
pub mod validate;

pub use city::City;
pub use date::{DateError, helsinki_today, resolve_day_month};
pub use error::ValidationError;
pub use prices::{Coordinates, Prices};
pub use record::{Cell, Record};
pub use station::Station;
