//! Flattening records into table rows.

use std::fmt;

/// One value in a flattened row. `None` is a null placeholder.
pub type Cell = Option<String>;

/// A record that can be written as a single table row.
///
/// Every instance of a type produces the same number of cells, so rows
/// line up in tabular output whatever optional data is present.
pub trait Record: fmt::Display {
    /// Number of cells produced by [`Record::cells`].
    const WIDTH: usize;

    fn cells(&self) -> Vec<Cell>;
}

pub(crate) fn optional<T: fmt::Display>(value: Option<T>) -> Cell {
    value.map(|v| v.to_string())
}

/// Formats an optional value the way the records print themselves.
pub(crate) struct Opt<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for Opt<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("None"),
        }
    }
}
