//! City records.

use std::fmt;

use super::record::{Cell, Record};

/// A city known to the service. Cities are identified by `id` alone.
#[derive(Debug, Clone)]
pub struct City {
    pub id: i64,
    pub name: String,
}

impl City {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for City {}

impl std::hash::Hash for City {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Record for City {
    const WIDTH: usize = 2;

    fn cells(&self) -> Vec<Cell> {
        vec![Some(self.id.to_string()), Some(self.name.clone())]
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City(id={}, name={:?})", self.id, self.name)
    }
}
