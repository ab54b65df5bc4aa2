//! Fuel price client for polttoaine.info.
//!
//! Lists cities and fuel stations with their latest prices, and submits
//! price updates. Responses are parsed incrementally as they stream in.

pub mod api;
pub mod cli;
pub mod domain;
