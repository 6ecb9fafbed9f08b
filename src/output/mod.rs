//! Output formatters for projected measurements.
//!
//! A formatter turns a [`Measurement`] into one writable line. Currently only
//! InfluxDB line protocol is implemented.

pub mod influxdb;

use crate::measurement::Measurement;

/// Trait for formatting measurements into output strings.
pub trait OutputFormatter: Send + Sync {
    /// Format a single measurement as one output line (without trailing
    /// newline).
    fn format(&self, measurement: &Measurement) -> String;
}
