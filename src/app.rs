//! Core application runner for `sensortag-monitor`.
//!
//! This module is intentionally decoupled from CLI parsing and process exit
//! codes so it can be tested deterministically with an injected tag source
//! and injected output streams.

use crate::device_type::{DeviceTypeHint, DeviceTypeMap};
use crate::measurement::{LOCATOR_ID, Measurement, TAG_ID};
use crate::output::OutputFormatter;
use crate::output::influxdb::InfluxDbFormatter;
use crate::registry::FormatRegistry;
use crate::tag::TagRecord;
use clap::Parser;
use std::future::Future;
use std::io;
use std::io::Write;
use std::pin::Pin;
use thiserror::Error;

/// Configuration for the core run loop.
#[derive(Parser, Debug, Clone)]
#[command(author, about, version)]
pub struct Options {
    /// Base URL of the locating engine to poll.
    #[arg(long, default_value = "http://localhost:8080/qpe")]
    pub qpe_addr: String,

    /// Time in seconds between polling calls to the engine.
    #[arg(long, default_value_t = 15.0)]
    pub poll_interval: f64,

    /// Override the measurement (group) name for every output line.
    /// Defaults to the packet format name of each decoded record.
    #[arg(long)]
    pub influxdb_measurement: Option<String>,

    /// Pin a tag id to a packet format, bypassing auto-detection.
    /// Format: --device-type ac233fa29a16=minew_e6
    #[arg(long = "device-type", value_parser = crate::device_type::parse_device_type, value_name = "HINT")]
    pub device_types: Vec<DeviceTypeHint>,

    /// Attribute names to publish as tags instead of fields.
    /// Defaults to the tag id and the reporting locator id.
    #[arg(long = "tag-key", value_name = "KEY")]
    pub tag_keys: Vec<String>,

    /// Decoded field names to drop from the output.
    #[arg(long = "exclude-field", value_name = "KEY")]
    pub exclude_fields: Vec<String>,

    /// Verbose output, report tags whose payload no format matched.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Error polling the tag source.
#[derive(Error, Debug)]
pub enum PollError {
    /// Transport-level failure talking to the locating engine.
    #[error("locating engine request failed: {0}")]
    Request(String),
    /// The engine answered with an unexpected status code.
    #[error("locating engine returned code {0}")]
    UnexpectedCode(i64),
}

/// Errors returned by the core run loop.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Source of tag observation batches, abstracted so the run loop can be
/// driven by a fake in tests. A real source never ends; a fake signals the
/// end of input with `None`.
pub trait TagSource: Send {
    fn poll(
        &mut self,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Vec<TagRecord>>, PollError>> + Send + '_>>;
}

/// Run the core processing loop, writing formatted measurements to `out`.
///
/// Each polled record is decoded against the format registry (honoring any
/// device type hint for its tag id), projected, and written as one line.
/// Records no format matches are reported to `err` only in verbose mode.
/// Poll errors are logged and polling continues; only sink I/O errors are
/// fatal.
pub async fn run_with_io(
    options: Options,
    source: &mut dyn TagSource,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), RunError> {
    let registry = FormatRegistry::new();
    let hints: DeviceTypeMap = crate::device_type::to_map(&options.device_types);
    let formatter = InfluxDbFormatter::new(options.influxdb_measurement.clone());

    let tag_keys: Vec<&str> = if options.tag_keys.is_empty() {
        vec![TAG_ID, LOCATOR_ID]
    } else {
        options.tag_keys.iter().map(String::as_str).collect()
    };
    let exclude_fields: Vec<&str> = options.exclude_fields.iter().map(String::as_str).collect();

    loop {
        let batch = match source.poll().await {
            Ok(Some(batch)) => batch,
            Ok(None) => break,
            Err(error) => {
                log::error!("{error} ... no data received");
                continue;
            }
        };

        log::info!("received {} tag observations", batch.len());

        for mut record in batch {
            let hint = hints.get(&record.tag_id).map(String::as_str);
            if record.decode(&registry, hint, None) {
                let measurement = Measurement::project(&record, None, &tag_keys, &exclude_fields);
                writeln!(out, "{}", formatter.format(&measurement))?;
            } else if options.verbose {
                writeln!(
                    err,
                    "no packet format matched tag {} payload {}",
                    record.tag_id,
                    record.normalized_payload()
                )?;
            }
        }
    }

    Ok(())
}
