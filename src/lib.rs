//! `sensortag-monitor` library.
//!
//! The binary (`src/main.rs`) is responsible for CLI parsing and process exit
//! codes. The core pipeline lives in [`crate::app`] where it can be tested
//! deterministically with an injected tag source + injected output streams.
//!
//! Decoding itself is layered bottom-up: [`crate::codec`] converts raw hex
//! substrings to numbers, [`crate::formats`] describes each supported device
//! family, [`crate::registry`] resolves payloads to a format, [`crate::tag`]
//! holds per-poll tag records, and [`crate::measurement`] projects decoded
//! records into storage-ready points.

pub mod app;
pub mod codec;
pub mod device_type;
#[cfg(feature = "engine")]
pub mod engine;
pub mod formats;
pub mod measurement;
pub mod output;
pub mod registry;
pub mod tag;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types at the crate root
pub use app::{Options, PollError, RunError, TagSource, run_with_io};
pub use codec::CodecError;
pub use measurement::Measurement;
pub use output::OutputFormatter;
pub use output::influxdb::InfluxDbFormatter;
pub use registry::{FormatRegistry, PacketFormat, Value};
pub use tag::{DecodedPayload, TagObservation, TagRecord};
