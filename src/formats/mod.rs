//! Built-in packet format descriptors, one module per device family.
//!
//! Each module exports its format name and a [`PacketFormat`] constructor;
//! the registry is assembled from the static table below rather than any
//! kind of dynamic discovery, so the full set of supported formats is
//! enumerable and testable as a whole.

pub mod minew_e6;
pub mod minew_s1;
pub mod minew_s4_alarm;
pub mod ruuvi_raw_v1;
pub mod ruuvi_raw_v2_f5;

use crate::registry::PacketFormat;

/// Field name prefix marking values that are internal to the pipeline and
/// must never be published.
pub const INTERNAL_MARKER: char = '_';

/// Key under which matchers capture the little-endian MAC tail of Minew
/// payloads. Internal: kept for diagnostics, excluded from projection.
pub(crate) const LITTLE_ENDIAN_MAC: &str = "_little_endian_mac";

/// All supported formats in registration order. Order is the deterministic
/// tie-break when more than one matcher could accept a payload; company ID
/// preambles are disjoint so in practice at most one matches.
pub(crate) fn builtin_formats() -> Vec<PacketFormat> {
    vec![
        minew_s1::format(),
        minew_e6::format(),
        minew_s4_alarm::format(),
        ruuvi_raw_v1::format(),
        ruuvi_raw_v2_f5::format(),
    ]
}
