//! Shared fixtures for unit tests.

use crate::registry::{DecodedValues, PacketFormat};
use crate::tag::TagRecord;

/// Documented sample payloads, one per registered packet format, already in
/// normalized (contiguous lowercase) form.
pub mod payloads {
    pub const MINEW_S1_SAMPLE: &str = "0201060303e1ff1016e1ffa101640a304c593182ab3f23ac";
    pub const MINEW_E6_SAMPLE: &str = "0201060303e1ff0d16e1ffa1026401169aa23f23ac";
    pub const MINEW_S4_SAMPLE: &str = "02010612ff3906a40164010100ff0677aa3f23ac3b5a";
    pub const RUUVI_V1_SAMPLE: &str = "02010611ff990403291a1ece1efc18f94202ca0b53";
    pub const RUUVI_V2_SAMPLE: &str =
        "02010611ff99040512fc5394c37c0004fffc040cac364200cdcbb8334c884f";

    /// The S1 sample as the engine delivers it, with per-byte 0x prefixes.
    pub const MINEW_S1_RAW: &str = "0x02 0x01 0x06 0x03 0x03 0xe1 0xff 0x10 0x16 0xe1 0xff \
                                    0xa1 0x01 0x64 0x0a 0x30 0x4c 0x59 0x31 0x82 0xab 0x3f \
                                    0x23 0xac";

    pub const ALL_SAMPLES: &[(&str, &str)] = &[
        ("minew_s1", MINEW_S1_SAMPLE),
        ("minew_e6", MINEW_E6_SAMPLE),
        ("minew_s4_alarm", MINEW_S4_SAMPLE),
        ("ruuvi_raw_v1", RUUVI_V1_SAMPLE),
        ("ruuvi_raw_v2_f5", RUUVI_V2_SAMPLE),
    ];
}

/// Build a record for the given raw payload with fixed identity attributes.
pub fn record_with_payload(payload: &str) -> TagRecord {
    TagRecord {
        tag_id: "ac233fa29a16".to_string(),
        payload: payload.to_string(),
        payload_ts: 1653489451,
        signal_strength: -70.5,
        locator_id: "loc1".to_string(),
        locator_name: "front door".to_string(),
        decoded: None,
    }
}

/// Match and decode a payload against one format, panicking on any failure.
pub fn decode_with(format: PacketFormat, payload: &str) -> DecodedValues {
    let captures = format
        .captures(payload)
        .expect("payload must match the format's matcher");
    format.decode(&captures).expect("decode must succeed")
}
