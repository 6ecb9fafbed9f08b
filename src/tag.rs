//! Tag records as reported by the locating engine.
//!
//! A [`TagRecord`] represents one BLE tag for one poll cycle: identity and
//! raw-observation attributes straight from the engine JSON, plus an optional
//! decoded payload that is populated atomically by [`TagRecord::decode`].
//! Records do not persist across poll cycles.

use crate::registry::{DecodedValues, FormatRegistry, PacketFormat};
use serde::Deserialize;

/// Wire-level tag observation from the `getTagData` endpoint.
///
/// The engine reports every tracked tag; tags without captured advertising
/// data carry a null payload and are excluded before reaching the decode
/// pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct TagObservation {
    #[serde(rename = "tagId")]
    pub tag_id: String,
    #[serde(rename = "advertisingDataPayload")]
    pub payload: Option<String>,
    #[serde(rename = "advertisingDataPayloadTS", default)]
    pub payload_ts: i64,
    #[serde(rename = "advertisingDataPayloadSignalStrength", default)]
    pub signal_strength: f64,
    #[serde(rename = "advertisingDataPayloadLocatorId", default)]
    pub locator_id: String,
    #[serde(rename = "advertisingDataPayloadLocatorName", default)]
    pub locator_name: String,
}

impl TagObservation {
    /// Promote the observation to a [`TagRecord`], or `None` when no
    /// advertising data was captured for the tag.
    pub fn into_record(self) -> Option<TagRecord> {
        Some(TagRecord {
            tag_id: self.tag_id,
            payload: self.payload?,
            payload_ts: self.payload_ts,
            signal_strength: self.signal_strength,
            locator_id: self.locator_id,
            locator_name: self.locator_name,
            decoded: None,
        })
    }
}

/// The values produced by one successful decode, together with the name of
/// the packet format that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedPayload {
    pub format_name: String,
    pub values: DecodedValues,
}

/// One observed BLE tag with captured advertising data.
#[derive(Debug, Clone)]
pub struct TagRecord {
    /// Stable device identifier.
    pub tag_id: String,
    /// Advertising payload as received, e.g. `"0x02 0x01 0x06 ..."`.
    pub payload: String,
    /// Engine timestamp of the observation, milliseconds.
    pub payload_ts: i64,
    /// Received signal strength at the reporting locator.
    pub signal_strength: f64,
    pub locator_id: String,
    pub locator_name: String,
    /// Present only after a successful [`TagRecord::decode`]. A record with
    /// no decode attempt, or a failed one, is "unparsed" downstream.
    pub decoded: Option<DecodedPayload>,
}

impl TagRecord {
    /// The advertising payload as a single contiguous lowercase hex string,
    /// with per-byte `0x` prefixes and delimiters stripped.
    pub fn normalized_payload(&self) -> String {
        self.payload
            .split_whitespace()
            .map(|byte| byte.trim_start_matches("0x"))
            .collect::<String>()
            .to_lowercase()
    }

    /// Attempt to decode the advertising payload.
    ///
    /// Resolution goes through `format_override` when given, otherwise the
    /// registry (with the optional device type hint). Returns `false` when
    /// no format applies or the captured bytes do not convert; either way a
    /// failed attempt leaves the record unchanged. "Simply didn't match" is
    /// an expected outcome and never an error.
    pub fn decode(
        &mut self,
        registry: &FormatRegistry,
        device_type: Option<&str>,
        format_override: Option<&PacketFormat>,
    ) -> bool {
        let payload = self.normalized_payload();

        let format = match format_override {
            Some(format) => format,
            None => match registry.resolve(&self.tag_id, &payload, device_type) {
                Some(format) => format,
                None => return false,
            },
        };

        let Some(captures) = format.captures(&payload) else {
            return false;
        };

        match format.decode(&captures) {
            Ok(values) => {
                self.decoded = Some(DecodedPayload {
                    format_name: format.name().to_string(),
                    values,
                });
                true
            }
            Err(error) => {
                log::warn!(
                    "payload for tag {} matched {} but failed to convert: {error}",
                    self.tag_id,
                    format.name()
                );
                false
            }
        }
    }
}
