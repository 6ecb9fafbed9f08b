//! Projection of decoded tag records into storage-ready measurements.
//!
//! A [`Measurement`] is the shape the time-series writer consumes: a group
//! (series) name, string tags, and typed fields. Projection walks an explicit
//! attribute schema rather than any kind of reflective field discovery, so
//! the partition of every attribute is visible in one place.

use crate::registry::Value;
use crate::tag::TagRecord;
use std::collections::BTreeMap;

/// Group used when a record has no decoded packet format and no override.
pub const DEFAULT_GROUP: &str = "GatewayTags";

/// Attribute names carrying the record identity, in schema order.
pub const TAG_ID: &str = "tagId";
pub const ADVERTISING_PAYLOAD: &str = "advertisingDataPayload";
pub const PAYLOAD_TS: &str = "advertisingDataPayloadTS";
pub const SIGNAL_STRENGTH: &str = "advertisingDataPayloadSignalStrength";
pub const LOCATOR_ID: &str = "advertisingDataPayloadLocatorId";
pub const LOCATOR_NAME: &str = "advertisingDataPayloadLocatorName";

/// Attributes excluded from every projection: raw payload bytes and the
/// observation metadata that would bloat the series without being queryable
/// measurements.
const ALWAYS_EXCLUDED: [&str; 4] = [
    ADVERTISING_PAYLOAD,
    PAYLOAD_TS,
    SIGNAL_STRENGTH,
    LOCATOR_NAME,
];

/// A storage-ready data point.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Grouping key (the series/measurement name).
    pub group: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, Value>,
}

impl Measurement {
    /// Project a tag record into a measurement.
    ///
    /// Attributes are partitioned: names in `tag_keys` become tags, names in
    /// `exclude_keys`, the always-excluded set, names starting with the
    /// internal marker, or the group key itself are dropped, and everything
    /// else becomes a field. Internal-marker names are dropped even when
    /// explicitly requested as tags.
    ///
    /// The group is `group_override` when given, else the packet format name
    /// of a successful decode, else [`DEFAULT_GROUP`].
    pub fn project(
        record: &TagRecord,
        group_override: Option<&str>,
        tag_keys: &[&str],
        exclude_keys: &[&str],
    ) -> Measurement {
        let group = group_override
            .map(str::to_string)
            .or_else(|| record.decoded.as_ref().map(|d| d.format_name.clone()))
            .unwrap_or_else(|| DEFAULT_GROUP.to_string());

        let mut tags = BTreeMap::new();
        let mut fields = BTreeMap::new();

        for (name, value) in attributes(record) {
            if name.starts_with(crate::formats::INTERNAL_MARKER)
                || ALWAYS_EXCLUDED.contains(&name.as_str())
                || exclude_keys.contains(&name.as_str())
                || name == group
            {
                continue;
            }
            if tag_keys.contains(&name.as_str()) {
                tags.insert(name, value.to_plain_string());
            } else {
                fields.insert(name, value);
            }
        }

        Measurement {
            group,
            tags,
            fields,
        }
    }
}

/// The record's full attribute set: identity and raw observation attributes
/// under their wire names, then the decoded values.
fn attributes(record: &TagRecord) -> Vec<(String, Value)> {
    let mut attrs = vec![
        (TAG_ID.to_string(), Value::Text(record.tag_id.clone())),
        (
            ADVERTISING_PAYLOAD.to_string(),
            Value::Text(record.payload.clone()),
        ),
        (PAYLOAD_TS.to_string(), Value::Integer(record.payload_ts)),
        (
            SIGNAL_STRENGTH.to_string(),
            Value::Float(record.signal_strength),
        ),
        (
            LOCATOR_ID.to_string(),
            Value::Text(record.locator_id.clone()),
        ),
        (
            LOCATOR_NAME.to_string(),
            Value::Text(record.locator_name.clone()),
        ),
    ];

    if let Some(decoded) = &record.decoded {
        attrs.extend(
            decoded
                .values
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FormatRegistry;
    use crate::test_utils::{payloads, record_with_payload};

    fn decoded_record() -> TagRecord {
        let registry = FormatRegistry::new();
        let mut record = record_with_payload(payloads::MINEW_S1_RAW);
        assert!(record.decode(&registry, None, None));
        record
    }

    #[test]
    fn test_group_defaults_to_format_name() {
        let measurement = Measurement::project(&decoded_record(), None, &[], &[]);
        assert_eq!(measurement.group, "minew_s1");
    }

    #[test]
    fn test_group_override_wins() {
        let measurement =
            Measurement::project(&decoded_record(), Some("door_sensors"), &[], &[]);
        assert_eq!(measurement.group, "door_sensors");
    }

    #[test]
    fn test_unparsed_record_falls_back_to_default_group() {
        let record = record_with_payload("0xde 0xad");
        let measurement = Measurement::project(&record, None, &[], &[]);
        assert_eq!(measurement.group, DEFAULT_GROUP);
        // No decoded values: only identity attributes survive as fields.
        assert!(measurement.fields.contains_key(TAG_ID));
        assert!(!measurement.fields.contains_key("temperature"));
    }

    #[test]
    fn test_tag_keys_and_fields_partition_attributes() {
        let measurement = Measurement::project(
            &decoded_record(),
            None,
            &[TAG_ID, LOCATOR_ID],
            &[],
        );

        assert_eq!(measurement.tags["tagId"], "ac233fa29a16");
        assert_eq!(measurement.tags["advertisingDataPayloadLocatorId"], "loc1");
        assert!(!measurement.fields.contains_key(TAG_ID));
        assert!(!measurement.fields.contains_key(LOCATOR_ID));
        assert!(measurement.fields.contains_key("temperature"));
        assert!(measurement.fields.contains_key("humidity"));
        assert!(measurement.fields.contains_key("battery_level"));

        for key in measurement.tags.keys() {
            assert!(!measurement.fields.contains_key(key), "{key} in both sets");
        }
    }

    #[test]
    fn test_raw_observation_attributes_are_always_excluded() {
        let measurement = Measurement::project(&decoded_record(), None, &[], &[]);
        assert!(!measurement.fields.contains_key(ADVERTISING_PAYLOAD));
        assert!(!measurement.fields.contains_key(PAYLOAD_TS));
        assert!(!measurement.fields.contains_key(SIGNAL_STRENGTH));
        assert!(!measurement.fields.contains_key(LOCATOR_NAME));
    }

    #[test]
    fn test_internal_marker_fields_never_published() {
        // Even when explicitly requested as a tag key.
        let measurement = Measurement::project(
            &decoded_record(),
            None,
            &["_little_endian_mac"],
            &[],
        );
        assert!(!measurement.tags.contains_key("_little_endian_mac"));
        assert!(!measurement.fields.contains_key("_little_endian_mac"));
    }

    #[test]
    fn test_caller_excluded_keys_are_dropped() {
        let measurement =
            Measurement::project(&decoded_record(), None, &[], &["battery_level"]);
        assert!(!measurement.fields.contains_key("battery_level"));
        assert!(measurement.fields.contains_key("temperature"));
    }

    #[test]
    fn test_group_key_never_appears_as_field() {
        let measurement = Measurement::project(&decoded_record(), Some(TAG_ID), &[], &[]);
        assert_eq!(measurement.group, TAG_ID);
        assert!(!measurement.fields.contains_key(TAG_ID));
    }
}
