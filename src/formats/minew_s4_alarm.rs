//! Minew S4 magnetic door open/closed sensor.
//!
//! Sample advertising data:
//! `0x02 0x01 0x06 0x12 0xff 0x39 0x06 0xa4 0x01 0x64 0x01 0x01 0x00 0xff
//!  0x06 0x77 0xaa 0x3f 0x23 0xac 0x3b 0x5a`

use crate::codec::{CodecError, unsigned_from_hex};
use crate::formats::LITTLE_ENDIAN_MAC;
use crate::registry::{DecodedValues, PacketFormat, Value};
use regex::Captures;

pub const NAME: &str = "minew_s4_alarm";

// Battery level, then three one-byte status flags (door magnet alarm,
// anti-disassembly alarm, trigger sign: 00 historical / 01 current), a fixed
// ff byte, the little-endian MAC tail and two trailing random bytes.
const PATTERN: &str = "02010612ff3906a401\
                       ([0-9a-f]{2})\
                       ([0-1]{2})\
                       ([0-1]{2})\
                       ([0-1]{2})\
                       ff\
                       ([0-9a-f]{12})\
                       [0-9a-f]{4}";

pub(crate) fn format() -> PacketFormat {
    PacketFormat::new(NAME, PATTERN, decode)
}

fn decode(captures: &Captures) -> Result<DecodedValues, CodecError> {
    let mut values = DecodedValues::new();
    values.insert(
        "battery_level".into(),
        Value::Integer(unsigned_from_hex(&captures[1])? as i64),
    );
    values.insert(
        "alarm_status".into(),
        Value::Integer(unsigned_from_hex(&captures[2])? as i64),
    );
    values.insert(
        "anti_tamper".into(),
        Value::Integer(unsigned_from_hex(&captures[3])? as i64),
    );
    values.insert(
        "history".into(),
        Value::Integer(unsigned_from_hex(&captures[4])? as i64),
    );
    values.insert(
        LITTLE_ENDIAN_MAC.into(),
        Value::Text(captures[5].to_string()),
    );
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::decode_with;

    #[test]
    fn test_all_triggered() {
        let values = decode_with(
            format(),
            "02010612ff3906a40164010101ff0677aa3f23ac3b5a",
        );
        assert_eq!(values["battery_level"], Value::Integer(100));
        assert_eq!(values["alarm_status"], Value::Integer(1));
        assert_eq!(values["anti_tamper"], Value::Integer(1));
        assert_eq!(values["history"], Value::Integer(1));
        assert_eq!(
            values["_little_endian_mac"],
            Value::Text("0677aa3f23ac".into())
        );
    }

    #[test]
    fn test_none_triggered() {
        let values = decode_with(
            format(),
            "02010612ff3906a40132000000ff0677aa3f23ac3b5a",
        );
        assert_eq!(values["battery_level"], Value::Integer(50));
        assert_eq!(values["alarm_status"], Value::Integer(0));
        assert_eq!(values["anti_tamper"], Value::Integer(0));
        assert_eq!(values["history"], Value::Integer(0));
    }

    #[test]
    fn test_status_flags_decode_independently() {
        let values = decode_with(
            format(),
            "02010612ff3906a40164010100ff0677aa3f23ac3b5a",
        );
        assert_eq!(values["alarm_status"], Value::Integer(1));
        assert_eq!(values["anti_tamper"], Value::Integer(1));
        assert_eq!(values["history"], Value::Integer(0));
    }

    #[test]
    fn test_rejects_nonbinary_status_byte() {
        assert!(!format().matches("02010612ff3906a40164640100ff0677aa3f23ac3b5a"));
    }
}
