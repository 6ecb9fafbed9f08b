//! Minew E6 light sensor. Reports 00 for dark and 01 for light.
//!
//! Sample advertising data:
//! `0x02 0x01 0x06 0x03 0x03 0xe1 0xff 0x0d 0x16 0xe1 0xff 0xa1 0x02 0x64
//!  0x00 0x16 0x9a 0xa2 0x3f 0x23 0xac`

use crate::codec::{CodecError, unsigned_from_hex};
use crate::formats::LITTLE_ENDIAN_MAC;
use crate::registry::{DecodedValues, PacketFormat, Value};
use regex::Captures;

pub const NAME: &str = "minew_e6";

// Frame a1 version 02, battery always reported as 0x64, then the detected
// light value and the little-endian MAC tail.
const PATTERN: &str = "0201060303e1ff[0-9a-f]{2}16e1ffa10264\
                       ([0-1]{2})\
                       ([0-9a-f]{12})";

pub(crate) fn format() -> PacketFormat {
    PacketFormat::new(NAME, PATTERN, decode)
}

fn decode(captures: &Captures) -> Result<DecodedValues, CodecError> {
    let mut values = DecodedValues::new();
    values.insert(
        "light_sensor_value".into(),
        Value::Integer(unsigned_from_hex(&captures[1])? as i64),
    );
    values.insert(
        LITTLE_ENDIAN_MAC.into(),
        Value::Text(captures[2].to_string()),
    );
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::decode_with;

    #[test]
    fn test_light_detected() {
        let values = decode_with(format(), "0201060303e1ff0d16e1ffa1026401169aa23f23ac");
        assert_eq!(values["light_sensor_value"], Value::Integer(1));
        assert_eq!(
            values["_little_endian_mac"],
            Value::Text("169aa23f23ac".into())
        );
    }

    #[test]
    fn test_dark() {
        let values = decode_with(format(), "0201060303e1ff0d16e1ffa1026400169aa23f23ac");
        assert_eq!(values["light_sensor_value"], Value::Integer(0));
    }

    #[test]
    fn test_rejects_s1_payload() {
        // Same service preamble but frame version 01.
        assert!(!format().matches("0201060303e1ff1016e1ffa101640a304c593182ab3f23ac"));
    }
}
