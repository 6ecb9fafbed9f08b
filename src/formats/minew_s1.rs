//! Minew S1 temperature and humidity sensor.
//!
//! Sample advertising data:
//! `0x02 0x01 0x06 0x03 0x03 0xe1 0xff 0x10 0x16 0xe1 0xff 0xa1 0x01 0x64
//!  0x1a 0xfd 0x2f 0x94 0x31 0x82 0xab 0x3f 0x23 0xac`

use crate::codec::{CodecError, fixed_point_8_8, unsigned_from_hex};
use crate::formats::LITTLE_ENDIAN_MAC;
use crate::registry::{DecodedValues, PacketFormat, Value};
use regex::Captures;

pub const NAME: &str = "minew_s1";

// Service data preamble for Minew frame a1, version 01, then:
// battery level (percent), temperature and humidity in 8.8 fixed point,
// little-endian MAC tail.
const PATTERN: &str = "0201060303e1ff[0-9a-f]{2}16e1ffa101\
                       ([0-9a-f]{2})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{12})";

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
        "temperature".into(),
        Value::Float(fixed_point_8_8(&captures[2])?),
    );
    values.insert(
        "humidity".into(),
        Value::Float(fixed_point_8_8(&captures[3])?),
    );
    values.insert(
        LITTLE_ENDIAN_MAC.into(),
        Value::Text(captures[4].to_string()),
    );
    Ok(values)
}
