//! Ruuvi RAWv1 (data format 3) environment and acceleration broadcast.
//!
//! Sample advertising data: `02010611ff9904037e052fc840ffd2fffa04060b65`
//!
//! Layout reference:
//! <https://github.com/ruuvi/ruuvi-sensor-protocols/blob/master/dataformat_03.md>

use crate::codec::{
    CodecError, twos_complement_signed, unsigned_from_hex, vendor_signed_fixed_point,
};
use crate::registry::{DecodedValues, PacketFormat, Value};
use regex::Captures;

pub const NAME: &str = "ruuvi_raw_v1";

// Manufacturer data for Ruuvi (company ID 0x0499, little endian on the
// wire) with format byte 03: humidity in half-percent steps, temperature as
// a sign+magnitude integer byte plus a /100 fraction byte, pressure offset
// by +50000 Pa, three MSB-first acceleration axes in milli-g, battery in
// millivolts.
const PATTERN: &str = "0201[0-9a-f]{2}[0-9a-f]{2}ff990403\
                       ([0-9a-f]{2})\
                       ([0-9a-f]{2})\
                       ([0-9a-f]{2})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})";

pub(crate) fn format() -> PacketFormat {
    PacketFormat::new(NAME, PATTERN, decode)
}

fn decode(captures: &Captures) -> Result<DecodedValues, CodecError> {
    let mut values = DecodedValues::new();
    values.insert(
        "humidity".into(),
        Value::Float(unsigned_from_hex(&captures[1])? as f64 * 0.5),
    );
    values.insert(
        "temperature".into(),
        Value::Float(vendor_signed_fixed_point(&captures[2], &captures[3], 8)?),
    );
    values.insert(
        "pressure".into(),
        Value::Integer(unsigned_from_hex(&captures[4])? as i64 + 50000),
    );
    values.insert(
        "acceleration_x".into(),
        Value::Integer(twos_complement_signed(&captures[5], 16)?),
    );
    values.insert(
        "acceleration_y".into(),
        Value::Integer(twos_complement_signed(&captures[6], 16)?),
    );
    values.insert(
        "acceleration_z".into(),
        Value::Integer(twos_complement_signed(&captures[7], 16)?),
    );
    values.insert(
        "battery".into(),
        Value::Float(unsigned_from_hex(&captures[8])? as f64 * 0.001),
    );
    Ok(values)
}
