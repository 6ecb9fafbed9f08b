//! Ruuvi RAWv2 (data format 5) environment and acceleration broadcast.
//!
//! Sample advertising data:
//! `0201061bff99040513c948ebc2180028ffd003f8aa16399f44f0a7f689bb59`
//!
//! Layout reference:
//! <https://github.com/ruuvi/ruuvi-sensor-protocols/blob/master/dataformat_05.md>

use crate::codec::{CodecError, twos_complement_signed, unsigned_from_hex};
use crate::registry::{DecodedValues, PacketFormat, Value};
use regex::Captures;

pub const NAME: &str = "ruuvi_raw_v2_f5";

// Format byte 05: temperature in 0.005 degree steps (two's complement),
// humidity in 0.0025% steps, pressure offset by +50000 Pa, three MSB-first
// acceleration axes in milli-g, a power word packing battery voltage and TX
// power, movement counter, measurement sequence number and the MAC tail.
const PATTERN: &str = "0201[0-9a-f]{2}[0-9a-f]{2}ff990405\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{2})\
                       ([0-9a-f]{4})\
                       ([0-9a-f]{12})";

pub(crate) fn format() -> PacketFormat {
    PacketFormat::new(NAME, PATTERN, decode)
}

fn decode(captures: &Captures) -> Result<DecodedValues, CodecError> {
    let mut values = DecodedValues::new();
    values.insert(
        "temperature".into(),
        Value::Float(twos_complement_signed(&captures[1], 16)? as f64 * 0.005),
    );
    values.insert(
        "humidity".into(),
        Value::Float(unsigned_from_hex(&captures[2])? as f64 * 0.0025),
    );
    values.insert(
        "pressure".into(),
        Value::Integer(unsigned_from_hex(&captures[3])? as i64 + 50000),
    );
    values.insert(
        "acceleration_x".into(),
        Value::Integer(twos_complement_signed(&captures[4], 16)?),
    );
    values.insert(
        "acceleration_y".into(),
        Value::Integer(twos_complement_signed(&captures[5], 16)?),
    );
    values.insert(
        "acceleration_z".into(),
        Value::Integer(twos_complement_signed(&captures[6], 16)?),
    );

    // The power word packs two physically distinct quantities: the top 11
    // bits are battery millivolts above 1.6 V, the low 5 bits are TX power
    // from -40 to +20 dBm in 2 dBm steps.
    let power = unsigned_from_hex(&captures[7])?;
    values.insert(
        "battery".into(),
        Value::Float((power >> 5) as f64 * 0.001 + 1.6),
    );
    values.insert(
        "tx_power".into(),
        Value::Integer((power & 0x1f) as i64 * 2 - 40),
    );

    values.insert(
        "movement_counter".into(),
        Value::Integer(unsigned_from_hex(&captures[8])? as i64),
    );
    values.insert(
        "measurement_sequence_number".into(),
        Value::Integer(unsigned_from_hex(&captures[9])? as i64),
    );
    Ok(values)
}
