//! Bitfield conversions for raw advertising payload bytes.
//!
//! Sensor tag payloads encode values in a handful of fixed-point and signed
//! integer conventions. These helpers convert the hex substrings captured by a
//! packet format matcher into engineering-unit numbers. All of them are pure
//! and validate their input; a valid-but-extreme bit pattern (e.g. all ones)
//! is a legitimate value, never an error.

use thiserror::Error;

/// Error for hex input that cannot be interpreted by a codec operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input contains non-hex characters or has the wrong length for the
    /// requested conversion.
    #[error("malformed hex input {input:?}: {reason}")]
    MalformedHexInput { input: String, reason: String },
}

impl CodecError {
    fn malformed(input: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedHexInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

fn check_hex(hex: &str) -> Result<(), CodecError> {
    if hex.is_empty() {
        return Err(CodecError::malformed(hex, "empty string"));
    }
    if hex.len() > 16 {
        return Err(CodecError::malformed(hex, "wider than 64 bits"));
    }
    if let Some(bad) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(CodecError::malformed(hex, format!("invalid digit {bad:?}")));
    }
    Ok(())
}

/// Parse hex digits as a non-negative base-16 integer.
pub fn unsigned_from_hex(hex: &str) -> Result<u64, CodecError> {
    check_hex(hex)?;
    u64::from_str_radix(hex, 16).map_err(|e| CodecError::malformed(hex, e.to_string()))
}

/// Parse hex digits as a two's-complement signed integer of `bits` width.
///
/// `bits` must cover the bit length implied by the hex string; a string wider
/// than the requested width is rejected rather than silently truncated.
pub fn twos_complement_signed(hex: &str, bits: u32) -> Result<i64, CodecError> {
    if bits == 0 || bits > 63 {
        return Err(CodecError::malformed(hex, format!("unsupported bit width {bits}")));
    }
    let value = unsigned_from_hex(hex)?;
    if hex.len() as u32 * 4 > bits {
        return Err(CodecError::malformed(
            hex,
            format!("value wider than {bits} bits"),
        ));
    }
    if value & (1 << (bits - 1)) != 0 {
        Ok((value as i128 - (1i128 << bits)) as i64)
    } else {
        Ok(value as i64)
    }
}

/// Convert two hex bytes in BLE-SIG 8.8 fixed-point notation to a float.
///
/// `"1147"` is 0x11 + 0x47/256 = 17.28 (rounded).
pub fn fixed_point_8_8(hex: &str) -> Result<f64, CodecError> {
    if hex.len() != 4 {
        return Err(CodecError::malformed(hex, "expected exactly 4 hex digits"));
    }
    let integer = unsigned_from_hex(&hex[..2])?;
    let fraction = unsigned_from_hex(&hex[2..])?;
    Ok(integer as f64 + fraction as f64 / 256.0)
}

/// Convert a sign+magnitude byte pair in Ruuvi's fixed-point notation.
///
/// Differs from standard 8.8 in that the fractional divisor is 100, not 256,
/// and the high bit of `msb` is a sign flag rather than part of a two's
/// complement value: `msb="80", lsb="01"` is -0.01, not -127.99.
pub fn vendor_signed_fixed_point(msb: &str, lsb: &str, bits: u32) -> Result<f64, CodecError> {
    if bits == 0 || bits > 63 {
        return Err(CodecError::malformed(msb, format!("unsupported bit width {bits}")));
    }
    let mut integer = unsigned_from_hex(msb)?;
    if msb.len() as u32 * 4 > bits {
        return Err(CodecError::malformed(
            msb,
            format!("value wider than {bits} bits"),
        ));
    }
    let fraction = unsigned_from_hex(lsb)? as f64 / 100.0;

    let sign_bit = 1u64 << (bits - 1);
    if integer & sign_bit != 0 {
        integer &= !sign_bit;
        Ok(-(integer as f64 + fraction))
    } else {
        Ok(integer as f64 + fraction)
    }
}
