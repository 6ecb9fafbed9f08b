//! Packet format descriptors and the registry that resolves them.
//!
//! Every supported device family is described by a [`PacketFormat`]: an
//! anchored byte-pattern matcher over the normalized (lowercase, contiguous)
//! hex payload paired with a pure decode function. The registry is a fixed,
//! ordered table built once at startup; the table and its descriptors are
//! never mutated per observation, so shared references are safe to use from
//! any number of decoding tasks.

use crate::codec::CodecError;
use crate::formats;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// A decoded engineering-unit value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f64),
    Integer(i64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Render the value as a plain string, e.g. for use as a tag value.
    pub fn to_plain_string(&self) -> String {
        match self {
            Value::Float(v) => v.to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Text(v) => v.clone(),
        }
    }
}

/// Named values produced by one successful decode.
pub type DecodedValues = BTreeMap<String, Value>;

/// Decode function over the capture groups of a matched payload.
///
/// The matcher fully determines the capture group count, so implementations
/// index groups directly; a mismatch is a descriptor bug caught by that
/// descriptor's tests, not a runtime condition.
pub type DecodeFn = fn(&Captures) -> Result<DecodedValues, CodecError>;

/// One known binary advertising layout: an anchored matcher plus its decoder.
pub struct PacketFormat {
    name: &'static str,
    matcher: Regex,
    decode: DecodeFn,
}

impl PacketFormat {
    /// Build a descriptor from a pattern of fixed hex literals and
    /// fixed-width capture groups. The pattern is anchored to the start of
    /// the payload.
    ///
    /// Patterns are static string literals; a pattern that does not compile
    /// is a defect in the format table itself.
    pub(crate) fn new(name: &'static str, pattern: &str, decode: DecodeFn) -> Self {
        let anchored = format!("^{pattern}");
        let matcher = Regex::new(&anchored).expect("packet format pattern must compile");
        PacketFormat {
            name,
            matcher,
            decode,
        }
    }

    /// Unique format name, used as provenance tag on decoded output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Structural check without decoding.
    pub fn matches(&self, payload: &str) -> bool {
        self.matcher.is_match(payload)
    }

    /// Apply the matcher and return its capture groups, if the payload has
    /// this format's layout.
    pub fn captures<'p>(&self, payload: &'p str) -> Option<Captures<'p>> {
        self.matcher.captures(payload)
    }

    /// Run the decode function on capture groups produced by this matcher.
    pub fn decode(&self, captures: &Captures) -> Result<DecodedValues, CodecError> {
        (self.decode)(captures)
    }
}

impl std::fmt::Debug for PacketFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketFormat")
            .field("name", &self.name)
            .field("matcher", &self.matcher.as_str())
            .finish()
    }
}

/// The fixed, ordered collection of supported packet formats.
#[derive(Debug)]
pub struct FormatRegistry {
    formats: Vec<PacketFormat>,
}

impl FormatRegistry {
    /// Build the registry with all built-in formats in registration order.
    pub fn new() -> Self {
        FormatRegistry {
            formats: formats::builtin_formats(),
        }
    }

    /// Look up a format by exact name.
    pub fn get(&self, name: &str) -> Option<&PacketFormat> {
        self.formats.iter().find(|f| f.name == name)
    }

    /// All registered formats, in registration order.
    pub fn formats(&self) -> &[PacketFormat] {
        &self.formats
    }

    /// Select the format applicable to a payload.
    ///
    /// With a device type hint the lookup is by exact name; an unknown name
    /// is a configuration problem worth a warning but resolution simply
    /// fails. Without a hint, the first matcher in registration order to
    /// structurally accept the payload wins. `None` is an expected outcome
    /// for unrecognized devices or noise payloads.
    pub fn resolve(
        &self,
        tag_id: &str,
        payload: &str,
        device_type: Option<&str>,
    ) -> Option<&PacketFormat> {
        if let Some(name) = device_type {
            let format = self.get(name);
            if format.is_none() {
                log::warn!(
                    "device type {name:?} was specified for tag {tag_id} \
                     but no such packet format is registered"
                );
            }
            return format;
        }

        self.formats.iter().find(|f| f.matches(payload))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
