//! InfluxDB line protocol output formatter.

use crate::measurement::Measurement;
use crate::output::OutputFormatter;
use crate::registry::Value;
use std::fmt;
use std::fmt::Write;

/// Wrapper rendering a decoded value with line protocol field syntax:
/// floats bare, integers with an `i` suffix, booleans as keywords, strings
/// quoted.
struct FieldValue<'a>(&'a Value);

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Value::Float(num) => write!(f, "{num}"),
            Value::Integer(num) => write!(f, "{num}i"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Formats measurements according to the InfluxDB line protocol. Tag and
/// field sets are BTreeMaps, so output ordering is stable.
#[derive(Debug, Default, Clone)]
pub struct InfluxDbFormatter {
    /// When set, replaces the measurement's own group as the series name.
    group_override: Option<String>,
}

impl InfluxDbFormatter {
    pub fn new(group_override: Option<String>) -> Self {
        Self { group_override }
    }
}

impl OutputFormatter for InfluxDbFormatter {
    fn format(&self, measurement: &Measurement) -> String {
        let group = self
            .group_override
            .as_deref()
            .unwrap_or(&measurement.group);
        let mut line = String::with_capacity(128);
        line.push_str(group);

        for (key, value) in &measurement.tags {
            let _ = write!(line, ",{key}={value}");
        }

        let mut separator = ' ';
        for (key, value) in &measurement.fields {
            let _ = write!(line, "{separator}{key}={}", FieldValue(value));
            separator = ',';
        }

        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn measurement() -> Measurement {
        let mut tags = BTreeMap::new();
        tags.insert("tagId".to_string(), "ac233fa29a16".to_string());

        let mut fields = BTreeMap::new();
        fields.insert("temperature".to_string(), Value::Float(10.1875));
        fields.insert("battery_level".to_string(), Value::Integer(100));
        fields.insert("present".to_string(), Value::Bool(true));

        Measurement {
            group: "minew_s1".to_string(),
            tags,
            fields,
        }
    }

    #[test]
    fn test_line_protocol_shape() {
        let formatter = InfluxDbFormatter::new(None);
        assert_eq!(
            formatter.format(&measurement()),
            "minew_s1,tagId=ac233fa29a16 battery_level=100i,present=true,temperature=10.1875"
        );
    }

    #[test]
    fn test_group_override() {
        let formatter = InfluxDbFormatter::new(Some("sensors".to_string()));
        assert!(formatter.format(&measurement()).starts_with("sensors,"));
    }

    #[test]
    fn test_text_fields_are_quoted() {
        let mut m = measurement();
        m.tags.clear();
        m.fields.clear();
        m.fields
            .insert("note".to_string(), Value::Text("string,value".to_string()));

        let formatter = InfluxDbFormatter::new(None);
        assert_eq!(formatter.format(&m), "minew_s1 note=\"string,value\"");
    }

    #[test]
    fn test_no_tags_no_leading_comma() {
        let mut m = measurement();
        m.tags.clear();
        let formatter = InfluxDbFormatter::new(None);
        assert!(formatter.format(&m).starts_with("minew_s1 "));
    }
}
