//! Device type hints for tags whose format should not be auto-detected.
//!
//! A hint pins a tag id to a packet format name, bypassing the structural
//! scan of the registry. Useful when a device family's payload is ambiguous
//! or when misdetection must be ruled out for a known deployment.

use std::collections::BTreeMap;

/// Tag id to packet format name mapping.
pub type DeviceTypeMap = BTreeMap<String, String>;

/// A parsed hint pairing a tag id with a registered packet format name.
#[derive(Debug, Clone)]
pub struct DeviceTypeHint {
    pub tag_id: String,
    pub format_name: String,
}

/// Parse a hint from a string in the format "TAGID=FORMAT".
///
/// # Example
/// ```
/// use sensortag_monitor::device_type::parse_device_type;
///
/// let hint = parse_device_type("ac233fa29a16=minew_e6").unwrap();
/// assert_eq!(hint.tag_id, "ac233fa29a16");
/// assert_eq!(hint.format_name, "minew_e6");
/// ```
pub fn parse_device_type(src: &str) -> Result<DeviceTypeHint, String> {
    src.split_once('=')
        .map(|(tag_id, format_name)| DeviceTypeHint {
            tag_id: tag_id.into(),
            format_name: format_name.into(),
        })
        .ok_or_else(|| "invalid device type: expected format TAGID=FORMAT".into())
}

/// Collect parsed hints into a lookup map.
pub fn to_map(hints: &[DeviceTypeHint]) -> DeviceTypeMap {
    hints
        .iter()
        .map(|h| (h.tag_id.clone(), h.format_name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_type_valid() {
        let hint = parse_device_type("ac233fa29a16=minew_e6").unwrap();
        assert_eq!(hint.tag_id, "ac233fa29a16");
        assert_eq!(hint.format_name, "minew_e6");
    }

    #[test]
    fn test_parse_device_type_invalid() {
        assert!(parse_device_type("no-equals-sign").is_err());
    }

    #[test]
    fn test_to_map() {
        let hints = vec![
            DeviceTypeHint {
                tag_id: "ac233fa29a16".to_string(),
                format_name: "minew_e6".to_string(),
            },
            DeviceTypeHint {
                tag_id: "ac233fab8231".to_string(),
                format_name: "minew_s1".to_string(),
            },
        ];
        let map = to_map(&hints);
        assert_eq!(map.get("ac233fa29a16"), Some(&"minew_e6".to_string()));
        assert_eq!(map.get("ac233fab8231"), Some(&"minew_s1".to_string()));
        assert_eq!(map.get("000000000000"), None);
    }
}
