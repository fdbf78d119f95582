//! Device metadata as seen by the classifier.

use std::collections::BTreeMap;
use std::io::BufRead;

use log::trace;

use crate::error::{ClassifyError, Result};

/// Read access to a device's string properties.
pub trait DeviceProperties {
    fn property_keys(&self) -> Vec<&str>;
    fn property(&self, key: &str) -> Option<&str>;
    fn name(&self) -> Option<&str>;
}

/// Properties held in memory, typically parsed from a udev property dump.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PropertyMap {
    properties: BTreeMap<String, String>,
    name: Option<String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Parse `KEY=VALUE` lines as printed by `udevadm info --query=property`.
    /// `E: KEY=VALUE` lines from plain `udevadm info` are accepted too; other
    /// `X: ` record lines, blank lines and `#` comments are skipped. `NAME`,
    /// then `ID_MODEL`, becomes the device name.
    pub fn parse(reader: impl BufRead) -> Result<Self> {
        let mut map = PropertyMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let record = match trimmed.split_once(": ") {
                Some(("E", rest)) => rest,
                Some((tag, _)) if tag.len() == 1 => {
                    trace!("Skipping udev record {:?}", trimmed);
                    continue;
                }
                _ => trimmed,
            };

            match record.split_once('=') {
                Some((key, value)) if !key.is_empty() => map.insert(key, value),
                _ => {
                    return Err(ClassifyError::MalformedProperty {
                        line_no: idx + 1,
                        line: line.clone(),
                    })
                }
            }
        }

        map.name = map
            .properties
            .get("NAME")
            .or_else(|| map.properties.get("ID_MODEL"))
            .cloned();
        Ok(map)
    }
}

impl DeviceProperties for PropertyMap {
    fn property_keys(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property_dump() {
        let dump = "\
DEVPATH=/devices/pci0000:00/0000:00:14.0/usb1/1-2/1-2:1.0
SUBSYSTEM=usb
# interface
TYPE=0/0/0

ID_MODEL=USB_Receiver
";
        let map = PropertyMap::parse(dump.as_bytes()).unwrap();
        assert_eq!(map.property("TYPE"), Some("0/0/0"));
        assert_eq!(map.property("SUBSYSTEM"), Some("usb"));
        assert_eq!(map.name(), Some("USB_Receiver"));
        assert_eq!(map.property_keys(), vec!["DEVPATH", "ID_MODEL", "SUBSYSTEM", "TYPE"]);
    }

    #[test]
    fn test_parse_udevadm_info_records() {
        let dump = "\
P: /devices/pci0000:00/0000:00:14.0/usb1/1-2/1-2:1.0
N: bus/usb/001/003
E: TYPE=3/1/2
E: NAME=Optical Mouse
";
        let map = PropertyMap::parse(dump.as_bytes()).unwrap();
        assert_eq!(map.property_keys(), vec!["NAME", "TYPE"]);
        assert_eq!(map.property("TYPE"), Some("3/1/2"));
        assert_eq!(map.name(), Some("Optical Mouse"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let map = PropertyMap::parse("MODALIAS=usb:v046Dp=C52B\n".as_bytes()).unwrap();
        assert_eq!(map.property("MODALIAS"), Some("usb:v046Dp=C52B"));
        assert_eq!(map.name(), None);
    }

    #[test]
    fn test_malformed_line() {
        let err = PropertyMap::parse("TYPE=3/1/2\nnot a property\n".as_bytes()).unwrap_err();
        match err {
            ClassifyError::MalformedProperty { line_no, line } => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "not a property");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(PropertyMap::parse("=3/1/2\n".as_bytes()).is_err());
    }
}
