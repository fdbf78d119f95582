use log::debug;
use serde::Serialize;

use crate::error::{ClassifyError, Result};
use crate::usb::classify::{ClassTable, Labels};
use crate::usb::properties::DeviceProperties;

/// Property holding `class/subclass/protocol` in decimal.
pub const TYPE_PROPERTY: &str = "TYPE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum LabelStyle {
    #[default]
    Short,
    Long,
}

/// A concrete (class, subclass, protocol) reported by a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsbType {
    pub class: u8,
    pub subclass: u8,
    pub protocol: u8,
}

impl UsbType {
    /// Parse a `TYPE` value such as `3/1/2`. Every field must be a decimal
    /// integer in 0..=255.
    pub fn parse(value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split('/').collect();
        if fields.len() != 3 {
            return Err(ClassifyError::TypeFieldCount {
                value: value.to_string(),
                found: fields.len(),
            });
        }

        let field = |idx: usize, name: &'static str| -> Result<u8> {
            let token = fields[idx].trim();
            token.parse::<u8>().map_err(|source| ClassifyError::InvalidTypeField {
                value: value.to_string(),
                field: name,
                token: token.to_string(),
                source,
            })
        };

        Ok(UsbType {
            class: field(0, "class")?,
            subclass: field(1, "subclass")?,
            protocol: field(2, "protocol")?,
        })
    }
}

/// Classification-facing view of one device.
pub struct UsbDevice<'a, D: DeviceProperties> {
    device: &'a D,
    table: &'a ClassTable,
}

impl<'a, D: DeviceProperties> UsbDevice<'a, D> {
    pub fn new(device: &'a D, table: &'a ClassTable) -> Self {
        UsbDevice { device, table }
    }

    /// The parsed `TYPE` property, or `None` when the device has none.
    pub fn usb_type(&self) -> Result<Option<UsbType>> {
        if !self.device.property_keys().contains(&TYPE_PROPERTY) {
            return Ok(None);
        }
        match self.device.property(TYPE_PROPERTY) {
            Some(value) => UsbType::parse(value).map(Some),
            None => Ok(None),
        }
    }

    pub fn labels(&self) -> Result<Option<&'a Labels>> {
        Ok(self
            .usb_type()?
            .map(|t| self.table.classify(t.class, t.subclass, t.protocol)))
    }

    /// Display label in the requested style. Devices without type information
    /// are labelled with their name, or the unknown-device label.
    pub fn label(&self, style: LabelStyle) -> Result<String> {
        match self.labels()? {
            Some(labels) => Ok(match style {
                LabelStyle::Short => labels.short.clone(),
                LabelStyle::Long => labels.long.clone(),
            }),
            None => {
                debug!("Device has no {} property, labelling by name", TYPE_PROPERTY);
                Ok(match self.device.name() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => self.table.unknown().short.clone(),
                })
            }
        }
    }

    pub fn nice_label(&self) -> Result<String> {
        self.label(LabelStyle::Short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::UNKNOWN_NAME;
    use crate::usb::classify::class_table;
    use crate::usb::properties::PropertyMap;

    fn device(usb_type: Option<&str>, name: Option<&str>) -> PropertyMap {
        let mut map = PropertyMap::new();
        if let Some(usb_type) = usb_type {
            map.insert(TYPE_PROPERTY, usb_type);
        }
        match name {
            Some(name) => map.with_name(name),
            None => map,
        }
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(
            UsbType::parse("3/1/2").unwrap(),
            UsbType { class: 3, subclass: 1, protocol: 2 }
        );
        assert_eq!(
            UsbType::parse("224/1/1").unwrap(),
            UsbType { class: 0xe0, subclass: 1, protocol: 1 }
        );
    }

    #[test]
    fn test_parse_type_field_count() {
        for value in ["", "3", "3/1", "3/1/2/4"] {
            match UsbType::parse(value) {
                Err(ClassifyError::TypeFieldCount { found, .. }) => {
                    assert_eq!(found, value.split('/').count())
                }
                other => panic!("{:?} gave {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_parse_type_rejects_bad_fields() {
        for (value, bad) in [("3/x/2", "subclass"), ("-1/0/0", "class"), ("3/1/256", "protocol"), ("3//2", "subclass")] {
            match UsbType::parse(value) {
                Err(ClassifyError::InvalidTypeField { field, .. }) => assert_eq!(field, bad),
                other => panic!("{:?} gave {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_nice_label_is_short() {
        let dev = device(Some("3/1/2"), Some("Optical Mouse"));
        let usb = UsbDevice::new(&dev, class_table());
        assert_eq!(usb.nice_label().unwrap(), "Mouse HID Device");
        assert_eq!(usb.label(LabelStyle::Long).unwrap(), "Mouse HID Device Interface (Boot)");
    }

    #[test]
    fn test_missing_type_uses_name() {
        let dev = device(None, Some("Optical Mouse"));
        let usb = UsbDevice::new(&dev, class_table());
        assert_eq!(usb.usb_type().unwrap(), None);
        assert_eq!(usb.nice_label().unwrap(), "Optical Mouse");
        assert_eq!(usb.label(LabelStyle::Long).unwrap(), "Optical Mouse");
    }

    #[test]
    fn test_missing_type_and_name() {
        let dev = device(None, None);
        let usb = UsbDevice::new(&dev, class_table());
        assert_eq!(usb.nice_label().unwrap(), UNKNOWN_NAME);

        let dev = device(None, Some(""));
        assert_eq!(UsbDevice::new(&dev, class_table()).nice_label().unwrap(), UNKNOWN_NAME);
    }

    #[test]
    fn test_malformed_type_is_an_error() {
        let dev = device(Some("3/1"), Some("Optical Mouse"));
        let usb = UsbDevice::new(&dev, class_table());
        assert!(matches!(usb.nice_label(), Err(ClassifyError::TypeFieldCount { .. })));
    }

    #[test]
    fn test_unknown_class_label() {
        let dev = device(Some("255/255/255"), Some("Vendor Gadget"));
        let usb = UsbDevice::new(&dev, class_table());
        assert_eq!(usb.nice_label().unwrap(), UNKNOWN_NAME);
    }

    #[test]
    fn test_label_style_from_str() {
        assert_eq!("long".parse::<LabelStyle>().unwrap(), LabelStyle::Long);
        assert_eq!(LabelStyle::Short.to_string(), "short");
        assert!("medium".parse::<LabelStyle>().is_err());
    }
}
