// USB class code names
// Based on the USB-IF defined class codes, adapted from gnome-device-manager

use std::fmt;

use serde::Serialize;

/// A (class, subclass, protocol) key. `None` matches any value of that field
/// and can never equal a real code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassCode {
    pub class: u8,
    pub subclass: Option<u8>,
    pub protocol: Option<u8>,
}

impl ClassCode {
    pub const fn new(class: u8, subclass: Option<u8>, protocol: Option<u8>) -> Self {
        ClassCode { class, subclass, protocol }
    }

    /// A key with no wildcards.
    pub const fn exact(class: u8, subclass: u8, protocol: u8) -> Self {
        Self::new(class, Some(subclass), Some(protocol))
    }

    pub fn is_exact(&self) -> bool {
        self.subclass.is_some() && self.protocol.is_some()
    }
}

// Wildcards print as -1, the registry notation
impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field(f: &mut fmt::Formatter<'_>, code: Option<u8>) -> fmt::Result {
            match code {
                Some(code) => write!(f, "0x{:02x}", code),
                None => write!(f, "  -1"),
            }
        }
        write!(f, "(0x{:02x}, ", self.class)?;
        field(f, self.subclass)?;
        write!(f, ", ")?;
        field(f, self.protocol)?;
        write!(f, ")")
    }
}

/// One authored row: key, short label msgid, long label msgid.
pub type ClassRow = (ClassCode, &'static str, &'static str);

const ANY: Option<u8> = None;

const fn row(
    class: u8,
    subclass: Option<u8>,
    protocol: Option<u8>,
    short: &'static str,
    long: &'static str,
) -> ClassRow {
    (ClassCode::new(class, subclass, protocol), short, long)
}

pub const UNKNOWN_NAME: &str = "Unknown USB Device";

pub static USB_CLASS_NAMES: &[ClassRow] = &[
    // Audio
    row(0x01, ANY, ANY, "Audio", "Audio"),
    row(0x01, Some(0x01), ANY, "Audio Control", "Audio Control"),
    row(0x01, Some(0x02), ANY, "Audio Streaming", "Audio Streaming"),
    row(0x01, Some(0x03), ANY, "Audio MIDI Streaming", "Audio MIDI Streaming"),

    // Communications and CDC control
    row(0x02, ANY, ANY, "Communications", "Communications"),
    row(0x02, Some(0x01), ANY, "Direct Line", "Direct Line Communications"),
    row(0x02, Some(0x02), ANY, "Modem", "Modem Communications"),
    row(0x02, Some(0x02), Some(0x01), "Modem (AT v.25ter)", "Modem (AT v.25ter) Communications"),
    row(0x02, Some(0x02), Some(0x02), "Modem (PCCA101)", "Modem (PCCA101) Communications"),
    row(0x02, Some(0x02), Some(0x03), "Modem (PCCA101)", "Modem (PCCA101 + wakeup) Communications"),
    row(0x02, Some(0x02), Some(0x04), "Modem (GSM)", "Modem (GSM) Communications"),
    row(0x02, Some(0x02), Some(0x05), "Modem (3G)", "Modem (3G) Communications"),
    row(0x02, Some(0x02), Some(0x06), "Modem (CDMA)", "Modem (CDMA) Communications"),
    row(0x02, Some(0x02), Some(0xfe), "Modem", "Modem (Defined by command set descriptor) Communications"),
    row(0x02, Some(0x02), Some(0xff), "Modem (Vendor Specific)", "Modem (Vendor Specific) Communications"),
    row(0x02, Some(0x03), ANY, "Telephone", "Telephone Communications"),
    row(0x02, Some(0x04), ANY, "Multi-Channel", "Multi-Channel Communications"),
    row(0x02, Some(0x05), ANY, "CAPI Control", "CAPI Control"),
    row(0x02, Some(0x06), ANY, "Ethernet Networking", "Ethernet Networking"),
    row(0x02, Some(0x07), ANY, "ATM Networking", "ATM Networking"),
    row(0x02, Some(0x08), ANY, "Wireless Handset Control", "Wireless Handset Control"),
    row(0x02, Some(0x09), ANY, "Device Management", "Device Management"),
    row(0x02, Some(0x0a), ANY, "Mobile Direct Line", "Mobile Direct Line"),
    row(0x02, Some(0x0b), ANY, "OBEX", "OBEX"),
    row(0x02, Some(0x0c), ANY, "Ethernet Emulation", "Ethernet Emulation"),
    row(0x02, Some(0x0c), Some(0x07), "Ethernet Emulation", "Ethernet Emulation (EEM)"),

    // HID
    row(0x03, ANY, ANY, "HID Device", "HID Device"),
    row(0x03, ANY, Some(0x00), "HID Device", "HID Device"),
    row(0x03, ANY, Some(0x01), "Keyboard HID Device", "Keyboard HID Device"),
    row(0x03, ANY, Some(0x02), "Mouse HID Device", "Mouse HID Device "),
    row(0x03, Some(0x01), Some(0x00), "HID Device", "HID Device Interface (Boot)"),
    row(0x03, Some(0x01), Some(0x01), "Keyboard HID Device", "Keyboard HID Device Interface (Boot)"),
    row(0x03, Some(0x01), Some(0x02), "Mouse HID Device", "Mouse HID Device Interface (Boot)"),

    // Still imaging
    row(0x06, ANY, ANY, "Imaging Device", "Imaging Device"),
    row(0x06, Some(0x01), ANY, "Still Image Capture", "Still Image Capture"),
    row(0x06, Some(0x01), Some(0x01), "PTP Imaging Device", "PTP Imaging Device"),

    // Printer
    row(0x07, ANY, ANY, "Printer", "Printing"),
    row(0x07, Some(0x01), Some(0x01), "Printer", "Printing Interface (Unidirectional)"),
    row(0x07, Some(0x01), Some(0x02), "Printer", "Printing Interface (Bidirectional)"),
    row(0x07, Some(0x01), Some(0x03), "Printer", "Printing Interface (IEEE 1284.4 Compatible Bidirectional)"),
    row(0x07, Some(0x01), Some(0xff), "Printer", "Printing Interface (Vendor Specific)"),

    // Mass storage
    row(0x08, ANY, ANY, "USB Mass Storage", "USB Mass Storage"),
    row(0x08, Some(0x01), ANY, "USB Mass Storage", "USB Mass Storage (Flash)"),
    row(0x08, Some(0x02), ANY, "USB Mass Storage", "USB Mass Storage (SFF-8020i, MMC-2 (ATAPI))"),
    row(0x08, Some(0x03), ANY, "USB Mass Storage", "USB Mass Storage (QIC-157)"),
    row(0x08, Some(0x04), ANY, "USB Mass Storage", "USB Mass Storage (Floppy (UFI))"),
    row(0x08, Some(0x05), ANY, "USB Mass Storage", "USB Mass Storage (SFF-8070i)"),
    row(0x08, Some(0x06), ANY, "USB Mass Storage", "USB Mass Storage (SCSI)"),

    // Hub
    row(0x09, ANY, ANY, "Hub", "Hub"),
    row(0x09, Some(0x00), Some(0x00), "Hub", "Hub"),
    row(0x09, Some(0x00), Some(0x01), "Hub", "Hub Interface (Single TT)"),
    row(0x09, Some(0x00), Some(0x02), "Hub", "Hub Interface (TT per port)"),

    // CDC data
    row(0x0a, ANY, ANY, "CDC Data", "CDC Data"),
    row(0x0a, Some(0x00), Some(0x30), "I.430 ISDN BRI Data", "I.430 ISDN BRI Data"),
    row(0x0a, ANY, Some(0x31), "HDLC Data", "HDLC Data"),
    row(0x0a, ANY, Some(0x32), "Transparent Data", "Transparent Data"),
    row(0x0a, ANY, Some(0x50), "Q.921M Data", "Q.921M Data"),
    row(0x0a, ANY, Some(0x51), "Q.921 Data", "Q.921 Data"),
    row(0x0a, ANY, Some(0x52), "Q.921TM Data", "Q.921TM Data"),
    row(0x0a, ANY, Some(0x90), "V.42bis Data", "V.42bis Data"),
    row(0x0a, ANY, Some(0x91), "Q.932 EuroISDN Data", "Q.932 EuroISDN Data"),
    row(0x0a, ANY, Some(0x92), "V.120 V.24 rate ISDN Data", "V.120 V.24 rate ISDN Data"),
    row(0x0a, ANY, Some(0x93), "CAPI 2.0 Data", "CAPI 2.0 Data"),
    row(0x0a, ANY, Some(0xfd), "Host Based Data Driver", "Host Based Driver Data"),
    row(0x0a, ANY, Some(0xfe), "CDC PUF Data", "CDC PUF Data"),
    row(0x0a, ANY, Some(0xff), "Vendor Specific Data", "Vendor Specific Data"),

    row(0x0b, ANY, ANY, "Chip / Smart Card", "Chip / Smart Card"),

    row(0x0d, ANY, ANY, "Content Security", "Content Security"),

    // Video
    row(0x0e, ANY, ANY, "Video", "Video"),
    row(0x0e, Some(0x01), ANY, "Video Control", "Video Control"),
    row(0x0e, Some(0x02), ANY, "Video Streaming", "Video Streaming"),
    row(0x0e, Some(0x03), ANY, "Video Interface Collection", "Video Interface Collection"),

    row(0xdc, ANY, ANY, "Diagnostics", "Diagnostics"),

    // Wireless controller
    row(0xe0, ANY, ANY, "Wireless Adapter", "Wireless Adapter"),
    row(0xe0, Some(0x01), ANY, "Wireless Radio", "Wireless Radio"),
    row(0xe0, Some(0x01), Some(0x01), "Bluetooth Adapter", "Bluetooth Adapter"),
    row(0xe0, Some(0x01), Some(0x02), "Ultra Wideband Radio Control", "Ultra Wideband Radio Control"),
    row(0xe0, Some(0x01), Some(0x03), "RNDIS", "RNDIS"),
    row(0xe0, Some(0x02), ANY, "Wireless USB Wire Adapter", "Wireless USB Wire Adapter"),
    row(0xe0, Some(0x02), Some(0x01), "Wireless USB Wire Adapter", "Host Wire Adapter Control/Data Streaming"),
    row(0xe0, Some(0x02), Some(0x02), "Wireless USB Wire Adapter", "Device Wire Adapter Control/Data Streaming"),
    row(0xe0, Some(0x02), Some(0x03), "Wireless USB Wire Adapter", "Device Wire Adapter Isochronous Streaming"),

    // Miscellaneous
    row(0xef, ANY, ANY, "Miscellanous", "Miscellanous"),
    row(0xef, Some(0x01), Some(0x01), "MS ActiveSync", "MS ActiveSync"),
    row(0xef, Some(0x01), Some(0x02), "Palm Sync", "Palm Sync"),
    row(0xef, Some(0x02), ANY, "Miscellanous Common", "Miscellanous Common"),
    row(0xef, Some(0x02), Some(0x01), "Interface Association", "Interface Association"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rows_have_unique_keys() {
        let mut seen = HashSet::new();
        for (key, _, long) in USB_CLASS_NAMES {
            assert!(seen.insert(*key), "duplicate key {} ({})", key, long);
        }
    }

    #[test]
    fn test_printer_protocols_are_distinct() {
        let printer: Vec<_> = USB_CLASS_NAMES
            .iter()
            .filter(|(key, _, _)| key.class == 0x07 && key.subclass == Some(0x01))
            .map(|(key, _, _)| key.protocol)
            .collect();
        assert_eq!(printer, vec![Some(0x01), Some(0x02), Some(0x03), Some(0xff)]);
    }

    #[test]
    fn test_every_class_has_a_class_wide_row() {
        for (key, _, _) in USB_CLASS_NAMES {
            let wide = ClassCode::new(key.class, None, None);
            assert!(
                USB_CLASS_NAMES.iter().any(|(k, _, _)| *k == wide),
                "class 0x{:02x} has no class-wide row",
                key.class
            );
        }
    }

    #[test]
    fn test_display_uses_registry_notation() {
        assert_eq!(ClassCode::new(0x03, None, Some(0x02)).to_string(), "(0x03,   -1, 0x02)");
        assert_eq!(ClassCode::exact(0xe0, 0x01, 0x01).to_string(), "(0xe0, 0x01, 0x01)");
    }
}
