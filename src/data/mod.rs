pub mod class_codes;

pub use self::class_codes::{ClassCode, ClassRow, UNKNOWN_NAME, USB_CLASS_NAMES};
