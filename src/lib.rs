//! Human-readable categories for USB devices, derived from their
//! class/subclass/protocol codes.

pub mod data;
pub mod error;
pub mod i18n;
pub mod usb;

pub use data::{ClassCode, UNKNOWN_NAME};
pub use error::{ClassifyError, Result};
pub use i18n::{Catalog, Identity, Translate};
pub use usb::{
    class_table, classify, ClassTable, DeviceProperties, LabelStyle, Labels, PropertyMap,
    UsbDevice, UsbType,
};
