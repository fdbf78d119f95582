pub mod classify;
pub mod device;
pub mod properties;

// Re-export commonly used types for easier access
pub use self::classify::{class_table, classify, ClassTable, Labels, TableEntry};
pub use self::device::{LabelStyle, UsbDevice, UsbType, TYPE_PROPERTY};
pub use self::properties::{DeviceProperties, PropertyMap};
