use std::num::ParseIntError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClassifyError>;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("TYPE property {value:?} has {found} field(s), expected class/subclass/protocol")]
    TypeFieldCount { value: String, found: usize },

    #[error("TYPE property {value:?}: {field} field {token:?} is not a code in 0..=255")]
    InvalidTypeField {
        value: String,
        field: &'static str,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line_no}: expected KEY=VALUE, got {line:?}")]
    MalformedProperty { line_no: usize, line: String },

    #[error("invalid translation catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
