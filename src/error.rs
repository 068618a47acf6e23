use std::path::PathBuf;

use thiserror::Error;

use crate::session::Field;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cannot read media root {}: {source}", path.display())]
    MediaRoot {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed defaults file {} at line {line_no}: {line:?}", path.display())]
    MalformedDefaults {
        path: PathBuf,
        line_no: usize,
        line: String,
    },

    #[error("Invalid {field} label {value:?}: {reason}")]
    InvalidLabel {
        field: Field,
        value: String,
        reason: &'static str,
    },

    #[error("Operator input closed")]
    InputClosed,

    #[error("Record read error: {0}")]
    RecordRead(#[from] dicom_object::ReadError),

    #[error("Record write error: {0}")]
    RecordWrite(#[from] dicom_object::WriteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
