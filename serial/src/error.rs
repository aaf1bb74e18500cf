use crate::FormatVersion;

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("Unexpected end of data at offset {offset}: need {needed} bytes, have {remaining}")]
    UnexpectedEndOfData {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("{entity} has no layout for format version {version}")]
    UnsupportedVersion {
        entity: &'static str,
        version: FormatVersion,
    },
    #[error("Unknown format version: {name}")]
    UnknownVersion { name: String },
}
