use thiserror::Error;

use crate::document::FieldKind;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Version Mismatch: {record} understands up to version {supported}, found {found}")]
    VersionMismatch {
        record: &'static str,
        supported: u32,
        found: u32,
    },

    #[error("Malformed Payload: {0}")]
    MalformedPayload(#[from] PayloadError),

    #[error("Encoding Error: {0}")]
    Encoding(#[from] bincode::error::EncodeError),

    #[error("Broken Migration Chain: {0}")]
    BrokenChain(String),

    #[error("Legacy (unversioned) data rejected by configuration")]
    LegacyRejected,

    #[error("Migration Disabled: expected version {expected}, found {found}")]
    MigrationDisabled { expected: u32, found: u32 },

    #[error("Payload Too Large: {size} bytes exceeds limit of {limit}")]
    PayloadTooLarge { size: usize, limit: usize },
}

/// Failures raised while turning payload bytes into a record's fields.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("could not decode document: {0}")]
    Decoding(#[from] bincode::error::DecodeError),

    #[error("{0} trailing bytes after document")]
    TrailingBytes(usize),

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{field}` holds {found}, expected {expected}")]
    FieldKind {
        field: String,
        expected: FieldKind,
        found: FieldKind,
    },
}

impl From<bincode::error::DecodeError> for CodecError {
    fn from(err: bincode::error::DecodeError) -> Self {
        CodecError::MalformedPayload(PayloadError::Decoding(err))
    }
}
