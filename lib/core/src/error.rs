use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A required scalar or collection literal could not be parsed during
    /// normalization. Fatal to the whole corpus build.
    #[error("malformed record: field '{field}': {reason}")]
    MalformedRecord { field: String, reason: String },

    #[error("unknown selection: '{0}' is not in the catalog")]
    UnknownSelection(String),

    #[error("selection is empty")]
    EmptySelection,

    #[error("no candidates: the selection exhausts the catalog")]
    NoCandidates,

    #[error("schema mismatch: expected {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },

    #[error("duplicate full name in catalog: {0}")]
    DuplicateName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Shorthand for a `MalformedRecord` on a named field.
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
