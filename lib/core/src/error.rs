use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Invalid option '{option}' for {field_type} field '{field}'")]
    InvalidOption {
        field: String,
        option: String,
        field_type: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Comparator error: {0}")]
    Comparator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// True for errors caused by the caller's field declarations, as opposed
    /// to failures delegated from collaborators (IO, parsing, comparators).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownFieldType(_) | Error::InvalidOption { .. } | Error::InvalidConfig(_)
        )
    }
}
