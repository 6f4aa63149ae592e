use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("No file uploaded (expected multipart field '{field}')")]
    MissingFile { field: String },

    #[error("Missing required feature: {}", .names.join(", "))]
    MissingFeature { names: Vec<String> },

    #[error("Schema mismatch: missing columns [{}], unexpected columns [{}]", .missing.join(", "), .unexpected.join(", "))]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Duplicate column in uploaded file: {name}")]
    DuplicateColumn { name: String },

    #[error("Invalid value for feature '{feature}' at row {row}: expected {expected}, got '{value}'")]
    InvalidValue {
        feature: String,
        row: usize,
        expected: String,
        value: String,
    },

    #[error("Uploaded file contains no data rows")]
    EmptyBatch,

    #[error("Duplicate identifier in uploaded file: {value}")]
    DuplicateIdentifier { value: String },

    #[error("Unknown class code emitted by model: {code}")]
    UnknownClass { code: String },

    #[error("{0}")]
    Prediction(String),

    #[error("Unreadable CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub fn prediction(msg: impl Into<String>) -> Self {
        Self::Prediction(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True when the failure was caused by the caller's input rather than by the
    /// model or the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRequest(_)
                | Self::MissingFile { .. }
                | Self::MissingFeature { .. }
                | Self::SchemaMismatch { .. }
                | Self::DuplicateColumn { .. }
                | Self::InvalidValue { .. }
                | Self::EmptyBatch
                | Self::DuplicateIdentifier { .. }
                | Self::Csv(_)
        )
    }
}
