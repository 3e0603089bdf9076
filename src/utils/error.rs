use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Invalid measurement type: expected {expected}, found {found}")]
    InvalidMeasurementType { expected: String, found: String },

    #[error("Invalid API key: no key configured")]
    InvalidApiKey,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Unable to parse API response: {source} (body: {body})")]
    ResponseParseError {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Invalid definition: {message}")]
    InvalidDefinition { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },
}

impl AtlasError {
    /// True when the failure happened before anything was sent over the wire.
    pub fn is_local(&self) -> bool {
        !matches!(
            self,
            AtlasError::TransportError(_)
                | AtlasError::ApiError { .. }
                | AtlasError::ResponseParseError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
