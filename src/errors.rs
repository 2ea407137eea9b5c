use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    #[error("Unable to make a connection to the Core server")]
    Connection,

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bridge Error: {0}")]
    Remote(String),

    #[error("Multiple results matched an expected single match query")]
    AmbiguousResult,

    #[error("Malformed field: {0}")]
    MalformedField(String),

    #[error("Unsupported field type: {0}")]
    UnsupportedFieldType(String),
}
