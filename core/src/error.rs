use thiserror::Error;

/// Errors raised while building records and queries or while talking to an
/// external document store
#[derive(Error, Debug)]
pub enum Error {
    /// The record has neither a location nor a region
    #[error("record `{id}' has neither a location nor a region")]
    InvalidRecord { id: String },

    /// The query parameters are structurally invalid
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// Latitude or longitude out of range (or not finite)
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A point could not be parsed from text
    #[error("invalid point `{0}', expected `latitude,longitude'")]
    InvalidPoint(String),

    /// A raw document could not be converted to a record
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A distance unit could not be parsed
    #[error("unknown distance unit `{0}'")]
    UnknownUnit(String),

    /// The response of a remote search engine could not be interpreted
    #[error("invalid search response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
