use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the freightpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the geocoder could not resolve a place name.
    #[error("unknown place name: {name}")]
    UnknownPlace { name: String },

    /// Raised when the geocoder answered with a payload we cannot interpret.
    #[error("geocoder returned an invalid response for {name}: {message}")]
    InvalidGeocoderResponse { name: String, message: String },

    /// Raised when the segment builder produced no segments for a route.
    #[error("route contained no segments")]
    EmptyRoute,

    /// Raised when port data fails validation.
    #[error("invalid port data: {message}")]
    PortDataValidation { message: String },

    /// Raised when duplicate port slugs are encountered during registry load.
    #[error("duplicate port slug encountered: {slug}")]
    DuplicatePortSlug { slug: String },

    /// Raised when a requested option value is not supported.
    #[error("{option} value {value} is not supported")]
    UnsupportedOption { option: String, value: String },

    /// Raised when the external maritime routing tool fails or times out.
    #[error("maritime routing tool failed: {message}")]
    MaritimeTool { message: String },

    /// Raised when a data file could not be loaded.
    #[error("failed to load {}: {message}", path.display())]
    DataFileLoad { path: PathBuf, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
