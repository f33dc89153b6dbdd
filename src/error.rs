//! Error types for request construction.
//!
//! Misconfiguration is deliberately absent from this taxonomy: a proxy
//! password without a proxy login, or a password without a login, is silently
//! ignored at build time rather than reported. Only conditions that make the
//! request itself unbuildable surface as errors.

/// The error type for building a request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A query parameter value could not be converted to its percent-encoded
    /// string form.
    ///
    /// Fatal to the build: retrying with identical input cannot succeed, so
    /// this is never retried or silently degraded.
    #[error("failed to encode query parameter {name:?}: {reason}")]
    Encoding {
        /// The name of the offending parameter.
        name: String,
        /// Why the value has no encoded form.
        reason: String,
    },

    /// The base URL and path did not combine into a valid absolute URL.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The transport rejected the prepared configuration, for example an
    /// unusable proxy definition.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    /// Returns the name of the offending parameter for encoding failures.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Error::Encoding { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A specialized `Result` type for request construction.
pub type Result<T> = std::result::Result<T, Error>;
