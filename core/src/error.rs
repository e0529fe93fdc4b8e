use std::fmt;
use thiserror::Error;

/// The error type for sassy operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Account key is not valid base64
    KeyDecoding,

    /// Signed version is not a known version
    InvalidVersion,

    /// A required datetime was not supplied
    EmptyInput,

    /// Datetime didn't match any accepted format
    InvalidFormat,

    /// Signed expiry didn't match any accepted datetime format
    InvalidExpiryFormat,

    /// Signed start didn't match any accepted datetime format
    InvalidStartFormat,

    /// Signed IP is not a valid IPv4 address or ascending IPv4 range
    InvalidIpv4Format,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,

    /// Unexpected errors
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was caused by caller supplied input.
    ///
    /// Every kind except `ConfigInvalid` and `Unexpected` points at a
    /// specific input field.
    pub fn is_input_error(&self) -> bool {
        !matches!(self.kind, ErrorKind::ConfigInvalid | ErrorKind::Unexpected)
    }
}

// Convenience constructors
impl Error {
    /// Create a key decoding error
    pub fn key_decoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyDecoding, message)
    }

    /// Create an invalid version error
    pub fn invalid_version(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidVersion, message)
    }

    /// Create an empty input error
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyInput, message)
    }

    /// Create an invalid datetime format error
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    /// Create an invalid expiry format error
    pub fn invalid_expiry_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidExpiryFormat, message)
    }

    /// Create an invalid start format error
    pub fn invalid_start_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidStartFormat, message)
    }

    /// Create an invalid IPv4 format error
    pub fn invalid_ipv4_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidIpv4Format, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::KeyDecoding => write!(f, "invalid account key"),
            ErrorKind::InvalidVersion => write!(f, "invalid signed version"),
            ErrorKind::EmptyInput => write!(f, "empty input"),
            ErrorKind::InvalidFormat => write!(f, "invalid datetime format"),
            ErrorKind::InvalidExpiryFormat => write!(f, "invalid signed expiry format"),
            ErrorKind::InvalidStartFormat => write!(f, "invalid signed start format"),
            ErrorKind::InvalidIpv4Format => write!(f, "invalid signed ip format"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Rebuilding a request uri can only fail on these.
impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
