//! Core components for building shared access signatures.
//!
//! This crate provides the foundational pieces shared by every sassy service
//! crate:
//!
//! - [`Error`] and [`ErrorKind`]: the typed error surfaced to callers, one
//!   kind per input field that can be rejected.
//! - [`hash`]: base64 and HMAC-SHA256 helpers used to sign a string-to-sign.
//! - [`time`]: parsing of human entered ISO 8601 datetimes and rendering of
//!   the canonical wire timestamp.
//! - [`utils`]: general utilities including data redaction.
//!
//! ## Example
//!
//! ```
//! use sassy_core::hash::base64_hmac_sha256;
//! use sassy_core::time::{format_rfc3339, parse_iso8601};
//!
//! # fn main() -> sassy_core::Result<()> {
//! let expiry = parse_iso8601("2021-01-01")?;
//! assert_eq!(format_rfc3339(expiry), "2021-01-01T00:00:00Z");
//!
//! let signature = base64_hmac_sha256(b"key", b"string-to-sign\n");
//! assert_eq!(signature.len(), 44);
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
