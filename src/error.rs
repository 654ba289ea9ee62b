// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `senec_lib` library.
//!
//! Failures are split by where they happen: talking to the appliance
//! ([`ProtocolError`]), turning the response body into JSON ([`ParseError`]),
//! reading a measurement out of a snapshot ([`FieldError`]) and decoding a
//! single hex-encoded leaf ([`DecodeError`]).
//!
//! Only the first two abort a poll. Leaf decode failures are logged and the
//! leaf is kept verbatim; field errors are returned by accessors.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the appliance.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A measurement could not be read from the snapshot.
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// Another poll is still in flight on this client.
    #[error("a poll is already in progress")]
    PollInProgress,
}

/// Errors related to HTTP communication with the appliance.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The appliance answered with a non-success status.
    #[error("HTTP {code} - {reason}")]
    Status {
        /// Numeric HTTP status code.
        code: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing appliance responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors returned when reading a measurement out of a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The group, field or array element is not in the snapshot.
    ///
    /// Some operating modes omit fields, so this is distinct from a zero.
    #[error("field not present: {path}")]
    Absent {
        /// Display form of the requested path.
        path: String,
    },

    /// The value exists but has the wrong JSON type.
    #[error("field {path} is not {expected}")]
    UnexpectedType {
        /// Display form of the requested path.
        path: String,
        /// The expected kind of value.
        expected: &'static str,
    },

    /// The system state code has no entry in the status table.
    #[error("unknown system state code: {0}")]
    UnknownSystemState(u64),
}

/// Errors produced while decoding a single encoded string leaf.
///
/// These never leave the normalizer: a leaf that fails to decode is kept as
/// the original string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The string does not start with a known type tag.
    #[error("no known type tag")]
    UnknownTag,

    /// The payload does not have the width the tag requires.
    #[error("tag {tag} expects {expected} hex digits, got {actual}")]
    PayloadLength {
        /// The type tag.
        tag: &'static str,
        /// Expected number of hex digits.
        expected: usize,
        /// Actual number of characters after the tag.
        actual: usize,
    },

    /// The payload contains characters that are not hex digits.
    #[error("tag {tag} has a non-hex payload")]
    InvalidHex {
        /// The type tag.
        tag: &'static str,
    },

    /// The float payload is NaN or infinite, which JSON cannot carry.
    #[error("tag {tag} decodes to a non-finite float")]
    NonFinite {
        /// The type tag.
        tag: &'static str,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_display() {
        let err = FieldError::Absent {
            path: "ENERGY.GUI_HOUSE_POW".to_string(),
        };
        assert_eq!(err.to_string(), "field not present: ENERGY.GUI_HOUSE_POW");
    }

    #[test]
    fn error_from_field_error() {
        let err: Error = FieldError::UnknownSystemState(250).into();
        assert!(matches!(
            err,
            Error::Field(FieldError::UnknownSystemState(250))
        ));
    }

    #[test]
    fn status_error_display() {
        let err = ProtocolError::Status {
            code: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503 - Service Unavailable");
    }

    #[test]
    fn decode_error_display() {
        let err = DecodeError::PayloadLength {
            tag: "u1",
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "tag u1 expects 4 hex digits, got 3");
    }
}
