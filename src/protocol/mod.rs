// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the appliance.
//!
//! The [`Protocol`] trait is the seam between the client and the network:
//! it takes a [`FieldRequest`] and returns the raw response body. The
//! default implementation is [`HttpClient`], which POSTs the request to the
//! appliance's local endpoint.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use serde_json::Value;

use crate::error::{ParseError, ProtocolError};
use crate::request::FieldRequest;

/// Raw response from the appliance.
#[derive(Debug, Clone)]
pub struct DeviceResponse {
    /// The raw JSON response body.
    body: String,
}

impl DeviceResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw JSON response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body as a JSON object tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the body is not valid JSON and
    /// [`ParseError::UnexpectedFormat`] if the top level is not an object.
    pub fn parse(&self) -> Result<Value, ParseError> {
        let value: Value = serde_json::from_str(&self.body)?;
        if value.is_object() {
            Ok(value)
        } else {
            Err(ParseError::UnexpectedFormat(format!(
                "expected a JSON object, got {}",
                kind_of(&value)
            )))
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Trait for transports that can query the appliance.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Sends a field request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be sent or the
    /// appliance answers with a failure status.
    async fn send_request(&self, request: &FieldRequest) -> Result<DeviceResponse, ProtocolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object() {
        let response = DeviceResponse::new(r#"{"ENERGY":{"STAT_STATE":"u8_0E"}}"#.to_string());
        let value = response.parse().unwrap();
        assert_eq!(value["ENERGY"]["STAT_STATE"], "u8_0E");
    }

    #[test]
    fn parse_invalid_json() {
        let response = DeviceResponse::new("<html>busy</html>".to_string());
        assert!(matches!(response.parse(), Err(ParseError::Json(_))));
    }

    #[test]
    fn parse_non_object() {
        let response = DeviceResponse::new("[1,2,3]".to_string());
        let err = response.parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected response format: expected a JSON object, got an array"
        );
    }
}
