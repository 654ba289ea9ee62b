// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client builder.

use std::time::Duration;

use crate::client::Senec;
use crate::codec::ByteOrder;
use crate::error::Error;
use crate::protocol::{HttpClient, HttpConfig};
use crate::request::FieldRequest;

/// Builder for HTTP-based clients.
///
/// This builder can be created in two ways:
/// - `Senec::http("host")` - Simple host string
/// - `Senec::http_config(HttpConfig::new("host").with_port(8443))` - Advanced configuration
///
/// Building does not contact the appliance; the first request is sent by
/// [`Senec::poll`].
///
/// # Examples
///
/// ```
/// use senec_lib::{ByteOrder, FieldRequest, Senec};
/// use std::time::Duration;
///
/// # fn example() -> senec_lib::Result<()> {
/// let senec = Senec::http("192.168.1.120")
///     .danger_accept_invalid_certs()
///     .with_timeout(Duration::from_secs(5))
///     .with_request(FieldRequest::new().with_group("BMS"))
///     .with_byte_order(ByteOrder::Big)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpSenecBuilder {
    config: HttpConfig,
    request: Option<FieldRequest>,
    byte_order: ByteOrder,
}

impl HttpSenecBuilder {
    /// Creates a new builder with the specified HTTP configuration.
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self {
            config,
            request: None,
            byte_order: ByteOrder::default(),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Accepts the appliance's self-signed certificate.
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.config = self.config.danger_accept_invalid_certs(true);
        self
    }

    /// Sets the request sent on each poll.
    ///
    /// Defaults to [`FieldRequest::standard`].
    #[must_use]
    pub fn with_request(mut self, request: FieldRequest) -> Self {
        self.request = Some(request);
        self
    }

    /// Sets the byte order of encoded leaves.
    #[must_use]
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Returns the HTTP configuration.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build(self) -> Result<Senec<HttpClient>, Error> {
        let client = self.config.into_client().map_err(Error::Protocol)?;

        let senec = Senec::new(client).with_byte_order(self.byte_order);
        Ok(match self.request {
            Some(request) => senec.with_request(request),
            None => senec,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let senec = HttpSenecBuilder::new(HttpConfig::new("192.168.1.120"))
            .build()
            .unwrap();
        assert_eq!(senec.request(), &FieldRequest::standard());
        assert_eq!(senec.decoder().byte_order(), ByteOrder::Little);
        assert_eq!(senec.protocol().url(), "https://192.168.1.120/lala.cgi");
    }

    #[test]
    fn builder_with_options() {
        let request = FieldRequest::new().with_group("ENERGY");
        let builder = Senec::http("192.168.1.120")
            .danger_accept_invalid_certs()
            .with_timeout(Duration::from_secs(2))
            .with_request(request.clone())
            .with_byte_order(ByteOrder::Big);

        assert!(builder.config().accepts_invalid_certs());
        assert_eq!(builder.config().timeout(), Duration::from_secs(2));

        let senec = builder.build().unwrap();
        assert_eq!(senec.request(), &request);
        assert_eq!(senec.decoder().byte_order(), ByteOrder::Big);
    }

    #[test]
    fn builder_from_config() {
        let senec = Senec::http_config(HttpConfig::new("senec.local").with_http())
            .build()
            .unwrap();
        assert_eq!(senec.protocol().url(), "http://senec.local/lala.cgi");
    }

    #[test]
    fn builder_rejects_empty_host() {
        let result = Senec::http("").build();
        assert!(matches!(result, Err(Error::Protocol(_))));
    }
}
