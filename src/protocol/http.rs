// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the appliance's local JSON endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ProtocolError;
use crate::protocol::{DeviceResponse, Protocol};
use crate::request::FieldRequest;

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for reaching an appliance over HTTP(S).
///
/// The appliance serves its API over HTTPS with a self-signed certificate.
/// Certificate checks stay on unless
/// [`danger_accept_invalid_certs`](Self::danger_accept_invalid_certs) is
/// called.
///
/// # Examples
///
/// ```
/// use senec_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// // Defaults: HTTPS on port 443, endpoint /lala.cgi
/// let config = HttpConfig::new("192.168.1.120");
/// assert_eq!(config.url(), "https://192.168.1.120/lala.cgi");
///
/// // Plain HTTP on a custom port with a short timeout
/// let config = HttpConfig::new("192.168.1.120")
///     .with_http()
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.url(), "http://192.168.1.120:8080/lala.cgi");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    endpoint: String,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Path of the JSON endpoint on the appliance.
    pub const DEFAULT_ENDPOINT: &'static str = "/lala.cgi";

    /// Creates a new configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the appliance
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_HTTPS_PORT,
            use_https: true,
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            accept_invalid_certs: false,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Switches to plain HTTP.
    ///
    /// If port hasn't been explicitly set, it will be changed to 80.
    #[must_use]
    pub fn with_http(mut self) -> Self {
        self.use_https = false;
        if self.port == Self::DEFAULT_HTTPS_PORT {
            self.port = Self::DEFAULT_PORT;
        }
        self
    }

    /// Switches to HTTPS.
    ///
    /// If port hasn't been explicitly set, it will be changed to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Sets the endpoint path.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Accepts any server certificate, including the appliance's
    /// self-signed one.
    #[must_use]
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns whether HTTPS is enabled.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the endpoint path.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns whether invalid certificates are accepted.
    #[must_use]
    pub fn accepts_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix = if (self.use_https && self.port == Self::DEFAULT_HTTPS_PORT)
            || (!self.use_https && self.port == Self::DEFAULT_PORT)
        {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Builds the full endpoint URL.
    #[must_use]
    pub fn url(&self) -> String {
        let endpoint = self.endpoint.trim_start_matches('/');
        format!("{}/{endpoint}", self.base_url())
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty, the URL is invalid, or the HTTP
    /// client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }

        let url = Url::parse(&self.url())
            .map_err(|e| ProtocolError::InvalidAddress(format!("{}: {e}", self.url())))?;

        let client = Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            url,
            client,
            timeout: self.timeout,
        })
    }
}

// ============================================================================
// HttpClient - POSTs field requests
// ============================================================================

/// HTTP client for the appliance's JSON endpoint.
///
/// # Examples
///
/// ```no_run
/// use senec_lib::protocol::{HttpClient, Protocol};
/// use senec_lib::request::FieldRequest;
///
/// # async fn example() -> senec_lib::Result<()> {
/// let client = HttpClient::new("192.168.1.120")?;
/// let response = client.send_request(&FieldRequest::standard()).await?;
/// println!("{}", response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    url: Url,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client with the default configuration for the host.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    fn map_error(&self, error: reqwest::Error) -> ProtocolError {
        if error.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            ProtocolError::Http(error)
        }
    }
}

impl Protocol for HttpClient {
    async fn send_request(&self, request: &FieldRequest) -> Result<DeviceResponse, ProtocolError> {
        tracing::debug!(url = %self.url, "Sending field request");

        let response = self
            .client
            .post(self.url.clone())
            .json(&request.to_body())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;

        tracing::trace!(body = %body, "Received HTTP response");

        Ok(DeviceResponse::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.120");
        assert_eq!(config.host(), "192.168.1.120");
        assert_eq!(config.port(), 443);
        assert!(config.use_https());
        assert_eq!(config.endpoint(), "/lala.cgi");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(!config.accepts_invalid_certs());
    }

    #[test]
    fn http_config_with_http() {
        let config = HttpConfig::new("192.168.1.120").with_http();
        assert!(!config.use_https());
        assert_eq!(config.port(), 80);
    }

    #[test]
    fn http_config_with_http_custom_port() {
        let config = HttpConfig::new("192.168.1.120")
            .with_port(8080)
            .with_http();
        assert_eq!(config.port(), 8080);
        assert_eq!(config.base_url(), "http://192.168.1.120:8080");
    }

    #[test]
    fn http_config_back_to_https() {
        let config = HttpConfig::new("192.168.1.120").with_http().with_https();
        assert!(config.use_https());
        assert_eq!(config.port(), 443);
    }

    #[test]
    fn http_config_urls() {
        let config = HttpConfig::new("senec.local");
        assert_eq!(config.base_url(), "https://senec.local");
        assert_eq!(config.url(), "https://senec.local/lala.cgi");

        let config = HttpConfig::new("senec.local")
            .with_port(8443)
            .with_endpoint("api.cgi");
        assert_eq!(config.url(), "https://senec.local:8443/api.cgi");
    }

    #[test]
    fn http_config_builder_chain() {
        let config = HttpConfig::new("192.168.1.120")
            .with_timeout(Duration::from_secs(5))
            .danger_accept_invalid_certs(true);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.accepts_invalid_certs());
    }

    #[test]
    fn http_config_into_client() {
        let client = HttpConfig::new("192.168.1.120")
            .danger_accept_invalid_certs(true)
            .into_client()
            .unwrap();
        assert_eq!(client.url(), "https://192.168.1.120/lala.cgi");
    }

    #[test]
    fn http_config_empty_host() {
        let result = HttpConfig::new("  ").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }
}
