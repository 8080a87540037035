// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the Salus device service.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

use crate::device::{Device, DeviceId};
use crate::error::{Error, ParseError, ProtocolError};

use super::{SetModeRequest, SetTargetRequest, VendorClient};

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for the Salus HTTP client.
///
/// # Examples
///
/// ```
/// use salus_bridge::client::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("salus-gateway.local")
///     .with_credentials("user@example.com", "secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://salus-gateway.local");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    endpoint: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given endpoint.
    ///
    /// The endpoint may be a bare host (`host:port`) or a full
    /// `http://`/`https://` URL.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            credentials: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets account credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the credentials if set.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        self.credentials
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL, defaulting to plain HTTP for bare hosts.
    #[must_use]
    pub fn base_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_string()
        } else {
            format!("http://{endpoint}")
        }
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint is empty or the HTTP client cannot be
    /// created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.endpoint.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "endpoint is required".to_string(),
            ));
        }

        let base_url = self.base_url();
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url,
            client,
            credentials: self.credentials,
        })
    }
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for the Salus device service.
///
/// Endpoints:
///
/// - `GET  /api/devices` returns the device list
/// - `POST /api/devices/{id}/mode` with `{"id", "mode"}`
/// - `POST /api/devices/{id}/target` with `{"id", "temperature"}`
///
/// # Examples
///
/// ```no_run
/// use salus_bridge::client::{HttpConfig, VendorClient};
///
/// # async fn example() -> salus_bridge::Result<()> {
/// let client = HttpConfig::new("salus-gateway.local").into_client()?;
/// for device in client.devices().await? {
///     println!("{} {}", device.id, device.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    credentials: Option<(String, String)>,
}

impl HttpClient {
    /// Creates a client with default settings for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(endpoint).into_client()
    }

    /// Returns the base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn devices_url(&self) -> String {
        format!("{}/api/devices", self.base_url)
    }

    fn command_url(&self, id: &DeviceId, command: &str) -> String {
        format!(
            "{}/api/devices/{}/{command}",
            self.base_url,
            urlencoding::encode(id.as_str())
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        }
    }

    fn check(response: Response) -> Result<Response, ProtocolError> {
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::RequestFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response)
    }

    async fn post_command<B: Serialize + Sync>(&self, url: &str, body: &B) -> Result<(), Error> {
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        Self::check(response)?;
        Ok(())
    }
}

impl VendorClient for HttpClient {
    async fn devices(&self) -> Result<Vec<Device>, Error> {
        let url = self.devices_url();

        tracing::debug!(url = %url, "Fetching device list");

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(ProtocolError::Http)?;
        let response = Self::check(response)?;
        let body = response.text().await.map_err(ProtocolError::Http)?;

        let devices: Vec<Device> = serde_json::from_str(&body).map_err(ParseError::Json)?;

        tracing::debug!(count = devices.len(), "Received device list");

        Ok(devices)
    }

    async fn set_mode(&self, request: SetModeRequest) -> Result<(), Error> {
        let url = self.command_url(&request.id, "mode");

        tracing::debug!(url = %url, mode = %request.mode, "Sending mode command");

        self.post_command(&url, &request).await
    }

    async fn set_target(&self, request: SetTargetRequest) -> Result<(), Error> {
        let url = self.command_url(&request.id, "target");

        tracing::debug!(url = %url, temperature = request.temperature, "Sending target command");

        self.post_command(&url, &request).await
    }
}
