// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform configuration block supplied by the host runtime.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ParseError;

use super::PLATFORM_NAME;

fn default_platform() -> String {
    PLATFORM_NAME.to_string()
}

/// Configuration for the Salus platform.
///
/// The host passes this as a JSON object. Apart from `platform` and `name`,
/// every field is handed through to the vendor client unchanged.
///
/// # Examples
///
/// ```
/// use salus_bridge::platform::PlatformConfig;
///
/// let config = PlatformConfig::from_json(r#"{
///     "platform": "Salus-iT600",
///     "endpoint": "https://eu.salusconnect.io",
///     "username": "user@example.com",
///     "password": "secret",
///     "timeoutSecs": 5
/// }"#).unwrap();
///
/// assert_eq!(config.endpoint, "https://eu.salusconnect.io");
/// assert!(!format!("{config:?}").contains("secret"));
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// Platform identifier the host routed this block by.
    #[serde(default = "default_platform")]
    pub platform: String,
    /// Optional display name for log output.
    #[serde(default)]
    pub name: Option<String>,
    /// Vendor service endpoint (host or URL).
    pub endpoint: String,
    /// Account user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Account password.
    #[serde(default)]
    pub password: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl PlatformConfig {
    /// Creates a configuration for the given endpoint with no credentials.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            platform: default_platform(),
            name: None,
            endpoint: endpoint.into(),
            username: None,
            password: None,
            timeout_secs: None,
        }
    }

    /// Parses a configuration block from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the JSON is malformed or `endpoint` is
    /// missing.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        serde_json::from_str(json).map_err(ParseError::Json)
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Builds the vendor HTTP client configuration.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn http_config(&self) -> crate::client::HttpConfig {
        let mut config = crate::client::HttpConfig::new(self.endpoint.clone());
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            config = config.with_credentials(username.clone(), password.clone());
        }
        if let Some(timeout) = self.timeout() {
            config = config.with_timeout(timeout);
        }
        config
    }
}

impl fmt::Debug for PlatformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformConfig")
            .field("platform", &self.platform)
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_block_uses_defaults() {
        let config = PlatformConfig::from_json(r#"{"endpoint":"gateway.local"}"#).unwrap();
        assert_eq!(config.platform, "Salus-iT600");
        assert!(config.username.is_none());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn missing_endpoint_is_an_error() {
        assert!(PlatformConfig::from_json(r#"{"platform":"Salus-iT600"}"#).is_err());
    }

    #[test]
    fn timeout_in_seconds() {
        let config =
            PlatformConfig::from_json(r#"{"endpoint":"gateway.local","timeoutSecs":3}"#).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn debug_redacts_password() {
        let mut config = PlatformConfig::new("gateway.local");
        config.password = Some("hunter2".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_config_passes_settings_through() {
        let config = PlatformConfig::from_json(
            r#"{"endpoint":"gateway.local","username":"u","password":"p","timeoutSecs":4}"#,
        )
        .unwrap();
        let http = config.http_config();
        assert_eq!(http.endpoint(), "gateway.local");
        assert_eq!(http.credentials(), Some(("u", "p")));
        assert_eq!(http.timeout(), Duration::from_secs(4));
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_config_requires_both_credentials() {
        let mut config = PlatformConfig::new("gateway.local");
        config.username = Some("u".to_string());
        assert!(config.http_config().credentials().is_none());
    }
}
