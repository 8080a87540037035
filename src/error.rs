// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Salus bridge.
//!
//! Failures fall into a small hierarchy: value validation, transport to the
//! vendor service, parsing of vendor payloads, and bridge-level lookups.

use thiserror::Error;

use crate::accessory::Characteristic;
use crate::device::DeviceId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the vendor service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a vendor payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A registered device was absent from a freshly fetched device list.
    #[error("device {0} not found in device list")]
    DeviceNotFound(DeviceId),

    /// A write was attempted on a read-only characteristic.
    #[error("characteristic {0} is read-only")]
    ReadOnly(Characteristic),

    /// A characteristic write carried a value of the wrong kind.
    #[error("invalid value for characteristic {0}")]
    InvalidValue(Characteristic),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A raw target heating/cooling state outside the host vocabulary.
    #[error("invalid target heating/cooling state: {0}")]
    InvalidTargetState(u8),

    /// An invalid vendor mode string was provided.
    #[error("invalid vendor mode: {0}")]
    InvalidVendorMode(String),

    /// A raw temperature display unit outside the host vocabulary.
    #[error("invalid temperature display units: {0}")]
    InvalidDisplayUnits(u8),
}

/// Errors related to communication with the vendor service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The vendor service answered with a non-success status.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to parsing vendor payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidTargetState(7);
        assert_eq!(err.to_string(), "invalid target heating/cooling state: 7");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::InvalidDisplayUnits(4).into();
        assert!(matches!(err, Error::Value(ValueError::InvalidDisplayUnits(4))));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::InvalidValue {
            field: "current".to_string(),
            message: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "failed to parse current: not a number");
    }

    #[test]
    fn device_not_found_display() {
        let err = Error::DeviceNotFound(DeviceId::new("A1"));
        assert_eq!(err.to_string(), "device A1 not found in device list");
    }

    #[test]
    fn read_only_display() {
        let err = Error::ReadOnly(Characteristic::CurrentTemperature);
        assert_eq!(err.to_string(), "characteristic CurrentTemperature is read-only");
    }
}
