// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature readings reported by the vendor as numeric strings.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// A temperature in degrees Celsius.
///
/// Salus devices report both measured and target temperatures as strings
/// such as `"21.0"`.
///
/// # Examples
///
/// ```
/// use salus_bridge::types::Temperature;
///
/// let t: Temperature = "22.5".parse().unwrap();
/// assert!((t.celsius() - 22.5).abs() < f64::EPSILON);
/// assert_eq!(t.to_string(), "22.5°C");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    /// Creates a temperature from degrees Celsius.
    #[must_use]
    pub const fn from_celsius(celsius: f64) -> Self {
        Self(celsius)
    }

    /// Returns the value in degrees Celsius.
    #[must_use]
    pub const fn celsius(self) -> f64 {
        self.0
    }

    /// Parses a vendor field, naming the field in any error.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if the text is not a finite number.
    pub fn parse_field(field: &str, text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        let value: f64 = trimmed.parse().map_err(|_| ParseError::InvalidValue {
            field: field.to_string(),
            message: format!("{trimmed:?} is not a number"),
        })?;

        if !value.is_finite() {
            return Err(ParseError::InvalidValue {
                field: field.to_string(),
                message: format!("{trimmed:?} is not finite"),
            });
        }

        Ok(Self(value))
    }
}

impl FromStr for Temperature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_field("temperature", s)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}\u{00b0}C", self.0)
    }
}

impl From<Temperature> for f64 {
    fn from(t: Temperature) -> Self {
        t.0
    }
}
