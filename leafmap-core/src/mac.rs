//! MAC address normalization.
//!
//! Arista emits colon-delimited MACs in `show mac address-table` and
//! dotted-quad style in other outputs depending on version, so every string
//! coming off the wire goes through [`MacAddr::parse`] before it is used as a
//! join key.

use serde::{Deserialize, Serialize, de};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid MAC address")]
pub struct MacParseError {
    pub value: String,
}

/// A MAC address in canonical form. Two raw strings naming the same address
/// always compare equal regardless of source delimiter style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    /// Parse any of `aa:bb:cc:dd:ee:ff`, `aabb.ccdd.eeff`,
    /// `aa-bb-cc-dd-ee-ff` or bare `aabbccddeeff`, case-insensitively.
    pub fn parse(value: &str) -> Result<Self, MacParseError> {
        let hex: String = value
            .chars()
            .filter(|c| !matches!(c, ':' | '-' | '.'))
            .collect();

        if hex.len() != 12 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MacParseError {
                value: value.to_string(),
            });
        }

        let mut octets = [0u8; 6];
        for (i, octet) in octets.iter_mut().enumerate() {
            // Slice bounds checked by the length test above.
            *octet = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| MacParseError {
                value: value.to_string(),
            })?;
        }

        Ok(Self(octets))
    }
}

impl fmt::Display for MacAddr {
    /// Canonical lowercase colon-delimited form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = MacParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MacAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
