// crates/souk-core/src/identity.rs
//
// Account identity for the Souk engine.
//
// Every participant — buyers, sellers, the marketplace owner, the ledger
// administrator, and the engine components themselves — is identified by
// a 20-byte address, rendered as a 0x-prefixed hex string.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SoukError;

/// A 20-byte account address.
///
/// Addresses are opaque identities: the engine never derives anything
/// from their contents, it only compares them for authorization and
/// uses them as ledger keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Construct an address from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a 0x-prefixed (or bare) 40-digit hex string.
    pub fn from_hex(s: &str) -> Result<Self, SoukError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits)
            .map_err(|e| SoukError::Parse(format!("invalid address {:?}: {}", s, e)))?;
        let bytes: [u8; 20] = raw
            .try_into()
            .map_err(|_| SoukError::Parse(format!("address {:?} is not 20 bytes", s)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = SoukError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serialize as the display hex string so addresses are usable as JSON
// map keys in persisted engine state.
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(de::Error::custom)
    }
}
