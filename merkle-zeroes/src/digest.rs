//! Digest type and text encodings
//!
//! A digest is a BN254 scalar-field element stored as 32 Little-Endian bytes,
//! the layout arkworks uses for its field elements. Text forms are big-endian:
//! `0x`-prefixed hex (as printed by circuit tooling) or plain decimal.

use core::{fmt, str::FromStr};

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::{Error, Result};

/// Digest size in bytes (BN254 scalar field)
pub const FIELD_SIZE: usize = 32;

/// Digest of the canonical empty leaf
pub const ZERO_DIGEST: Digest = Digest([0u8; FIELD_SIZE]);

/// Fixed-width hash output, Little-Endian
///
/// Parsing never checks field membership. A value at or above the field
/// modulus is representable here and rejected by the hash adapters.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; FIELD_SIZE]);

impl Digest {
    /// Wrap Little-Endian bytes
    pub const fn from_le_bytes(bytes: [u8; FIELD_SIZE]) -> Self {
        Self(bytes)
    }

    /// Wrap Big-Endian bytes
    pub fn from_be_bytes(mut bytes: [u8; FIELD_SIZE]) -> Self {
        bytes.reverse();
        Self(bytes)
    }

    /// Read a digest from a Little-Endian slice of exactly [`FIELD_SIZE`] bytes
    pub fn from_le_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; FIELD_SIZE] = bytes.try_into().map_err(|_| {
            Error::InvalidEncoding(format!(
                "expected {} bytes, got {}",
                FIELD_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Little-Endian bytes
    pub const fn to_le_bytes(&self) -> [u8; FIELD_SIZE] {
        self.0
    }

    /// Big-Endian bytes
    pub fn to_be_bytes(&self) -> [u8; FIELD_SIZE] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    /// Digest holding a small integer
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; FIELD_SIZE];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self(bytes)
    }

    /// Whether every byte is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Big-Endian hex with a `0x` prefix, always 64 digits
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_be_bytes()))
    }

    /// Parse Big-Endian hex, with or without `0x`, left-padding short input
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.is_empty() {
            return Err(Error::InvalidEncoding("empty hex string".into()));
        }
        if digits.len() > 64 {
            return Err(Error::InvalidEncoding(format!(
                "hex string has {} digits, at most 64 allowed",
                digits.len()
            )));
        }

        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; FIELD_SIZE];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| Error::InvalidEncoding(format!("{s}: {e}")))?;
        Ok(Self::from_be_bytes(bytes))
    }

    /// Unsigned decimal value
    pub fn to_decimal(&self) -> String {
        BigUint::from_bytes_le(&self.0).to_string()
    }

    /// Parse an unsigned decimal value that fits in [`FIELD_SIZE`] bytes
    pub fn from_decimal(s: &str) -> Result<Self> {
        let value = BigUint::from_str(s)
            .map_err(|e| Error::InvalidEncoding(format!("{s}: {e}")))?;
        let le = value.to_bytes_le();
        if le.len() > FIELD_SIZE {
            return Err(Error::InvalidEncoding(format!(
                "{s} does not fit in {FIELD_SIZE} bytes"
            )));
        }

        let mut bytes = [0u8; FIELD_SIZE];
        bytes[..le.len()].copy_from_slice(&le);
        Ok(Self(bytes))
    }
}

impl FromStr for Digest {
    type Err = Error;

    /// `0x`-prefixed input is hex, anything else decimal
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with("0x") {
            Self::from_hex(s)
        } else {
            Self::from_decimal(s)
        }
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl From<[u8; FIELD_SIZE]> for Digest {
    fn from(bytes: [u8; FIELD_SIZE]) -> Self {
        Self::from_le_bytes(bytes)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
