//! Address parsing and validation for bech32 encoded account addresses

use crate::error::{Error, Result};
use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Human readable part of every account address
pub const ADDRESS_HRP: &str = "erd";

/// Length of a decoded address in bytes
pub const ADDRESS_LEN: usize = 32;

/// Number of leading zero bytes that mark a smart contract address
const SC_ADDRESS_ZERO_PREFIX: usize = 8;

/// A validated 32-byte account address
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address(bytes)
    }

    pub fn zero() -> Self {
        Address([0u8; ADDRESS_LEN])
    }

    /// Decode an address from its bech32 form
    pub fn from_bech32(address: &str) -> Result<Self> {
        let (hrp, data, variant) = bech32::decode(address)
            .map_err(|e| Error::Address(format!("Failed to parse address {}: {}", address, e)))?;

        if hrp != ADDRESS_HRP {
            return Err(Error::Address(format!(
                "Address {} has prefix {}, expected {}",
                address, hrp, ADDRESS_HRP
            )));
        }
        if variant != Variant::Bech32 {
            return Err(Error::Address(format!(
                "Address {} is not bech32 encoded",
                address
            )));
        }

        let bytes = Vec::<u8>::from_base32(&data)
            .map_err(|e| Error::Address(format!("Failed to decode address {}: {}", address, e)))?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            Error::Address(format!(
                "Address {} decodes to {} bytes, expected {}",
                address,
                b.len(),
                ADDRESS_LEN
            ))
        })?;

        Ok(Address(bytes))
    }

    /// Decode an address from its hex form
    pub fn from_hex(address: &str) -> Result<Self> {
        let bytes = hex::decode(address)
            .map_err(|e| Error::Address(format!("Invalid hex address {}: {}", address, e)))?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| {
            Error::Address(format!("Hex address {} is not {} bytes", address, ADDRESS_LEN))
        })?;
        Ok(Address(bytes))
    }

    pub fn to_bech32(&self) -> String {
        // Encoding 32 bytes under a fixed lowercase prefix cannot fail.
        bech32::encode(ADDRESS_HRP, self.0.to_base32(), Variant::Bech32).unwrap_or_default()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Smart contract addresses start with eight zero bytes
    pub fn is_smart_contract(&self) -> bool {
        self.0[..SC_ADDRESS_ZERO_PREFIX].iter().all(|b| *b == 0)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Address::from_bech32(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_bech32())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_bech32(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse and validate a bech32 account address
pub fn parse_address(address: &str) -> Result<Address> {
    Address::from_bech32(address)
}

/// Validate an address format without keeping the result
pub fn is_valid_address(address: &str) -> bool {
    Address::from_bech32(address).is_ok()
}

/// Redact an address for safe display/logging.
///
/// Keeps the first N and last M visible characters, replaces the middle with '…'.
pub fn redact_middle(input: &str, keep_start: usize, keep_end: usize) -> String {
    if input.len() <= keep_start + keep_end + 1 {
        return input.to_string();
    }
    let start = &input[..keep_start];
    let end = &input[input.len() - keep_end..];
    format!("{start}…{end}")
}

/// Log-friendly short form of an address
pub(crate) fn short(address: &Address) -> String {
    redact_middle(&address.to_bech32(), 10, 6)
}
