//! Transfer descriptors: who receives what

use crate::address::{parse_address, Address};
use crate::error::Result;
use crate::types::TransferKind;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Amount carried by a single transfer, one variant per token kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TransferAmount {
    Native {
        #[serde(with = "biguint_string")]
        magnitude: BigUint,
    },
    #[serde(rename_all = "camelCase")]
    Fungible {
        token_id: String,
        #[serde(with = "biguint_string")]
        magnitude: BigUint,
        decimals: u32,
    },
    #[serde(rename_all = "camelCase")]
    MetaToken {
        token_id: String,
        serial: u64,
        #[serde(with = "biguint_string")]
        magnitude: BigUint,
        decimals: u32,
    },
    #[serde(rename_all = "camelCase")]
    NonFungible { token_id: String, serial: u64 },
    #[serde(rename_all = "camelCase")]
    SemiFungible {
        token_id: String,
        serial: u64,
        #[serde(with = "biguint_string")]
        magnitude: BigUint,
    },
}

impl TransferAmount {
    pub fn native(magnitude: impl Into<BigUint>) -> Self {
        TransferAmount::Native {
            magnitude: magnitude.into(),
        }
    }

    pub fn fungible(token_id: impl Into<String>, magnitude: impl Into<BigUint>, decimals: u32) -> Self {
        TransferAmount::Fungible {
            token_id: token_id.into(),
            magnitude: magnitude.into(),
            decimals,
        }
    }

    pub fn meta_token(
        token_id: impl Into<String>,
        serial: u64,
        magnitude: impl Into<BigUint>,
        decimals: u32,
    ) -> Self {
        TransferAmount::MetaToken {
            token_id: token_id.into(),
            serial,
            magnitude: magnitude.into(),
            decimals,
        }
    }

    pub fn non_fungible(token_id: impl Into<String>, serial: u64) -> Self {
        TransferAmount::NonFungible {
            token_id: token_id.into(),
            serial,
        }
    }

    pub fn semi_fungible(token_id: impl Into<String>, serial: u64, magnitude: impl Into<BigUint>) -> Self {
        TransferAmount::SemiFungible {
            token_id: token_id.into(),
            serial,
            magnitude: magnitude.into(),
        }
    }

    pub fn kind(&self) -> TransferKind {
        match self {
            TransferAmount::Native { .. } => TransferKind::Native,
            TransferAmount::Fungible { .. } => TransferKind::Fungible,
            TransferAmount::MetaToken { .. } => TransferKind::MetaToken,
            TransferAmount::NonFungible { .. } => TransferKind::NonFungible,
            TransferAmount::SemiFungible { .. } => TransferKind::SemiFungible,
        }
    }

    /// Quantity being moved; `None` for non-fungible transfers
    pub fn magnitude(&self) -> Option<&BigUint> {
        match self {
            TransferAmount::Native { magnitude }
            | TransferAmount::Fungible { magnitude, .. }
            | TransferAmount::MetaToken { magnitude, .. }
            | TransferAmount::SemiFungible { magnitude, .. } => Some(magnitude),
            TransferAmount::NonFungible { .. } => None,
        }
    }

    pub fn token_id(&self) -> Option<&str> {
        match self {
            TransferAmount::Native { .. } => None,
            TransferAmount::Fungible { token_id, .. }
            | TransferAmount::MetaToken { token_id, .. }
            | TransferAmount::NonFungible { token_id, .. }
            | TransferAmount::SemiFungible { token_id, .. } => Some(token_id),
        }
    }

    pub fn serial(&self) -> Option<u64> {
        match self {
            TransferAmount::MetaToken { serial, .. }
            | TransferAmount::NonFungible { serial, .. }
            | TransferAmount::SemiFungible { serial, .. } => Some(*serial),
            TransferAmount::Native { .. } | TransferAmount::Fungible { .. } => None,
        }
    }

    pub fn decimals(&self) -> Option<u32> {
        match self {
            TransferAmount::Fungible { decimals, .. } | TransferAmount::MetaToken { decimals, .. } => {
                Some(*decimals)
            }
            _ => None,
        }
    }

    /// Whether two amounts name the same token: kind, token id, serial and decimals
    pub fn same_token(&self, other: &TransferAmount) -> bool {
        self.kind() == other.kind()
            && self.token_id() == other.token_id()
            && self.serial() == other.serial()
            && self.decimals() == other.decimals()
    }
}

/// A single (recipient, amount) pair of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDescriptor {
    pub recipient: Address,
    pub amount: TransferAmount,
}

impl TransferDescriptor {
    /// Create a descriptor from a bech32 recipient address
    pub fn new(recipient: &str, amount: TransferAmount) -> Result<Self> {
        Ok(TransferDescriptor {
            recipient: parse_address(recipient)?,
            amount,
        })
    }

    pub fn from_address(recipient: Address, amount: TransferAmount) -> Self {
        TransferDescriptor { recipient, amount }
    }

    pub fn kind(&self) -> TransferKind {
        self.amount.kind()
    }
}

/// Serde helpers that store a `BigUint` as a decimal string
pub mod biguint_string {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<BigUint>().map_err(serde::de::Error::custom)
    }
}
