//! Transaction descriptors and the contract call builder
//!
//! A [`Transaction`] is the fully stamped, unsigned description of one
//! contract call: who sends it, with which nonce and gas, which function it
//! calls with which typed arguments, and which value or token payments ride
//! along. Signing, wire encoding and broadcasting are left to the wallet or
//! network SDK that consumes these descriptors.

use crate::address::Address;
use crate::amount::biguint_string;
use crate::error::{Error, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// A typed contract call argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ContractArgument {
    Address(Address),
    #[serde(with = "biguint_string")]
    BigUint(BigUint),
    TokenIdentifier(String),
    U64(u64),
}

/// A token payment attached to a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TokenPayment {
    #[serde(rename_all = "camelCase")]
    Fungible {
        token_id: String,
        #[serde(with = "biguint_string")]
        amount: BigUint,
        decimals: u32,
    },
    #[serde(rename_all = "camelCase")]
    MetaToken {
        token_id: String,
        serial: u64,
        #[serde(with = "biguint_string")]
        amount: BigUint,
        decimals: u32,
    },
    #[serde(rename_all = "camelCase")]
    NonFungible { token_id: String, serial: u64 },
    #[serde(rename_all = "camelCase")]
    SemiFungible {
        token_id: String,
        serial: u64,
        quantity: u64,
    },
}

impl TokenPayment {
    pub fn token_id(&self) -> &str {
        match self {
            TokenPayment::Fungible { token_id, .. }
            | TokenPayment::MetaToken { token_id, .. }
            | TokenPayment::NonFungible { token_id, .. }
            | TokenPayment::SemiFungible { token_id, .. } => token_id,
        }
    }
}

/// An unsigned, ready-to-sign contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub nonce: u64,
    #[serde(with = "biguint_string")]
    pub value: BigUint,
    pub receiver: Address,
    pub sender: Address,
    pub gas_price: u64,
    pub gas_limit: u64,
    pub chain_id: String,
    pub function: String,
    pub arguments: Vec<ContractArgument>,
    pub token_transfers: Vec<TokenPayment>,
}

/// Builder for a single contract call
///
/// Mirrors the usual SDK interaction flow: describe the call, then stamp the
/// network and account context on it before calling [`Interaction::build`].
#[derive(Debug, Clone)]
pub struct Interaction {
    receiver: Address,
    function: String,
    arguments: Vec<ContractArgument>,
    chain_id: Option<String>,
    sender: Option<Address>,
    nonce: Option<u64>,
    gas_limit: Option<u64>,
    gas_price: u64,
    value: BigUint,
    token_transfers: Vec<TokenPayment>,
}

impl Interaction {
    /// Create a call of `function` on the contract at `receiver`
    pub fn new(receiver: Address, function: impl Into<String>, arguments: Vec<ContractArgument>) -> Self {
        Interaction {
            receiver,
            function: function.into(),
            arguments,
            chain_id: None,
            sender: None,
            nonce: None,
            gas_limit: None,
            gas_price: crate::types::DEFAULT_MIN_GAS_PRICE,
            value: BigUint::default(),
            token_transfers: Vec::new(),
        }
    }

    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }

    pub fn with_sender(mut self, sender: Address) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Attach native coin value
    pub fn with_value(mut self, value: BigUint) -> Self {
        self.value = value;
        self
    }

    /// Attach exactly one token payment, replacing any previous attachment
    pub fn with_single_transfer(mut self, payment: TokenPayment) -> Self {
        self.token_transfers = vec![payment];
        self
    }

    /// Attach several token payments, replacing any previous attachment
    pub fn with_multi_transfer(mut self, payments: Vec<TokenPayment>) -> Self {
        self.token_transfers = payments;
        self
    }

    /// Produce the transaction descriptor
    ///
    /// Fails if chain id, sender, nonce or gas limit were never set.
    pub fn build(self) -> Result<Transaction> {
        let missing = |field: &str| {
            Error::Transaction(format!(
                "call to {} is missing its {}",
                self.function, field
            ))
        };
        let chain_id = self.chain_id.clone().ok_or_else(|| missing("chain id"))?;
        let sender = self.sender.ok_or_else(|| missing("sender"))?;
        let nonce = self.nonce.ok_or_else(|| missing("nonce"))?;
        let gas_limit = self.gas_limit.ok_or_else(|| missing("gas limit"))?;

        Ok(Transaction {
            nonce,
            value: self.value,
            receiver: self.receiver,
            sender,
            gas_price: self.gas_price,
            gas_limit,
            chain_id,
            function: self.function,
            arguments: self.arguments,
            token_transfers: self.token_transfers,
        })
    }
}
