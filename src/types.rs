//! Common types and data structures for the Smart Send SDK

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Minimum gas price accepted by the public networks
pub const DEFAULT_MIN_GAS_PRICE: u64 = 1_000_000_000;

/// Network type (Mainnet, Testnet, or Devnet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
}

impl Network {
    /// Chain id stamped on every transaction sent to this network
    pub fn chain_id(&self) -> &'static str {
        match self {
            Network::Mainnet => "1",
            Network::Testnet => "T",
            Network::Devnet => "D",
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(Error::InvalidArgument(format!("unknown network: {}", other))),
        }
    }
}

/// Network parameters needed to stamp a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub chain_id: String,
    pub min_gas_price: u64,
}

impl NetworkConfig {
    pub fn new(chain_id: impl Into<String>) -> Self {
        NetworkConfig {
            chain_id: chain_id.into(),
            min_gas_price: DEFAULT_MIN_GAS_PRICE,
        }
    }

    pub fn for_network(network: Network) -> Self {
        Self::new(network.chain_id())
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::for_network(Network::default())
    }
}

/// The five transfer kinds a smart send batch can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferKind {
    Native,
    Fungible,
    MetaToken,
    NonFungible,
    SemiFungible,
}

impl TransferKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferKind::Native => "native",
            TransferKind::Fungible => "fungible",
            TransferKind::MetaToken => "meta-token",
            TransferKind::NonFungible => "nft",
            TransferKind::SemiFungible => "sft",
        }
    }

    /// Whether transfers of this kind carry a quantity that can be summed
    pub fn has_magnitude(&self) -> bool {
        !matches!(self, TransferKind::NonFungible)
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Utility functions for denominated token amounts
pub mod utils {
    use crate::error::{Error, Result};
    use num_bigint::BigUint;

    /// Number of decimals of the native coin
    pub const NATIVE_DECIMALS: u32 = 18;

    /// Largest number of decimals a token may declare
    pub const MAX_DECIMALS: u32 = 255;

    fn check_decimals(decimals: u32) -> Result<()> {
        if decimals > MAX_DECIMALS {
            return Err(Error::InvalidArgument(format!(
                "{} decimals exceeds the maximum of {}",
                decimals, MAX_DECIMALS
            )));
        }
        Ok(())
    }

    /// Convert a human readable amount into base units
    ///
    /// # Arguments
    /// * `amount` - Decimal string such as `"1.5"` or `"42"`
    /// * `decimals` - Number of decimals of the token
    ///
    /// # Returns
    /// Amount in base units (e.g. `"1.5"` with 18 decimals is `1500000000000000000`)
    ///
    /// # Example
    /// ```
    /// use smart_send_sdk::types::utils::parse_amount;
    ///
    /// let amount = parse_amount("0.05", 2).unwrap();
    /// assert_eq!(amount.to_string(), "5");
    /// ```
    pub fn parse_amount(amount: &str, decimals: u32) -> Result<BigUint> {
        check_decimals(decimals)?;
        let amount = amount.trim();
        let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "invalid amount: {:?}",
                amount
            )));
        }
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(Error::InvalidArgument(format!(
                "invalid amount: {:?}",
                amount
            )));
        }
        if fraction.len() > decimals as usize {
            return Err(Error::InvalidArgument(format!(
                "amount {} has more than {} decimals",
                amount, decimals
            )));
        }

        let mut digits = String::with_capacity(whole.len() + decimals as usize);
        digits.push_str(whole);
        digits.push_str(fraction);
        digits.extend(std::iter::repeat('0').take(decimals as usize - fraction.len()));

        digits
            .parse::<BigUint>()
            .map_err(|e| Error::InvalidArgument(format!("invalid amount {}: {}", amount, e)))
    }

    /// Format base units as a human readable amount
    ///
    /// Trailing fractional zeros are dropped, so `1500000000000000000`
    /// with 18 decimals formats as `"1.5"`. Fails if `decimals` exceeds
    /// [`MAX_DECIMALS`].
    pub fn format_amount(amount: &BigUint, decimals: u32) -> Result<String> {
        check_decimals(decimals)?;
        let digits = amount.to_string();
        let decimals = decimals as usize;
        if decimals == 0 {
            return Ok(digits);
        }

        let padded = if digits.len() <= decimals {
            format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            Ok(whole.to_string())
        } else {
            Ok(format!("{}.{}", whole, fraction))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn test_chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), "1");
        assert_eq!(Network::Testnet.chain_id(), "T");
        assert_eq!(Network::Devnet.chain_id(), "D");
        assert_eq!(NetworkConfig::default().chain_id, "1");
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("DEVNET".parse::<Network>().unwrap(), Network::Devnet);
        assert!("localnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(
            parse_amount("1.5", NATIVE_DECIMALS).unwrap(),
            BigUint::from(1_500_000_000_000_000_000u64)
        );
        assert_eq!(parse_amount("42", 0).unwrap(), BigUint::from(42u32));
        assert_eq!(parse_amount(".25", 2).unwrap(), BigUint::from(25u32));
        assert_eq!(parse_amount("3.", 1).unwrap(), BigUint::from(30u32));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("", 18).is_err());
        assert!(parse_amount(".", 18).is_err());
        assert!(parse_amount("1.2.3", 18).is_err());
        assert!(parse_amount("-1", 18).is_err());
        assert!(parse_amount("1e5", 18).is_err());
        assert!(parse_amount("0.001", 2).is_err());
    }

    #[test]
    fn test_format_amount() {
        let amount = BigUint::from(1_500_000_000_000_000_000u64);
        assert_eq!(format_amount(&amount, 18).unwrap(), "1.5");
        assert_eq!(format_amount(&BigUint::from(5u32), 2).unwrap(), "0.05");
        assert_eq!(format_amount(&BigUint::from(500u32), 2).unwrap(), "5");
        assert_eq!(format_amount(&BigUint::from(7u32), 0).unwrap(), "7");
        assert_eq!(format_amount(&BigUint::default(), 6).unwrap(), "0");
    }

    #[test]
    fn test_decimals_are_capped() {
        assert!(parse_amount("1", MAX_DECIMALS).is_ok());
        assert!(format_amount(&BigUint::from(1u32), MAX_DECIMALS).is_ok());

        let err = parse_amount("1", 2_000_000_000).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = format_amount(&BigUint::from(1u32), MAX_DECIMALS + 1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
