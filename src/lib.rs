//! # Smart Send SDK
//!
//! A Rust SDK for distributing tokens to many recipients with as few
//! transactions as possible.
//!
//! Transfers are grouped into chunks and each chunk becomes one call to a
//! "smart send" contract, which fans the attached value or tokens out to the
//! recipients listed in the call.
//!
//! ## Features
//!
//! - **Batch Building**: One transaction per chunk for native coin, fungible,
//!   meta, non-fungible and semi-fungible tokens
//! - **Gas Policy**: Flat floors for small batches, linear gas above them
//! - **Exact Amounts**: Arbitrary-precision sums, decimal denomination helpers
//! - **Address Parsing**: bech32 address validation
//!
//! Signing and broadcasting are out of scope: the SDK produces unsigned
//! [`Transaction`] descriptors for a wallet or network SDK to sign.
//!
//! ## Example
//!
//! ```
//! use smart_send_sdk::account::LocalAccount;
//! use smart_send_sdk::smart_send::SmartSend;
//! use smart_send_sdk::{parse_address, Network, NetworkConfig, TransferAmount, TransferDescriptor};
//!
//! # fn example() -> smart_send_sdk::Result<()> {
//! let sender = parse_address("erd1qyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqsl6e0p7")?;
//! let account = LocalAccount::new(sender, 42);
//!
//! let builder = SmartSend::with_contract(
//!     account,
//!     NetworkConfig::for_network(Network::Devnet),
//!     "erd1qqqqqqqqqqqqqpgqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqcnjqwn",
//! )?;
//!
//! let transfers = vec![TransferDescriptor::new(
//!     "erd1qgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqyqszqgpqjv7g5k",
//!     TransferAmount::native(1_000_000_000_000_000_000u64),
//! )?];
//!
//! let transactions = builder.build_native_transactions(&transfers, 600_000, None)?;
//! assert_eq!(transactions[0].nonce, 42);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod account;
pub mod address;
pub mod amount;
pub mod chunk;
pub mod config;
pub mod error;
pub mod gas;
pub mod smart_send;
pub mod transaction;
pub mod types;

pub use error::{Error, Result};

/// Re-export commonly used types
pub use types::*;

/// Re-export utility functions
pub use types::utils;

pub use address::{is_valid_address, parse_address, Address};
pub use amount::{TransferAmount, TransferDescriptor};
pub use chunk::{chunks, sum_amounts};
pub use smart_send::SmartSend;
pub use transaction::{ContractArgument, TokenPayment, Transaction};
