//! Gas limit policy for smart send transactions
//!
//! Small batches are dominated by the contract's fixed execution cost, so
//! they get a flat floor. From [`SMALL_BATCH_THRESHOLD`] transfers upwards the
//! limit grows linearly with the number of transfers:
//!
//! gas_limit = len < 7 ? floor(kind) : len × gas_per_item
//!
//! The floors and the threshold are what the smart send contract expects and
//! must not be tuned.

use crate::error::{Error, Result};
use crate::types::TransferKind;

/// Batches shorter than this use the flat floor
pub const SMALL_BATCH_THRESHOLD: usize = 7;

/// Flat gas limit for small native coin batches
pub const NATIVE_GAS_FLOOR: u64 = 40_000_000;

/// Flat gas limit for small token batches (all token kinds)
pub const TOKEN_GAS_FLOOR: u64 = 60_000_000;

/// Default per-transfer gas for native coin batches
pub const DEFAULT_NATIVE_GAS_PER_ITEM: u64 = 600_000;

/// Default per-transfer gas for token batches
pub const DEFAULT_TOKEN_GAS_PER_ITEM: u64 = 900_000;

/// Flat gas limit used for small batches of `kind`
pub fn gas_floor(kind: TransferKind) -> u64 {
    match kind {
        TransferKind::Native => NATIVE_GAS_FLOOR,
        _ => TOKEN_GAS_FLOOR,
    }
}

/// Default per-transfer gas for `kind`
pub fn default_gas_per_item(kind: TransferKind) -> u64 {
    match kind {
        TransferKind::Native => DEFAULT_NATIVE_GAS_PER_ITEM,
        _ => DEFAULT_TOKEN_GAS_PER_ITEM,
    }
}

/// Gas limit for one chunk of `chunk_len` transfers
///
/// # Example
/// ```
/// use smart_send_sdk::gas::calculate_gas_limit;
/// use smart_send_sdk::TransferKind;
///
/// assert_eq!(calculate_gas_limit(TransferKind::Native, 6, 600_000).unwrap(), 40_000_000);
/// assert_eq!(calculate_gas_limit(TransferKind::Fungible, 7, 900_000).unwrap(), 6_300_000);
/// ```
pub fn calculate_gas_limit(kind: TransferKind, chunk_len: usize, gas_per_item: u64) -> Result<u64> {
    if chunk_len < SMALL_BATCH_THRESHOLD {
        return Ok(gas_floor(kind));
    }
    (chunk_len as u64).checked_mul(gas_per_item).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "gas limit overflows: {} transfers × {} gas",
            chunk_len, gas_per_item
        ))
    })
}
