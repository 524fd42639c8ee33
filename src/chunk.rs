//! Batch partitioning and amount aggregation helpers

use crate::amount::TransferDescriptor;
use crate::error::{Error, Result};
use num_bigint::BigUint;

/// Split `items` into contiguous chunks of at most `size` elements
///
/// Every chunk except possibly the last has exactly `size` elements and the
/// input order is preserved. An empty input yields no chunks.
///
/// # Example
/// ```
/// use smart_send_sdk::chunk::chunks;
///
/// let parts = chunks(&[1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(parts, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn chunks<T>(items: &[T], size: usize) -> Result<Vec<&[T]>> {
    if size == 0 {
        return Err(Error::InvalidArgument(
            "chunk size must be positive".to_string(),
        ));
    }
    Ok(items.chunks(size).collect())
}

/// Exact sum of arbitrary-precision amounts; zero for an empty input
pub fn sum_amounts<'a, I>(amounts: I) -> BigUint
where
    I: IntoIterator<Item = &'a BigUint>,
{
    amounts.into_iter().sum()
}

/// Sum the magnitudes of a set of transfers
///
/// Non-fungible transfers carry no magnitude and contribute nothing.
pub fn sum_transfer_magnitudes(transfers: &[TransferDescriptor]) -> BigUint {
    sum_amounts(transfers.iter().filter_map(|t| t.amount.magnitude()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::amount::TransferAmount;

    #[test]
    fn test_chunks_with_remainder() {
        let items: Vec<u32> = (0..250).collect();
        let parts = chunks(&items, 100).unwrap();
        let sizes: Vec<usize> = parts.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
        assert_eq!(parts[2][0], 200);
    }

    #[test]
    fn test_chunks_exact_multiple() {
        let items = [1, 2, 3, 4];
        assert_eq!(chunks(&items, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_chunks_empty_input() {
        let items: [u8; 0] = [];
        assert!(chunks(&items, 3).unwrap().is_empty());
    }

    #[test]
    fn test_chunks_zero_size() {
        let err = chunks(&[1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_sum_amounts() {
        let amounts = vec![
            BigUint::from(u64::MAX),
            BigUint::from(u64::MAX),
            BigUint::from(2u32),
        ];
        let expected = BigUint::from(u64::MAX as u128 * 2 + 2);
        assert_eq!(sum_amounts(&amounts), expected);
        assert_eq!(sum_amounts(std::iter::empty::<&BigUint>()), BigUint::default());
    }

    #[test]
    fn test_sum_transfer_magnitudes_skips_nfts() {
        let to = Address::new([9u8; 32]);
        let transfers = vec![
            TransferDescriptor::from_address(to, TransferAmount::semi_fungible("SFT-aaaaaa", 1, 4u32)),
            TransferDescriptor::from_address(to, TransferAmount::non_fungible("NFT-bbbbbb", 2)),
            TransferDescriptor::from_address(to, TransferAmount::semi_fungible("SFT-aaaaaa", 1, 6u32)),
        ];
        assert_eq!(sum_transfer_magnitudes(&transfers), BigUint::from(10u32));
    }
}
