//! Sender accounts and their nonce source

use crate::address::Address;
use std::sync::atomic::{AtomicU64, Ordering};

/// The sending account of a batch
///
/// Implementations must make `nonce_then_increment` atomic: every call returns
/// a value never returned before for this account, in increasing order.
#[cfg_attr(test, mockall::automock)]
pub trait Account {
    /// Address stamped as the sender of every transaction
    fn address(&self) -> Address;

    /// Return the current nonce and advance it by one
    fn nonce_then_increment(&self) -> u64;
}

/// In-memory account whose nonce is tracked locally
///
/// The starting nonce usually comes from the network (the account's current
/// nonce) and is then advanced locally for every transaction built.
#[derive(Debug)]
pub struct LocalAccount {
    address: Address,
    nonce: AtomicU64,
}

impl LocalAccount {
    pub fn new(address: Address, nonce: u64) -> Self {
        LocalAccount {
            address,
            nonce: AtomicU64::new(nonce),
        }
    }

    /// Nonce the next transaction will receive
    pub fn nonce(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }

    /// Resynchronise with the network's view of the account
    pub fn set_nonce(&self, nonce: u64) {
        self.nonce.store(nonce, Ordering::SeqCst);
    }
}

impl Account for LocalAccount {
    fn address(&self) -> Address {
        self.address
    }

    fn nonce_then_increment(&self) -> u64 {
        self.nonce.fetch_add(1, Ordering::SeqCst)
    }
}

impl<A: Account + ?Sized> Account for &A {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn nonce_then_increment(&self) -> u64 {
        (**self).nonce_then_increment()
    }
}

impl<A: Account + ?Sized> Account for std::sync::Arc<A> {
    fn address(&self) -> Address {
        (**self).address()
    }

    fn nonce_then_increment(&self) -> u64 {
        (**self).nonce_then_increment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_nonce_then_increment() {
        let account = LocalAccount::new(Address::new([1u8; 32]), 41);
        assert_eq!(account.nonce_then_increment(), 41);
        assert_eq!(account.nonce_then_increment(), 42);
        assert_eq!(account.nonce(), 43);

        account.set_nonce(7);
        assert_eq!(account.nonce_then_increment(), 7);
    }

    #[test]
    fn test_concurrent_nonces_are_unique() {
        let account = Arc::new(LocalAccount::new(Address::zero(), 0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let account = Arc::clone(&account);
                thread::spawn(move || {
                    (0..250)
                        .map(|_| account.nonce_then_increment())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(seen.insert(nonce));
            }
        }
        assert_eq!(seen.len(), 1000);
        assert_eq!(account.nonce(), 1000);
    }
}
