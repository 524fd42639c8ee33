//! Batch transaction building through the smart send contract
//!
//! [`SmartSend`] turns an arbitrary list of transfers into a bounded sequence
//! of contract calls. Each call carries up to `chunk_limit` transfers and the
//! contract fans the attached value or tokens out to the recipients listed in
//! the call arguments.
//!
//! All validation happens before the first nonce is consumed, so a rejected
//! batch leaves the account's nonce untouched.

use crate::account::Account;
use crate::address::{parse_address, short, Address};
use crate::amount::{TransferAmount, TransferDescriptor};
use crate::chunk::{chunks, sum_transfer_magnitudes};
use crate::error::{Error, Result};
use crate::gas::calculate_gas_limit;
use crate::transaction::{ContractArgument, Interaction, TokenPayment, Transaction};
use crate::types::{NetworkConfig, TransferKind};
use num_traits::ToPrimitive;
use tracing::{debug, info, warn};

/// Contract endpoint for native coin and fungible, meta and semi-fungible tokens
pub const SMART_SEND_FUNCTION: &str = "smartSend";

/// Contract endpoint for non-fungible tokens
pub const SMART_SEND_NFT_FUNCTION: &str = "smartSendNFT";

/// Default maximum number of transfers per transaction
pub const DEFAULT_CHUNK_LIMIT: usize = 100;

/// Builder for smart send batch transactions
pub struct SmartSend<A> {
    account: A,
    network: NetworkConfig,
    contract: Option<Address>,
    chunk_limit: usize,
}

impl<A: Account> SmartSend<A> {
    /// Create a builder without a default contract address
    pub fn new(account: A, network: NetworkConfig) -> Self {
        SmartSend {
            account,
            network,
            contract: None,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
        }
    }

    /// Create a builder that targets `contract` unless a call overrides it
    pub fn with_contract(account: A, network: NetworkConfig, contract: &str) -> Result<Self> {
        let mut builder = Self::new(account, network);
        builder.set_default_contract_address(contract)?;
        Ok(builder)
    }

    /// Set the maximum number of transfers per transaction
    pub fn set_chunk_limit(&mut self, limit: usize) -> Result<()> {
        if limit == 0 {
            return Err(Error::InvalidArgument(
                "chunk limit must be positive".to_string(),
            ));
        }
        self.chunk_limit = limit;
        Ok(())
    }

    /// Set the contract used when a call does not name one
    pub fn set_default_contract_address(&mut self, address: &str) -> Result<()> {
        self.contract = Some(parse_address(address)?);
        Ok(())
    }

    pub fn chunk_limit(&self) -> usize {
        self.chunk_limit
    }

    pub fn default_contract_address(&self) -> Option<Address> {
        self.contract
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn account(&self) -> &A {
        &self.account
    }

    /// Build native coin transfers; each chunk carries the chunk total as value
    pub fn build_native_transactions(
        &self,
        transfers: &[TransferDescriptor],
        gas_per_item: u64,
        contract_address: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        self.build_transactions(TransferKind::Native, transfers, gas_per_item, contract_address)
    }

    /// Build fungible token transfers; each chunk carries one payment of the chunk total
    pub fn build_fungible_transactions(
        &self,
        transfers: &[TransferDescriptor],
        gas_per_item: u64,
        contract_address: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        self.build_transactions(TransferKind::Fungible, transfers, gas_per_item, contract_address)
    }

    /// Build meta-token transfers; each chunk carries one payment of the chunk total
    pub fn build_meta_token_transactions(
        &self,
        transfers: &[TransferDescriptor],
        gas_per_item: u64,
        contract_address: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        self.build_transactions(TransferKind::MetaToken, transfers, gas_per_item, contract_address)
    }

    /// Build NFT transfers; each chunk carries one payment per NFT
    pub fn build_nft_transactions(
        &self,
        transfers: &[TransferDescriptor],
        gas_per_item: u64,
        contract_address: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        self.build_transactions(TransferKind::NonFungible, transfers, gas_per_item, contract_address)
    }

    /// Build semi-fungible token transfers; each chunk carries one payment of the chunk total
    pub fn build_sft_transactions(
        &self,
        transfers: &[TransferDescriptor],
        gas_per_item: u64,
        contract_address: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        self.build_transactions(TransferKind::SemiFungible, transfers, gas_per_item, contract_address)
    }

    /// Build one transaction per chunk of `transfers`, all of kind `kind`
    pub fn build_transactions(
        &self,
        kind: TransferKind,
        transfers: &[TransferDescriptor],
        gas_per_item: u64,
        contract_address: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let contract = self.resolve_contract(contract_address)?;
        validate_batch(kind, transfers)?;

        let batch = chunks(transfers, self.chunk_limit)?;
        let mut planned = Vec::with_capacity(batch.len());
        for chunk in &batch {
            let gas_limit = calculate_gas_limit(kind, chunk.len(), gas_per_item)?;
            let interaction = Interaction::new(contract, function_for(kind), arguments_for(kind, chunk));
            planned.push((attach(kind, interaction, chunk)?, gas_limit, chunk.len()));
        }

        let sender = self.account.address();
        let mut transactions = Vec::with_capacity(planned.len());
        for (index, (interaction, gas_limit, size)) in planned.into_iter().enumerate() {
            let nonce = self.account.nonce_then_increment();
            let transaction = interaction
                .with_chain_id(self.network.chain_id.clone())
                .with_sender(sender)
                .with_nonce(nonce)
                .with_gas_price(self.network.min_gas_price)
                .with_gas_limit(gas_limit)
                .build()?;
            debug!(kind = %kind, chunk = index, size, gas_limit, nonce, "built smart send transaction");
            transactions.push(transaction);
        }

        info!(
            kind = %kind,
            transfers = transfers.len(),
            transactions = transactions.len(),
            sender = %short(&sender),
            contract = %short(&contract),
            "built smart send batch"
        );
        Ok(transactions)
    }

    fn resolve_contract(&self, contract_address: Option<&str>) -> Result<Address> {
        match contract_address {
            Some(address) => parse_address(address),
            None => self.contract.ok_or_else(|| {
                Error::Configuration("no contract address set".to_string())
            }),
        }
    }
}

fn function_for(kind: TransferKind) -> &'static str {
    match kind {
        TransferKind::NonFungible => SMART_SEND_NFT_FUNCTION,
        _ => SMART_SEND_FUNCTION,
    }
}

/// Check that every transfer is of `kind` and names the same token as the first
fn validate_batch(kind: TransferKind, transfers: &[TransferDescriptor]) -> Result<()> {
    let Some(first) = transfers.first() else {
        return match kind {
            TransferKind::Native | TransferKind::NonFungible => Ok(()),
            _ => Err(Error::InvalidArgument(
                "transfers must be non-empty".to_string(),
            )),
        };
    };

    for (index, transfer) in transfers.iter().enumerate() {
        if transfer.kind() != kind {
            warn!(index, expected = %kind, found = %transfer.kind(), "transfer kind mismatch");
            return Err(Error::InvalidArgument(format!(
                "transfer {} is {}, expected {}",
                index,
                transfer.kind(),
                kind
            )));
        }
        // NFTs are attached one by one, so they may mix collections
        if kind != TransferKind::NonFungible && !transfer.amount.same_token(&first.amount) {
            warn!(index, "transfer token differs from the first transfer");
            return Err(Error::InvalidArgument(format!(
                "transfer {} does not share the token of transfer 0",
                index
            )));
        }
    }
    Ok(())
}

fn arguments_for(kind: TransferKind, chunk: &[TransferDescriptor]) -> Vec<ContractArgument> {
    let per_transfer = if kind.has_magnitude() { 2 } else { 3 };
    let mut arguments = Vec::with_capacity(chunk.len() * per_transfer);
    for transfer in chunk {
        arguments.push(ContractArgument::Address(transfer.recipient));
        match &transfer.amount {
            TransferAmount::NonFungible { token_id, serial } => {
                arguments.push(ContractArgument::TokenIdentifier(token_id.clone()));
                arguments.push(ContractArgument::U64(*serial));
            }
            other => {
                // validate_batch guarantees a magnitude for every other kind
                let magnitude = other.magnitude().cloned().unwrap_or_default();
                arguments.push(ContractArgument::BigUint(magnitude));
            }
        }
    }
    arguments
}

/// Attach the chunk's value or token payments to the call
fn attach(kind: TransferKind, interaction: Interaction, chunk: &[TransferDescriptor]) -> Result<Interaction> {
    if kind == TransferKind::NonFungible {
        let payments = chunk
            .iter()
            .filter_map(|transfer| match &transfer.amount {
                TransferAmount::NonFungible { token_id, serial } => Some(TokenPayment::NonFungible {
                    token_id: token_id.clone(),
                    serial: *serial,
                }),
                _ => None,
            })
            .collect();
        return Ok(interaction.with_multi_transfer(payments));
    }

    let total = sum_transfer_magnitudes(chunk);
    let template = chunk
        .first()
        .map(|transfer| &transfer.amount)
        .ok_or_else(|| Error::InvalidArgument("transfers must be non-empty".to_string()))?;

    let interaction = match template {
        TransferAmount::Native { .. } => interaction.with_value(total),
        TransferAmount::Fungible { token_id, decimals, .. } => {
            interaction.with_single_transfer(TokenPayment::Fungible {
                token_id: token_id.clone(),
                amount: total,
                decimals: *decimals,
            })
        }
        TransferAmount::MetaToken {
            token_id,
            serial,
            decimals,
            ..
        } => interaction.with_single_transfer(TokenPayment::MetaToken {
            token_id: token_id.clone(),
            serial: *serial,
            amount: total,
            decimals: *decimals,
        }),
        TransferAmount::SemiFungible { token_id, serial, .. } => {
            let quantity = total.to_u64().ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "semi-fungible quantity {} of {} exceeds u64",
                    total, token_id
                ))
            })?;
            interaction.with_single_transfer(TokenPayment::SemiFungible {
                token_id: token_id.clone(),
                serial: *serial,
                quantity,
            })
        }
        TransferAmount::NonFungible { .. } => {
            return Err(Error::InvalidArgument(
                "NFT transfers cannot be aggregated".to_string(),
            ))
        }
    };
    Ok(interaction)
}
