//! Chain data providers

pub mod koios;
pub mod memory;

pub use koios::KoiosProvider;
pub use memory::{MemoryProvider, TxInfoResponse};

use crate::domain::{AccountInfo, DomainResult, ProtocolParams, SignedTransaction, TxInfo, Utxo};
use async_trait::async_trait;

/// Read and submit access to the chain.
///
/// Implementations perform one request per call and never retry; retry
/// policy belongs to the caller.
#[async_trait]
pub trait ChainProvider: Send + Sync {
    /// Unspent outputs locked at `address`
    async fn fetch_address_utxos(&self, address: &str) -> DomainResult<Vec<Utxo>>;

    /// Stake account state, or `None` for an address the chain has never seen
    async fn fetch_account_info(&self, stake_address: &str) -> DomainResult<Option<AccountInfo>>;

    /// Inclusion data; `None` while the transaction is not yet visible
    async fn fetch_tx_info(&self, tx_hash: &str) -> DomainResult<Option<TxInfo>>;

    /// Submit a signed transaction, returning the tx hash the provider reports
    async fn submit_tx(&self, tx: &SignedTransaction) -> DomainResult<String>;

    async fn fetch_protocol_params(&self) -> DomainResult<ProtocolParams>;
}
