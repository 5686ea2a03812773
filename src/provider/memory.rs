use super::ChainProvider;
use crate::domain::{
    AccountInfo, DomainError, DomainResult, ProtocolParams, SignedTransaction, TxInfo, Utxo,
};
use crate::ledger::{parse_transaction, tx_hash};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One scripted answer to a tx info query
#[derive(Debug, Clone)]
pub enum TxInfoResponse {
    Missing,
    Error(String),
    Found(TxInfo),
}

/// In-memory chain used by tests and offline runs.
///
/// Tx info answers are consumed in order; once the script runs out every
/// further query reports the transaction as missing.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    utxos: HashMap<String, Vec<Utxo>>,
    accounts: HashMap<String, AccountInfo>,
    params: ProtocolParams,
    reject_submissions: Option<String>,
    tx_info_script: Mutex<VecDeque<TxInfoResponse>>,
    submitted: Mutex<Vec<SignedTransaction>>,
    tx_info_calls: AtomicUsize,
    utxo_calls: AtomicUsize,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_utxos(mut self, address: impl Into<String>, utxos: Vec<Utxo>) -> Self {
        self.utxos.insert(address.into(), utxos);
        self
    }

    pub fn with_account(mut self, info: AccountInfo) -> Self {
        self.accounts.insert(info.stake_address.clone(), info);
        self
    }

    pub fn with_protocol_params(mut self, params: ProtocolParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_tx_info_script(mut self, script: impl IntoIterator<Item = TxInfoResponse>) -> Self {
        if let Ok(queue) = self.tx_info_script.get_mut() {
            queue.extend(script);
        }
        self
    }

    /// Make every submission fail with `reason`
    pub fn rejecting_submissions(mut self, reason: impl Into<String>) -> Self {
        self.reject_submissions = Some(reason.into());
        self
    }

    pub fn tx_info_calls(&self) -> usize {
        self.tx_info_calls.load(Ordering::SeqCst)
    }

    pub fn utxo_calls(&self) -> usize {
        self.utxo_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<SignedTransaction> {
        self.submitted
            .lock()
            .map(|txs| txs.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChainProvider for MemoryProvider {
    async fn fetch_address_utxos(&self, address: &str) -> DomainResult<Vec<Utxo>> {
        self.utxo_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.utxos.get(address).cloned().unwrap_or_default())
    }

    async fn fetch_account_info(&self, stake_address: &str) -> DomainResult<Option<AccountInfo>> {
        Ok(self.accounts.get(stake_address).cloned())
    }

    async fn fetch_tx_info(&self, _tx_hash: &str) -> DomainResult<Option<TxInfo>> {
        self.tx_info_calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .tx_info_script
            .lock()
            .map_err(|_| DomainError::ProviderError("tx info script poisoned".to_string()))?
            .pop_front();

        match next {
            None | Some(TxInfoResponse::Missing) => Ok(None),
            Some(TxInfoResponse::Error(reason)) => Err(DomainError::ProviderError(reason)),
            Some(TxInfoResponse::Found(info)) => Ok(Some(info)),
        }
    }

    async fn submit_tx(&self, tx: &SignedTransaction) -> DomainResult<String> {
        if let Some(reason) = &self.reject_submissions {
            return Err(DomainError::SubmissionError(reason.clone()));
        }

        let tx_hash = tx_hash(&parse_transaction(tx.as_bytes())?)?.to_hex();
        self.submitted
            .lock()
            .map_err(|_| DomainError::ProviderError("submission log poisoned".to_string()))?
            .push(tx.clone());
        Ok(tx_hash)
    }

    async fn fetch_protocol_params(&self) -> DomainResult<ProtocolParams> {
        Ok(self.params)
    }
}
