use super::confirmation::{Confirmation, ConfirmationPoller};
use super::dual_signer::DualWitnessSigner;
use super::tx_builder::TxBuilder;
use super::wallet::{SigningScope, Wallet};
use crate::crypto::Bech32;
use crate::domain::{
    AccountInfo, AppConfig, Bech32Codec, DomainError, DomainResult, Operation, PoolIdentifier,
    SignedTransaction, SigningKeyMaterial, SigningMode, TxInfo,
};
use crate::provider::ChainProvider;
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::info;

/// Result of the `status` operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub network: String,
    pub mode: String,
    pub change_address: String,
    pub utxo_count: usize,
    pub lovelace: u64,
    pub reward_address: Option<String>,
    pub account_info: Option<AccountInfo>,
}

/// Result of an operation that submits a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReport {
    pub tx_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<TxInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationReport {
    Status(StatusReport),
    Submitted(SubmitReport),
}

/// Runs one wallet operation against a chain provider
pub struct Orchestrator<P: ChainProvider> {
    config: AppConfig,
    material: SigningKeyMaterial,
    provider: P,
    codec: Box<dyn Bech32Codec>,
    signer: DualWitnessSigner,
}

impl<P: ChainProvider> Orchestrator<P> {
    pub fn new(config: AppConfig, material: SigningKeyMaterial, provider: P) -> Self {
        Self {
            config,
            material,
            provider,
            codec: Box::new(Bech32),
            signer: DualWitnessSigner::new(),
        }
    }

    pub fn with_codec(mut self, codec: Box<dyn Bech32Codec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn run(&mut self, operation: &Operation) -> DomainResult<OperationReport> {
        info!(
            operation = operation.name(),
            mode = %self.material.mode(),
            network = %self.config.network,
            "running operation"
        );

        match operation {
            Operation::Status => self.status().await.map(OperationReport::Status),
            Operation::Send {
                recipient,
                lovelace,
                message,
            } => self
                .send(recipient, *lovelace, message.as_deref())
                .await
                .map(OperationReport::Submitted),
            Operation::Stake {
                pool_id,
                register,
                message,
            } => self
                .stake(pool_id, *register, message.as_deref())
                .await
                .map(OperationReport::Submitted),
            Operation::Generate { .. } => Err(DomainError::Config(
                "generate does not use a wallet; run it without key material".to_string(),
            )),
        }
    }

    pub async fn status(&self) -> DomainResult<StatusReport> {
        let wallet = self.wallet()?;
        let utxos = wallet.utxos(&self.provider).await?;
        let reward_address = wallet.reward_addresses().into_iter().next();

        let account_info = match &reward_address {
            Some(address) => self.provider.fetch_account_info(address).await?,
            None => None,
        };

        Ok(StatusReport {
            network: self.config.network.to_string(),
            mode: wallet.mode().to_string(),
            change_address: wallet.change_address().to_string(),
            utxo_count: utxos.len(),
            lovelace: utxos.iter().map(|u| u.lovelace).sum(),
            reward_address,
            account_info,
        })
    }

    pub async fn send(
        &mut self,
        recipient: &str,
        lovelace: u64,
        message: Option<&str>,
    ) -> DomainResult<SubmitReport> {
        if !self.material.can_sign() {
            return Err(DomainError::ReadOnlyCannotSign);
        }
        if recipient.trim().is_empty() {
            return Err(DomainError::Config("send needs a recipient address".to_string()));
        }

        let wallet = self.wallet()?;
        let utxos = wallet.utxos(&self.provider).await?;
        let params = self.provider.fetch_protocol_params().await?;

        let mut builder = TxBuilder::new(params, self.codec.as_ref())
            .tx_out(recipient.trim(), lovelace)
            .change_address(wallet.change_address())
            .select_utxos_from(utxos);
        if let Some(message) = message {
            builder = builder.metadata_message(message);
        }
        let unsigned = builder.complete()?;

        let signed = wallet.sign_tx(&unsigned, SigningScope::Payment)?;
        self.submit_and_confirm(&signed).await
    }

    pub async fn stake(
        &mut self,
        pool_id: &str,
        register: bool,
        message: Option<&str>,
    ) -> DomainResult<SubmitReport> {
        match self.material.mode() {
            SigningMode::Cli | SigningMode::Root => {}
            SigningMode::Address => return Err(DomainError::SigningModeUnsupported),
        }
        if !self.material.has_stake_key() {
            return Err(DomainError::MissingStakeKey);
        }
        if pool_id.trim().is_empty() {
            return Err(DomainError::Config("stake needs a pool id".to_string()));
        }

        let wallet = self.wallet()?;
        let reward_address = wallet
            .reward_addresses()
            .into_iter()
            .next()
            .ok_or(DomainError::MissingRewardAddress)?;
        let pool = PoolIdentifier::normalize(pool_id, Some(self.codec.as_ref()))?;
        info!(pool = %pool, %reward_address, register, "delegating stake");

        let utxos = wallet.utxos(&self.provider).await?;
        let params = self.provider.fetch_protocol_params().await?;

        let mut builder = TxBuilder::new(params, self.codec.as_ref());
        if register {
            builder = builder.register_stake_certificate(&reward_address);
        }
        builder = builder
            .delegate_stake_certificate(&reward_address, &pool)
            .select_utxos_from(utxos)
            .change_address(wallet.change_address());
        if let Some(message) = message {
            builder = builder.metadata_message(message);
        }
        let unsigned = builder.complete()?;

        let signed = match &self.material {
            SigningKeyMaterial::CliDualKey {
                payment_secret,
                stake_secret: Some(stake_secret),
            } => self.signer.sign(
                &unsigned,
                payment_secret.expose_secret(),
                stake_secret.expose_secret(),
            )?,
            _ => wallet.sign_tx(&unsigned, SigningScope::PaymentAndStake)?,
        };

        self.submit_and_confirm(&signed).await
    }

    async fn submit_and_confirm(&mut self, signed: &SignedTransaction) -> DomainResult<SubmitReport> {
        let tx_hash = self.provider.submit_tx(signed).await?;
        info!(%tx_hash, "transaction submitted");

        if !self.config.confirm.enabled {
            return Ok(SubmitReport {
                tx_hash,
                confirmed: None,
                attempts: None,
                info: None,
            });
        }

        let Confirmation { info, attempts } = ConfirmationPoller::from(self.config.confirm)
            .confirm(&self.provider, &tx_hash)
            .await?;

        Ok(SubmitReport {
            tx_hash,
            confirmed: Some(true),
            attempts: Some(attempts),
            info: Some(info),
        })
    }

    fn wallet(&self) -> DomainResult<Wallet> {
        Wallet::from_material(&self.material, self.config.network_id, self.codec.as_ref())
    }
}
