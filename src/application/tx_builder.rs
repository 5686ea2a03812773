use crate::domain::{
    Bech32Codec, DomainError, DomainResult, PoolIdentifier, ProtocolParams, UnsignedTransaction,
    Utxo,
};
use crate::ledger::{message_auxiliary_data, parse_address, stake_credential, to_lovelace};
use cardano_serialization_lib::{
    BigNum, Certificate, CertificatesBuilder, CoinSelectionStrategyCIP2, Ed25519KeyHash,
    LinearFee, StakeDelegation, StakeRegistration, TransactionBuilder,
    TransactionBuilderConfig, TransactionBuilderConfigBuilder, TransactionHash, TransactionInput,
    TransactionOutput, TransactionUnspentOutput, TransactionUnspentOutputs, Value,
};
use tracing::debug;

/// Mainnet pool registration deposit; never charged by this builder
const POOL_DEPOSIT: u64 = 500_000_000;
const MAX_VALUE_SIZE: u32 = 5_000;

enum CertificateRequest {
    Registration { reward_address: String },
    Delegation { reward_address: String, pool: PoolIdentifier },
}

/// ADA-only transaction builder.
///
/// Collects outputs, stake certificates and an optional message, then
/// selects inputs largest-first, balances the fee and returns the unsigned
/// transaction.
pub struct TxBuilder<'a> {
    params: ProtocolParams,
    codec: &'a dyn Bech32Codec,
    outputs: Vec<(String, u64)>,
    certificates: Vec<CertificateRequest>,
    message: Option<String>,
    change_address: Option<String>,
    utxos: Vec<Utxo>,
}

impl<'a> TxBuilder<'a> {
    pub fn new(params: ProtocolParams, codec: &'a dyn Bech32Codec) -> Self {
        Self {
            params,
            codec,
            outputs: Vec::new(),
            certificates: Vec::new(),
            message: None,
            change_address: None,
            utxos: Vec::new(),
        }
    }

    pub fn tx_out(mut self, address: &str, lovelace: u64) -> Self {
        self.outputs.push((address.to_string(), lovelace));
        self
    }

    pub fn register_stake_certificate(mut self, reward_address: &str) -> Self {
        self.certificates.push(CertificateRequest::Registration {
            reward_address: reward_address.to_string(),
        });
        self
    }

    pub fn delegate_stake_certificate(mut self, reward_address: &str, pool: &PoolIdentifier) -> Self {
        self.certificates.push(CertificateRequest::Delegation {
            reward_address: reward_address.to_string(),
            pool: pool.clone(),
        });
        self
    }

    /// Attach a CIP-20 message
    pub fn metadata_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn change_address(mut self, address: &str) -> Self {
        self.change_address = Some(address.to_string());
        self
    }

    /// UTxOs to pay from; outputs carrying native assets are never spent
    pub fn select_utxos_from(mut self, utxos: Vec<Utxo>) -> Self {
        self.utxos = utxos;
        self
    }

    pub fn complete(self) -> DomainResult<UnsignedTransaction> {
        let change = match &self.change_address {
            Some(address) => parse_address(address)?,
            None => return Err(DomainError::InvalidPayload("change address not set".to_string())),
        };

        let mut builder = TransactionBuilder::new(&self.config()?);

        let mut output_total = 0u64;
        for (address, lovelace) in &self.outputs {
            let output = TransactionOutput::new(
                &parse_address(address)?,
                &Value::new(&BigNum::from(*lovelace)),
            );
            builder.add_output(&output).map_err(|e| {
                DomainError::InvalidPayload(format!("output of {} lovelace rejected: {}", lovelace, e))
            })?;
            output_total = add(output_total, *lovelace)?;
        }

        let deposit = self.add_certificates(&mut builder)?;
        if let Some(message) = &self.message {
            builder.set_auxiliary_data(&message_auxiliary_data(message)?);
        }

        let (candidates, available) = self.candidates()?;
        let required = add(add(output_total, deposit)?, self.params.min_fee(0))?;
        let insufficient = || DomainError::InsufficientFunds {
            required,
            available,
        };
        if available < required {
            return Err(insufficient());
        }

        builder
            .add_inputs_from(&candidates, CoinSelectionStrategyCIP2::LargestFirst)
            .map_err(|_| insufficient())?;
        // Leftover too small for a change output is added to the fee
        builder.add_change_if_needed(&change).map_err(|_| insufficient())?;

        let tx = builder
            .build_tx()
            .map_err(|e| DomainError::InvalidPayload(e.to_string()))?;
        let body = tx.body();
        debug!(
            inputs = body.inputs().len(),
            fee = to_lovelace(&body.fee())?,
            deposit,
            "transaction balanced"
        );

        Ok(UnsignedTransaction::from_bytes(tx.to_bytes()))
    }

    fn config(&self) -> DomainResult<TransactionBuilderConfig> {
        TransactionBuilderConfigBuilder::new()
            .fee_algo(&LinearFee::new(
                &BigNum::from(self.params.tx_fee_per_byte),
                &BigNum::from(self.params.tx_fee_fixed),
            ))
            .pool_deposit(&BigNum::from(POOL_DEPOSIT))
            .key_deposit(&BigNum::from(self.params.stake_address_deposit))
            .max_value_size(MAX_VALUE_SIZE)
            .max_tx_size(u32::try_from(self.params.max_tx_size).unwrap_or(u32::MAX))
            .coins_per_utxo_byte(&BigNum::from(self.params.utxo_cost_per_byte))
            .build()
            .map_err(|e| DomainError::InvalidPayload(format!("protocol parameters: {}", e)))
    }

    /// Ada-only UTxOs as builder inputs, with their total
    fn candidates(&self) -> DomainResult<(TransactionUnspentOutputs, u64)> {
        let mut candidates = TransactionUnspentOutputs::new();
        let mut available = 0u64;

        for utxo in self.utxos.iter().filter(|u| !u.has_assets()) {
            let tx_hash = TransactionHash::from_hex(&utxo.tx_hash).map_err(|e| {
                DomainError::InvalidPayload(format!("utxo hash {}: {}", utxo.tx_hash, e))
            })?;
            let output = TransactionOutput::new(
                &parse_address(&utxo.address)?,
                &Value::new(&BigNum::from(utxo.lovelace)),
            );
            candidates.add(&TransactionUnspentOutput::new(
                &TransactionInput::new(&tx_hash, utxo.tx_index),
                &output,
            ));
            available = add(available, utxo.lovelace)?;
        }

        Ok((candidates, available))
    }

    /// Add the requested certificates, returning the deposit they lock
    fn add_certificates(&self, builder: &mut TransactionBuilder) -> DomainResult<u64> {
        if self.certificates.is_empty() {
            return Ok(0);
        }

        let mut certificates = CertificatesBuilder::new();
        let mut deposit = 0u64;

        for request in &self.certificates {
            let certificate = match request {
                CertificateRequest::Registration { reward_address } => {
                    let credential = stake_credential(reward_address)?;
                    deposit = add(deposit, self.params.stake_address_deposit)?;
                    Certificate::new_stake_registration(&StakeRegistration::new(&credential))
                }
                CertificateRequest::Delegation {
                    reward_address,
                    pool,
                } => {
                    let credential = stake_credential(reward_address)?;
                    let pool_hash = Ed25519KeyHash::from_bytes(pool.key_hash(self.codec)?.to_vec())
                        .map_err(|_| DomainError::InvalidPoolId(pool.to_string()))?;
                    Certificate::new_stake_delegation(&StakeDelegation::new(&credential, &pool_hash))
                }
            };
            certificates
                .add(&certificate)
                .map_err(|e| DomainError::InvalidPayload(format!("certificate rejected: {}", e)))?;
        }

        builder.set_certs_builder(&certificates);
        Ok(deposit)
    }
}

fn add(a: u64, b: u64) -> DomainResult<u64> {
    a.checked_add(b)
        .ok_or_else(|| DomainError::InvalidPayload("lovelace amount overflow".to_string()))
}
