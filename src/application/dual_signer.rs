use crate::crypto::{Ed25519, KeyDerivation};
use crate::domain::{DomainError, DomainResult, SignedTransaction, UnsignedTransaction};
use crate::ledger::{parse_transaction, tx_hash, witness_set, WitnessKey};
use tracing::debug;

/// Replace the witness set of `unsigned` with one vkey witness per key, in
/// order.
///
/// Body and auxiliary data bytes are carried over unchanged.
pub fn attach_witnesses(
    unsigned: &UnsignedTransaction,
    keys: &[&dyn WitnessKey],
) -> DomainResult<SignedTransaction> {
    let mut tx = parse_transaction(unsigned.as_bytes())?;
    let witnesses = witness_set(&tx.transaction_hash(), keys);

    tx.set_witness_set(&witnesses.to_bytes())
        .map_err(|e| DomainError::SigningError(e.to_string()))?;

    debug!(tx_hash = %tx_hash(&tx)?, witnesses = keys.len(), "attached vkey witnesses");
    Ok(SignedTransaction::from_bytes(tx.to_bytes()))
}

/// Signs transactions that need both the payment and the stake key,
/// such as stake registration and delegation.
pub struct DualWitnessSigner<D: KeyDerivation = Ed25519> {
    derivation: D,
}

impl DualWitnessSigner<Ed25519> {
    pub fn new() -> Self {
        Self::with_derivation(Ed25519)
    }
}

impl Default for DualWitnessSigner<Ed25519> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: KeyDerivation> DualWitnessSigner<D> {
    pub fn with_derivation(derivation: D) -> Self {
        Self { derivation }
    }

    /// Witness `unsigned` with exactly two keys: payment, then stake.
    ///
    /// Both secrets must be 32-byte Ed25519 seeds; lengths are checked before
    /// anything is parsed or derived.
    pub fn sign(
        &self,
        unsigned: &UnsignedTransaction,
        payment_secret: &[u8],
        stake_secret: &[u8],
    ) -> DomainResult<SignedTransaction> {
        let payment_seed = seed("payment", payment_secret)?;
        let stake_seed = seed("stake", stake_secret)?;

        // Fail on malformed bytes before touching key material
        parse_transaction(unsigned.as_bytes())?;

        let payment = self.derivation.derive(&payment_seed).map_err(signing_error)?;
        let stake = self.derivation.derive(&stake_seed).map_err(signing_error)?;

        attach_witnesses(unsigned, &[payment.as_ref(), stake.as_ref()])
    }
}

fn seed(role: &'static str, secret: &[u8]) -> DomainResult<[u8; 32]> {
    secret.try_into().map_err(|_| DomainError::InvalidKeyLength {
        role,
        actual: secret.len(),
    })
}

fn signing_error(e: DomainError) -> DomainError {
    match e {
        DomainError::SigningError(_) => e,
        other => DomainError::SigningError(other.to_string()),
    }
}
