use crate::domain::{DomainError, DomainResult};
use crate::ledger::WitnessKey;
use cardano_serialization_lib::{make_vkey_witness, PrivateKey, PublicKey, TransactionHash, Vkeywitness};
use sp_core::{
    crypto::Pair as PairTrait,
    ed25519::{Pair, Public, Signature},
};

/// Ed25519 key operations
pub struct Ed25519;

impl Ed25519 {
    /// Generate a fresh keypair, returning it with its 32-byte seed
    pub fn generate() -> (Pair, [u8; 32]) {
        Pair::generate()
    }

    /// Build a keypair from a 32-byte seed (cardano-cli normal signing key)
    pub fn from_seed(seed: &[u8]) -> DomainResult<Pair> {
        let seed: [u8; 32] = seed.try_into().map_err(|_| DomainError::InvalidKeyLength {
            role: "ed25519",
            actual: seed.len(),
        })?;

        Ok(Pair::from_seed(&seed))
    }

    /// Sign a message
    pub fn sign(pair: &Pair, message: &[u8]) -> Signature {
        pair.sign(message)
    }

    /// Verify a signature
    pub fn verify(public: &Public, message: &[u8], signature: &Signature) -> bool {
        Pair::verify(signature, message, public)
    }

    /// Raw 32-byte public key
    pub fn public_key_bytes(pair: &Pair) -> [u8; 32] {
        pair.public().0
    }
}

/// A normal Ed25519 signing key able to witness transactions
pub struct Ed25519Key(PrivateKey);

impl Ed25519Key {
    pub fn from_seed(seed: &[u8]) -> DomainResult<Self> {
        if seed.len() != 32 {
            return Err(DomainError::InvalidKeyLength {
                role: "ed25519",
                actual: seed.len(),
            });
        }

        PrivateKey::from_normal_bytes(seed)
            .map(Self)
            .map_err(|e| DomainError::SigningError(e.to_string()))
    }
}

impl WitnessKey for Ed25519Key {
    fn public_key(&self) -> PublicKey {
        self.0.to_public()
    }

    fn witness(&self, tx_hash: &TransactionHash) -> Vkeywitness {
        make_vkey_witness(tx_hash, &self.0)
    }
}

/// Turns a 32-byte seed into a key that can witness a transaction
pub trait KeyDerivation {
    fn derive(&self, seed: &[u8; 32]) -> DomainResult<Box<dyn WitnessKey>>;
}

impl KeyDerivation for Ed25519 {
    fn derive(&self, seed: &[u8; 32]) -> DomainResult<Box<dyn WitnessKey>> {
        Ok(Box::new(Ed25519Key::from_seed(seed)?))
    }
}
