use crate::domain::{Bech32Codec, DomainError, DomainResult, KeyRole};
use crate::ledger::WitnessKey;
use cardano_serialization_lib::{
    make_vkey_witness, Bip32PrivateKey, PublicKey, TransactionHash, Vkeywitness,
};
use secrecy::{ExposeSecret, SecretString};

/// Bech32 prefix of a CIP-1852 root extended signing key
pub const ROOT_KEY_HRP: &str = "root_xsk";

/// Extended secret (64) plus chain code (32)
const XPRV_SIZE: usize = 96;
const HARDENED: u32 = 0x8000_0000;
const PURPOSE: u32 = 1852;
const COIN_TYPE: u32 = 1815;

/// BIP32-Ed25519 extended private key
pub struct ExtendedKey(Bip32PrivateKey);

impl ExtendedKey {
    /// Decode a `root_xsk...` bech32 string
    pub fn from_bech32(encoded: &SecretString, codec: &dyn Bech32Codec) -> DomainResult<Self> {
        let (hrp, bytes) = codec.decode(encoded.expose_secret())?;
        if hrp != ROOT_KEY_HRP {
            return Err(DomainError::InvalidPayload(format!(
                "root key must use the {} prefix, got {}",
                ROOT_KEY_HRP, hrp
            )));
        }

        if bytes.len() != XPRV_SIZE {
            return Err(DomainError::InvalidKeyLength {
                role: "root",
                actual: bytes.len(),
            });
        }

        if !is_clamped(&bytes) {
            return Err(DomainError::InvalidPayload(
                "invalid root key: scalar is not clamped".to_string(),
            ));
        }

        Bip32PrivateKey::from_bytes(&bytes)
            .map(Self)
            .map_err(|e| DomainError::InvalidPayload(format!("invalid root key: {}", e)))
    }

    /// Derive the CIP-1852 key for `role` at account 0, index 0
    pub fn derive_role(&self, role: KeyRole) -> Self {
        let chain = match role {
            KeyRole::Payment => 0,
            KeyRole::Stake => 2,
        };

        Self(
            self.0
                .derive(PURPOSE | HARDENED)
                .derive(COIN_TYPE | HARDENED)
                .derive(HARDENED)
                .derive(chain)
                .derive(0),
        )
    }
}

impl WitnessKey for ExtendedKey {
    fn public_key(&self) -> PublicKey {
        self.0.to_public().to_raw_key()
    }

    fn witness(&self, tx_hash: &TransactionHash) -> Vkeywitness {
        make_vkey_witness(tx_hash, &self.0.to_raw_key())
    }
}

fn is_clamped(bytes: &[u8]) -> bool {
    bytes[0] & 0b0000_0111 == 0 && bytes[31] & 0b1110_0000 == 0b0100_0000
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Bech32;

    fn root_key_bytes() -> Vec<u8> {
        let mut bytes = vec![0x5a; XPRV_SIZE];
        // Clamp the scalar the way wallets generate root keys
        bytes[0] &= 0b1111_1000;
        bytes[31] = (bytes[31] & 0b0001_1111) | 0b0100_0000;
        bytes
    }

    fn encoded_root() -> SecretString {
        SecretString::new(Bech32.encode(ROOT_KEY_HRP, &root_key_bytes()).unwrap())
    }

    #[test]
    fn test_payment_and_stake_keys_differ() {
        let root = ExtendedKey::from_bech32(&encoded_root(), &Bech32).unwrap();
        let payment = root.derive_role(KeyRole::Payment);
        let stake = root.derive_role(KeyRole::Stake);

        assert_ne!(payment.vkey(), stake.vkey());
        assert_ne!(payment.vkey(), root.vkey());
        // Derivation is deterministic
        assert_eq!(payment.vkey(), root.derive_role(KeyRole::Payment).vkey());
    }

    #[test]
    fn test_witness_verifies_as_plain_ed25519() {
        let root = ExtendedKey::from_bech32(&encoded_root(), &Bech32).unwrap();
        let key = root.derive_role(KeyRole::Stake);
        let tx_hash = TransactionHash::from_bytes(vec![3; 32]).unwrap();
        let witness = key.witness(&tx_hash);

        assert_eq!(witness.vkey().public_key().as_bytes(), key.vkey());
        assert!(key
            .public_key()
            .verify(&tx_hash.to_bytes(), &witness.signature()));
    }

    #[test]
    fn test_rejects_wrong_prefix_and_length() {
        let wrong_hrp = SecretString::new(Bech32.encode("acct_xsk", &root_key_bytes()).unwrap());
        assert!(matches!(
            ExtendedKey::from_bech32(&wrong_hrp, &Bech32),
            Err(DomainError::InvalidPayload(_))
        ));

        let short = SecretString::new(Bech32.encode(ROOT_KEY_HRP, &[0u8; 64]).unwrap());
        assert!(matches!(
            ExtendedKey::from_bech32(&short, &Bech32),
            Err(DomainError::InvalidKeyLength { actual: 64, .. })
        ));
    }

    #[test]
    fn test_rejects_unclamped_scalar() {
        let mut bytes = root_key_bytes();
        bytes[0] |= 0b0000_0111;
        let encoded = SecretString::new(Bech32.encode(ROOT_KEY_HRP, &bytes).unwrap());
        assert!(matches!(
            ExtendedKey::from_bech32(&encoded, &Bech32),
            Err(DomainError::InvalidPayload(_))
        ));
    }
}
