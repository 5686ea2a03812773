use cardano_serialization_lib::{
    Ed25519KeyHash, PublicKey, TransactionHash, TransactionWitnessSet, Vkeywitness, Vkeywitnesses,
};

/// Anything able to sign a transaction body hash on behalf of one key
pub trait WitnessKey {
    /// Public key the witness will carry
    fn public_key(&self) -> PublicKey;

    /// Sign `tx_hash` and pair the signature with the public key
    fn witness(&self, tx_hash: &TransactionHash) -> Vkeywitness;

    fn vkey(&self) -> Vec<u8> {
        self.public_key().as_bytes()
    }

    /// Blake2b-224 of the public key, as used in addresses and certificates
    fn key_hash(&self) -> Ed25519KeyHash {
        self.public_key().hash()
    }
}

/// A witness set holding one vkey witness per key, in the order given
pub fn witness_set(tx_hash: &TransactionHash, keys: &[&dyn WitnessKey]) -> TransactionWitnessSet {
    let mut vkeys = Vkeywitnesses::new();
    for key in keys {
        vkeys.add(&key.witness(tx_hash));
    }

    let mut witness_set = TransactionWitnessSet::new();
    witness_set.set_vkeys(&vkeys);
    witness_set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Ed25519Key;

    #[test]
    fn test_witness_set_keeps_key_order() {
        let first = Ed25519Key::from_seed(&[0x22; 32]).unwrap();
        let second = Ed25519Key::from_seed(&[0x11; 32]).unwrap();
        let tx_hash = TransactionHash::from_bytes(vec![9; 32]).unwrap();

        let set = witness_set(&tx_hash, &[&first, &second]);
        let vkeys = set.vkeys().unwrap();

        assert_eq!(vkeys.len(), 2);
        assert_eq!(vkeys.get(0).vkey().public_key().as_bytes(), first.vkey());
        assert_eq!(vkeys.get(1).vkey().public_key().as_bytes(), second.vkey());
        assert!(set.bootstraps().is_none());
    }

    #[test]
    fn test_empty_key_list() {
        let tx_hash = TransactionHash::from_bytes(vec![9; 32]).unwrap();
        let set = witness_set(&tx_hash, &[]);
        assert_eq!(set.vkeys().map(|v| v.len()).unwrap_or(0), 0);
    }
}
