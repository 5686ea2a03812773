use crate::domain::{DomainError, DomainResult, KeyRole};
use serde::{Deserialize, Serialize};
use serde_cbor::Value;
use std::path::Path;

/// cardano-cli JSON text envelope
/// Matches the `.skey` / `.vkey` files cardano-cli writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardanoKeyFile {
    /// Type descriptor (e.g., "PaymentSigningKeyShelley_ed25519")
    #[serde(rename = "type")]
    pub key_type: String,

    /// Human-readable description
    pub description: String,

    /// CBOR byte string holding the key, as lowercase hex
    #[serde(rename = "cborHex")]
    pub cbor_hex: String,
}

impl CardanoKeyFile {
    /// Envelope for a 32-byte signing key seed
    pub fn signing_key(role: KeyRole, seed: &[u8]) -> DomainResult<Self> {
        Ok(Self {
            key_type: role.signing_key_descriptor(),
            description: format!("{} Signing Key", role.capitalized_name()),
            cbor_hex: encode_key_bytes(seed)?,
        })
    }

    /// Envelope for a 32-byte verification key
    pub fn verification_key(role: KeyRole, vkey: &[u8]) -> DomainResult<Self> {
        Ok(Self {
            key_type: role.verification_key_descriptor(),
            description: format!("{} Verification Key", role.capitalized_name()),
            cbor_hex: encode_key_bytes(vkey)?,
        })
    }

    /// Parse the CBOR hex field and extract key bytes
    pub fn decode_key_bytes(&self) -> DomainResult<Vec<u8>> {
        let cbor_bytes = hex::decode(&self.cbor_hex).map_err(|e| DomainError::InvalidKeyFile {
            reason: format!("Invalid CBOR hex: {}", e),
        })?;

        match serde_cbor::from_slice(&cbor_bytes) {
            Ok(Value::Bytes(bytes)) => Ok(bytes),
            Ok(_) => Err(DomainError::InvalidKeyFile {
                reason: "cborHex is not a CBOR byte string".to_string(),
            }),
            Err(e) => Err(DomainError::InvalidKeyFile {
                reason: format!("Invalid CBOR encoding: {}", e),
            }),
        }
    }

    /// Key role named by the type descriptor
    pub fn role(&self) -> DomainResult<KeyRole> {
        KeyRole::from_descriptor(&self.key_type)
    }

    pub fn read_from_file(path: &Path) -> DomainResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let key_file: Self = serde_json::from_str(&contents)?;
        Ok(key_file)
    }

    pub fn write_to_file(&self, path: &Path) -> DomainResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check if this is a signing key (contains "Signing" in type)
    pub fn is_signing_key(&self) -> bool {
        self.key_type.contains("Signing")
    }

    /// Check if this is a verification key (contains "Verification" in type)
    pub fn is_verification_key(&self) -> bool {
        self.key_type.contains("Verification")
    }
}

fn encode_key_bytes(bytes: &[u8]) -> DomainResult<String> {
    let cbor_bytes = serde_cbor::to_vec(&Value::Bytes(bytes.to_vec()))?;
    Ok(hex::encode(cbor_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_matches_cardano_cli_layout() {
        let card_file = CardanoKeyFile::signing_key(KeyRole::Payment, &[0x11; 32]).unwrap();

        assert_eq!(card_file.key_type, "PaymentSigningKeyShelley_ed25519");
        assert_eq!(card_file.description, "Payment Signing Key");
        assert_eq!(card_file.cbor_hex, format!("5820{}", "11".repeat(32)));
        assert!(card_file.is_signing_key());
        assert_eq!(card_file.role().unwrap(), KeyRole::Payment);
    }

    #[test]
    fn test_verification_key() {
        let card_file = CardanoKeyFile::verification_key(KeyRole::Stake, &[0xab; 32]).unwrap();

        assert_eq!(card_file.key_type, "StakeVerificationKeyShelley_ed25519");
        assert!(card_file.is_verification_key());
        assert!(!card_file.is_signing_key());
        assert_eq!(card_file.decode_key_bytes().unwrap(), vec![0xab; 32]);
    }

    #[test]
    fn test_decode_rejects_non_bytes() {
        let card_file = CardanoKeyFile {
            key_type: "PaymentSigningKeyShelley_ed25519".to_string(),
            description: String::new(),
            // CBOR array [1, 2]
            cbor_hex: "820102".to_string(),
        };
        assert!(matches!(
            card_file.decode_key_bytes(),
            Err(DomainError::InvalidKeyFile { .. })
        ));
    }

    #[test]
    fn test_json_field_names() {
        let card_file = CardanoKeyFile::signing_key(KeyRole::Stake, &[1; 32]).unwrap();

        let json = serde_json::to_string_pretty(&card_file).unwrap();
        assert!(json.contains("\"type\""));
        assert!(json.contains("StakeSigningKeyShelley_ed25519"));
        assert!(json.contains("\"cborHex\""));

        let deserialized: CardanoKeyFile = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, card_file);
    }
}
