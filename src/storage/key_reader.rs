use crate::domain::{DomainError, DomainResult, KeyRole};
use crate::storage::cardano_format::CardanoKeyFile;
use secrecy::SecretString;
use std::path::Path;

/// Read keys from cardano-cli key files
pub struct KeyReader;

impl KeyReader {
    /// Read a Cardano-style key file (.skey or .vkey)
    pub fn read_cardano_key_file(path: &Path) -> DomainResult<CardanoKeyFile> {
        if !path.exists() {
            return Err(DomainError::KeyFileNotFound {
                path: path.to_path_buf(),
            });
        }

        CardanoKeyFile::read_from_file(path)
    }

    /// Load the `cborHex` of a `.skey` file for `role`.
    ///
    /// The value is returned in the same form the key environment variables
    /// take, so both sources go through the same resolver.
    pub fn load_signing_key_hex(path: &Path, role: KeyRole) -> DomainResult<SecretString> {
        let card_file = Self::read_cardano_key_file(path)?;

        if !card_file.is_signing_key() {
            return Err(DomainError::InvalidKeyFile {
                reason: format!("{} is not a signing key (.skey)", path.display()),
            });
        }
        let found = card_file.role()?;
        if found != role {
            return Err(DomainError::InvalidKeyFile {
                reason: format!("expected a {} key, found a {} key", role, found),
            });
        }

        // Validates the envelope before handing the hex on
        card_file.decode_key_bytes()?;
        Ok(SecretString::new(card_file.cbor_hex))
    }
}
