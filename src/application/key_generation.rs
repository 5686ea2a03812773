use super::wallet::Wallet;
use crate::crypto::Ed25519;
use crate::domain::{
    Bech32Codec, DomainError, DomainResult, KeyRole, Network, SigningKeyMaterial,
};
use crate::storage::{CardanoKeyFile, KeyWriter};
use secrecy::{ExposeSecret, SecretVec};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A freshly generated payment + stake key pair and its addresses
pub struct GeneratedWallet {
    pub network: Network,
    pub network_id: u8,
    pub payment_seed: SecretVec<u8>,
    pub stake_seed: SecretVec<u8>,
    pub payment_vkey: [u8; 32],
    pub stake_vkey: [u8; 32],
    pub base_address: String,
    pub stake_address: String,
}

/// Printable summary of a generated wallet, including the `cborHex` values
/// the key environment variables take
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletDossier {
    pub network: String,
    pub network_id: u8,
    pub base_address: String,
    pub stake_address: String,
    pub payment_skey_cbor_hex: String,
    pub stake_skey_cbor_hex: String,
    pub payment_vkey_cbor_hex: String,
    pub stake_vkey_cbor_hex: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
}

/// Contents of `addresses.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressesFile {
    pub network: String,
    pub base_address: String,
    pub stake_address: String,
}

/// Key generation use case
pub struct KeyGeneration;

impl KeyGeneration {
    /// Generate random payment and stake keys
    pub fn generate(
        network: Network,
        network_id: u8,
        codec: &dyn Bech32Codec,
    ) -> DomainResult<GeneratedWallet> {
        let (_, payment_seed) = Ed25519::generate();
        let (_, stake_seed) = Ed25519::generate();
        Self::from_seeds(network, network_id, &payment_seed, &stake_seed, codec)
    }

    /// Build a wallet from known seeds
    pub fn from_seeds(
        network: Network,
        network_id: u8,
        payment_seed: &[u8; 32],
        stake_seed: &[u8; 32],
        codec: &dyn Bech32Codec,
    ) -> DomainResult<GeneratedWallet> {
        let material = SigningKeyMaterial::CliDualKey {
            payment_secret: SecretVec::new(payment_seed.to_vec()),
            stake_secret: Some(SecretVec::new(stake_seed.to_vec())),
        };
        let wallet = Wallet::from_material(&material, network_id, codec)?;
        let stake_address = wallet
            .reward_addresses()
            .into_iter()
            .next()
            .ok_or(DomainError::MissingRewardAddress)?;

        Ok(GeneratedWallet {
            network,
            network_id,
            payment_seed: SecretVec::new(payment_seed.to_vec()),
            stake_seed: SecretVec::new(stake_seed.to_vec()),
            payment_vkey: Ed25519::public_key_bytes(&Ed25519::from_seed(payment_seed)?),
            stake_vkey: Ed25519::public_key_bytes(&Ed25519::from_seed(stake_seed)?),
            base_address: wallet.change_address().to_string(),
            stake_address,
        })
    }

    /// Write key files and `addresses.json` into `dir`, returning the paths
    pub fn write_wallet_dir(wallet: &GeneratedWallet, dir: &Path) -> DomainResult<Vec<PathBuf>> {
        let (payment_skey, payment_vkey) = KeyWriter::write_cardano_key_pair(
            KeyRole::Payment,
            wallet.payment_seed.expose_secret(),
            &wallet.payment_vkey,
            dir,
        )?;
        let (stake_skey, stake_vkey) = KeyWriter::write_cardano_key_pair(
            KeyRole::Stake,
            wallet.stake_seed.expose_secret(),
            &wallet.stake_vkey,
            dir,
        )?;
        let addresses = KeyWriter::write_json(
            &AddressesFile {
                network: wallet.network.to_string(),
                base_address: wallet.base_address.clone(),
                stake_address: wallet.stake_address.clone(),
            },
            &dir.join("addresses.json"),
        )?;

        Ok(vec![addresses, payment_skey, stake_skey, payment_vkey, stake_vkey])
    }
}

impl GeneratedWallet {
    pub fn dossier(&self, files: Vec<PathBuf>) -> DomainResult<WalletDossier> {
        let payment_skey =
            CardanoKeyFile::signing_key(KeyRole::Payment, self.payment_seed.expose_secret())?;
        let stake_skey = CardanoKeyFile::signing_key(KeyRole::Stake, self.stake_seed.expose_secret())?;
        let payment_vkey = CardanoKeyFile::verification_key(KeyRole::Payment, &self.payment_vkey)?;
        let stake_vkey = CardanoKeyFile::verification_key(KeyRole::Stake, &self.stake_vkey)?;

        Ok(WalletDossier {
            network: self.network.to_string(),
            network_id: self.network_id,
            base_address: self.base_address.clone(),
            stake_address: self.stake_address.clone(),
            payment_skey_cbor_hex: payment_skey.cbor_hex,
            stake_skey_cbor_hex: stake_skey.cbor_hex,
            payment_vkey_cbor_hex: payment_vkey.cbor_hex,
            stake_vkey_cbor_hex: stake_vkey.cbor_hex,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Bech32;
    use crate::domain::{KeyInputs, SigningMode};
    use crate::storage::KeyReader;
    use secrecy::SecretString;
    use tempfile::TempDir;

    #[test]
    fn test_generate_produces_distinct_keys() {
        let wallet = KeyGeneration::generate(Network::Preprod, 0, &Bech32).unwrap();

        assert_ne!(
            wallet.payment_seed.expose_secret(),
            wallet.stake_seed.expose_secret()
        );
        assert!(wallet.base_address.starts_with("addr_test1"));
        assert!(wallet.stake_address.starts_with("stake_test1"));
    }

    #[test]
    fn test_dossier_round_trips_through_resolver() {
        let wallet =
            KeyGeneration::from_seeds(Network::Api, 1, &[0x11; 32], &[0x22; 32], &Bech32).unwrap();
        let dossier = wallet.dossier(Vec::new()).unwrap();

        assert!(dossier.base_address.starts_with("addr1"));
        assert_eq!(dossier.payment_skey_cbor_hex, format!("5820{}", "11".repeat(32)));

        let material = SigningKeyMaterial::resolve(KeyInputs {
            payment_secret_hex: Some(SecretString::new(dossier.payment_skey_cbor_hex.clone())),
            stake_secret_hex: Some(SecretString::new(dossier.stake_skey_cbor_hex.clone())),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(material.mode(), SigningMode::Cli);

        let restored = Wallet::from_material(&material, 1, &Bech32).unwrap();
        assert_eq!(restored.change_address(), dossier.base_address);

        let json = serde_json::to_value(&dossier).unwrap();
        assert!(json.get("files").is_none());
        assert_eq!(json["networkId"], 1);
    }

    #[test]
    fn test_write_wallet_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("wallet");
        let wallet =
            KeyGeneration::from_seeds(Network::Preview, 0, &[0x11; 32], &[0x22; 32], &Bech32).unwrap();

        let files = KeyGeneration::write_wallet_dir(&wallet, &dir).unwrap();
        assert_eq!(files.len(), 5);
        assert!(files.iter().all(|f| f.exists()));

        let addresses: AddressesFile =
            serde_json::from_str(&std::fs::read_to_string(dir.join("addresses.json")).unwrap())
                .unwrap();
        assert_eq!(addresses.network, "preview");
        assert_eq!(addresses.base_address, wallet.base_address);

        let stake_hex = KeyReader::load_signing_key_hex(&dir.join("stake.skey"), KeyRole::Stake).unwrap();
        assert_eq!(stake_hex.expose_secret(), &format!("5820{}", "22".repeat(32)));
    }
}
