use super::dual_signer::attach_witnesses;
use crate::crypto::{Ed25519Key, ExtendedKey};
use crate::domain::{
    Bech32Codec, DomainError, DomainResult, KeyRole, SignedTransaction, SigningKeyMaterial,
    SigningMode, UnsignedTransaction, Utxo,
};
use crate::ledger::{
    address_to_bech32, base_address, enterprise_address, parse_address, reward_address,
    reward_address_of, WitnessKey,
};
use crate::provider::ChainProvider;
use secrecy::{ExposeSecret, SecretVec};

/// Which keys a wallet signature covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningScope {
    Payment,
    PaymentAndStake,
}

enum WalletKeys {
    Cli {
        payment: Ed25519Key,
        stake: Option<Ed25519Key>,
    },
    Root {
        payment: ExtendedKey,
        stake: ExtendedKey,
    },
    ReadOnly,
}

/// Addresses and signing keys for one key configuration
pub struct Wallet {
    keys: WalletKeys,
    change_address: String,
    reward_address: Option<String>,
}

impl Wallet {
    pub fn from_material(
        material: &SigningKeyMaterial,
        network_id: u8,
        codec: &dyn Bech32Codec,
    ) -> DomainResult<Self> {
        let (keys, change_address, reward_address) = match material {
            SigningKeyMaterial::CliDualKey {
                payment_secret,
                stake_secret,
            } => {
                let payment = cli_key(KeyRole::Payment, payment_secret)?;
                let stake = stake_secret
                    .as_ref()
                    .map(|secret| cli_key(KeyRole::Stake, secret))
                    .transpose()?;

                let payment_hash = payment.key_hash();
                let (change, reward) = match &stake {
                    Some(stake) => {
                        let stake_hash = stake.key_hash();
                        (
                            base_address(network_id, &payment_hash, &stake_hash),
                            Some(reward_address(network_id, &stake_hash)),
                        )
                    }
                    None => (enterprise_address(network_id, &payment_hash), None),
                };
                (WalletKeys::Cli { payment, stake }, change, reward)
            }
            SigningKeyMaterial::RootExtendedKey { encoded_secret } => {
                let root = ExtendedKey::from_bech32(encoded_secret, codec)?;
                let payment = root.derive_role(KeyRole::Payment);
                let stake = root.derive_role(KeyRole::Stake);

                let payment_hash = payment.key_hash();
                let stake_hash = stake.key_hash();
                (
                    WalletKeys::Root { payment, stake },
                    base_address(network_id, &payment_hash, &stake_hash),
                    Some(reward_address(network_id, &stake_hash)),
                )
            }
            SigningKeyMaterial::ReadOnlyAddress { address } => {
                let address = parse_address(address)?;
                let reward = reward_address_of(&address)?;
                (WalletKeys::ReadOnly, address, reward)
            }
        };

        Ok(Self {
            keys,
            change_address: address_to_bech32(&change_address)?,
            reward_address: reward_address.as_ref().map(address_to_bech32).transpose()?,
        })
    }

    pub fn mode(&self) -> SigningMode {
        match self.keys {
            WalletKeys::Cli { .. } => SigningMode::Cli,
            WalletKeys::Root { .. } => SigningMode::Root,
            WalletKeys::ReadOnly => SigningMode::Address,
        }
    }

    /// Address that receives change and is queried for UTxOs
    pub fn change_address(&self) -> &str {
        &self.change_address
    }

    /// Stake addresses controlled by this wallet (at most one)
    pub fn reward_addresses(&self) -> Vec<String> {
        self.reward_address.iter().cloned().collect()
    }

    pub async fn utxos<P>(&self, provider: &P) -> DomainResult<Vec<Utxo>>
    where
        P: ChainProvider + ?Sized,
    {
        provider.fetch_address_utxos(&self.change_address).await
    }

    pub fn sign_tx(
        &self,
        unsigned: &UnsignedTransaction,
        scope: SigningScope,
    ) -> DomainResult<SignedTransaction> {
        let (payment, stake): (&dyn WitnessKey, Option<&dyn WitnessKey>) = match &self.keys {
            WalletKeys::ReadOnly => return Err(DomainError::ReadOnlyCannotSign),
            WalletKeys::Cli { payment, stake } => (
                payment as &dyn WitnessKey,
                stake.as_ref().map(|k| k as &dyn WitnessKey),
            ),
            WalletKeys::Root { payment, stake } => (
                payment as &dyn WitnessKey,
                Some(stake as &dyn WitnessKey),
            ),
        };

        match scope {
            SigningScope::Payment => attach_witnesses(unsigned, &[payment]),
            SigningScope::PaymentAndStake => {
                let stake = stake.ok_or(DomainError::MissingStakeKey)?;
                attach_witnesses(unsigned, &[payment, stake])
            }
        }
    }
}

fn cli_key(role: KeyRole, secret: &SecretVec<u8>) -> DomainResult<Ed25519Key> {
    let seed = secret.expose_secret();
    if seed.len() != 32 {
        return Err(DomainError::InvalidKeyLength {
            role: role.as_str(),
            actual: seed.len(),
        });
    }
    Ed25519Key::from_seed(seed)
}
