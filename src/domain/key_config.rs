use super::error::{DomainError, DomainResult};
use secrecy::{ExposeSecret, SecretString, SecretVec};
use serde_cbor::Value;
use std::fmt;

/// Raw credential inputs as they arrive at the process boundary.
///
/// Empty strings are treated as absent, matching how unset environment
/// variables reach the CLI.
#[derive(Default)]
pub struct KeyInputs {
    pub payment_secret_hex: Option<SecretString>,
    pub stake_secret_hex: Option<SecretString>,
    pub root_key_bech32: Option<SecretString>,
    pub address: Option<String>,
}

/// The one signing configuration active for a session
pub enum SigningKeyMaterial {
    /// cardano-cli style normal Ed25519 keys
    CliDualKey {
        payment_secret: SecretVec<u8>,
        stake_secret: Option<SecretVec<u8>>,
    },
    /// Bech32 encoded root extended private key (root_xsk...)
    RootExtendedKey { encoded_secret: SecretString },
    /// Watch-only wallet
    ReadOnlyAddress { address: String },
}

/// Signing mode tag, safe to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMode {
    Cli,
    Root,
    Address,
}

impl SigningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Root => "root",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for SigningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SigningKeyMaterial {
    /// Resolve credential inputs into exactly one key configuration.
    ///
    /// First present wins: payment secret, then root key, then read-only address.
    pub fn resolve(inputs: KeyInputs) -> DomainResult<Self> {
        let KeyInputs {
            payment_secret_hex,
            stake_secret_hex,
            root_key_bech32,
            address,
        } = inputs;

        if let Some(payment) = present_secret(payment_secret_hex) {
            let payment_secret = decode_secret_hex(payment.expose_secret())?;
            let stake_secret = match present_secret(stake_secret_hex) {
                Some(stake) => Some(decode_secret_hex(stake.expose_secret())?),
                None => None,
            };
            return Ok(Self::CliDualKey {
                payment_secret,
                stake_secret,
            });
        }

        if let Some(encoded_secret) = present_secret(root_key_bech32) {
            return Ok(Self::RootExtendedKey { encoded_secret });
        }

        if let Some(address) = address.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()) {
            return Ok(Self::ReadOnlyAddress { address });
        }

        Err(DomainError::NoKeyMaterial)
    }

    pub fn mode(&self) -> SigningMode {
        match self {
            Self::CliDualKey { .. } => SigningMode::Cli,
            Self::RootExtendedKey { .. } => SigningMode::Root,
            Self::ReadOnlyAddress { .. } => SigningMode::Address,
        }
    }

    pub fn can_sign(&self) -> bool {
        !matches!(self, Self::ReadOnlyAddress { .. })
    }

    /// Whether this material can authorize stake certificates
    pub fn has_stake_key(&self) -> bool {
        match self {
            Self::CliDualKey { stake_secret, .. } => stake_secret.is_some(),
            Self::RootExtendedKey { .. } => true,
            Self::ReadOnlyAddress { .. } => false,
        }
    }
}

impl fmt::Debug for SigningKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliDualKey { stake_secret, .. } => f
                .debug_struct("CliDualKey")
                .field("payment_secret", &"[REDACTED]")
                .field("stake_secret", &stake_secret.as_ref().map(|_| "[REDACTED]"))
                .finish(),
            Self::RootExtendedKey { .. } => f
                .debug_struct("RootExtendedKey")
                .field("encoded_secret", &"[REDACTED]")
                .finish(),
            Self::ReadOnlyAddress { address } => f
                .debug_struct("ReadOnlyAddress")
                .field("address", address)
                .finish(),
        }
    }
}

fn present_secret(value: Option<SecretString>) -> Option<SecretString> {
    value.filter(|s| !s.expose_secret().trim().is_empty())
}

/// CBOR header of a 32-byte byte string
const CBOR_KEY_HEADER: &str = "5820";

/// Decode a signing key given either as cardano-cli `cborHex` ("5820" + 64 hex
/// chars) or as bare hex. The length is not checked here.
pub fn decode_secret_hex(secret_hex: &str) -> DomainResult<SecretVec<u8>> {
    let secret_hex = secret_hex.trim();
    let secret_hex = secret_hex.strip_prefix("0x").unwrap_or(secret_hex);
    let bytes = hex::decode(secret_hex)?;

    if bytes.len() == 32 {
        return Ok(SecretVec::new(bytes));
    }

    match serde_cbor::from_slice::<Value>(&bytes) {
        Ok(Value::Bytes(inner)) => Ok(SecretVec::new(inner)),
        // Truncated or padded cborHex: measure the payload, not the header
        _ => match secret_hex.strip_prefix(CBOR_KEY_HEADER) {
            Some(payload) => Ok(SecretVec::new(hex::decode(payload)?)),
            None => Ok(SecretVec::new(bytes)),
        },
    }
}
