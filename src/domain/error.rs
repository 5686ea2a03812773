use std::path::PathBuf;
use thiserror::Error;

/// Domain-level errors for wallet operations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No key material provided (set a payment key, root key or read-only address)")]
    NoKeyMaterial,

    #[error("Read-only wallet cannot sign transactions")]
    ReadOnlyCannotSign,

    #[error("Staking requires a signing wallet (cli or root key)")]
    SigningModeUnsupported,

    #[error("Staking with cli keys requires a stake signing key")]
    MissingStakeKey,

    #[error("Invalid {role} key length: {actual} bytes (expected 32)")]
    InvalidKeyLength {
        role: &'static str,
        actual: usize,
    },

    #[error("Bech32 codec unavailable: {0}")]
    CodecUnavailable(String),

    #[error("Transaction parse error: {0}")]
    ParseError(String),

    #[error("Signing failed: {0}")]
    SigningError(String),

    #[error("Transaction submission failed: {0}")]
    SubmissionError(String),

    #[error("Tx not confirmed after {attempts} attempts: {tx_hash}")]
    ConfirmationTimeout {
        tx_hash: String,
        attempts: u32,
    },

    #[error("No reward address available for staking")]
    MissingRewardAddress,

    #[error("Chain provider error: {0}")]
    ProviderError(String),

    #[error("Insufficient funds: need {required} lovelace, {available} available")]
    InsufficientFunds {
        required: u64,
        available: u64,
    },

    #[error("Invalid address {address}: {reason}")]
    InvalidAddress {
        address: String,
        reason: String,
    },

    #[error("Invalid pool id {0}")]
    InvalidPoolId(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Key file not found: {}", .path.display())]
    KeyFileNotFound {
        path: PathBuf,
    },

    #[error("Invalid key file format: {reason}")]
    InvalidKeyFile {
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
