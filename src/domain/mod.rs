pub mod chain;
pub mod codec;
pub mod config;
pub mod error;
pub mod key_config;
pub mod key_role;
pub mod network;
pub mod pool_id;
pub mod transaction;

// Re-export commonly used types
pub use chain::{AccountInfo, ProtocolParams, TxInfo, Utxo};
pub use codec::Bech32Codec;
pub use config::{AppConfig, ConfirmSettings, Operation};
pub use error::{DomainError, DomainResult};
pub use key_config::{KeyInputs, SigningKeyMaterial, SigningMode};
pub use key_role::KeyRole;
pub use network::Network;
pub use pool_id::PoolIdentifier;
pub use transaction::{SignedTransaction, TxHash, UnsignedTransaction};
