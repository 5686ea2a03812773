// Library exports for testing and external integration

pub mod application;
pub mod cli;
pub mod crypto;
pub mod domain;
pub mod ledger;
pub mod provider;
pub mod storage;

// Re-export commonly used items
pub use application::{
    DualWitnessSigner, KeyGeneration, OperationReport, Orchestrator, TxBuilder, Wallet,
};
pub use domain::{
    AppConfig, DomainError, DomainResult, KeyInputs, Network, Operation, PoolIdentifier,
    SigningKeyMaterial, SigningMode,
};
pub use provider::{ChainProvider, KoiosProvider, MemoryProvider};
pub use storage::{CardanoKeyFile, KeyReader, KeyWriter};
