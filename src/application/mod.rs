pub mod confirmation;
pub mod dual_signer;
pub mod key_generation;
pub mod orchestrator;
pub mod tx_builder;
pub mod wallet;

// Re-export commonly used items
pub use confirmation::{Confirmation, ConfirmationPoller};
pub use dual_signer::{attach_witnesses, DualWitnessSigner};
pub use key_generation::{AddressesFile, GeneratedWallet, KeyGeneration, WalletDossier};
pub use orchestrator::{OperationReport, Orchestrator, StatusReport, SubmitReport};
pub use tx_builder::TxBuilder;
pub use wallet::{SigningScope, Wallet};
