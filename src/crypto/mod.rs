pub mod codec;
pub mod ed25519;
pub mod extended;

// Re-export commonly used items
pub use codec::Bech32;
pub use ed25519::{Ed25519, Ed25519Key, KeyDerivation};
pub use extended::ExtendedKey;
