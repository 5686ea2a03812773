//! Ledger types on top of cardano-serialization-lib: addresses, CIP-20
//! metadata, transaction parsing and vkey witnesses

pub mod address;
pub mod metadata;
pub mod transaction;
pub mod witness;

pub use address::{
    address_to_bech32, base_address, enterprise_address, parse_address, reward_address,
    reward_address_of, stake_credential,
};
pub use metadata::message_auxiliary_data;
pub use transaction::{parse_transaction, to_lovelace, tx_hash};
pub use witness::{witness_set, WitnessKey};
