//! Chain data as returned by the provider

use serde::{Deserialize, Deserializer, Serialize};

/// Unspent output owned by the wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utxo {
    pub tx_hash: String,
    pub tx_index: u32,
    #[serde(default)]
    pub address: String,
    /// Lovelace amount (Koios reports it as a string)
    #[serde(rename = "value", deserialize_with = "lovelace")]
    pub lovelace: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub asset_list: Vec<serde_json::Value>,
}

impl Utxo {
    /// Whether the output carries native assets besides ada
    pub fn has_assets(&self) -> bool {
        !self.asset_list.is_empty()
    }
}

/// Stake account state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    pub stake_address: String,
    pub status: Option<String>,
    pub delegated_pool: Option<String>,
    pub delegated_drep: Option<String>,
    pub total_balance: Option<String>,
    pub utxo: Option<String>,
    pub rewards_available: Option<String>,
    pub deposit: Option<String>,
}

/// Inclusion data for a confirmed transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxInfo {
    pub tx_hash: String,
    pub block_hash: Option<String>,
    pub block_height: Option<u64>,
    pub epoch_no: Option<u64>,
    pub absolute_slot: Option<u64>,
    pub tx_timestamp: Option<u64>,
    pub fee: Option<String>,
}

/// Protocol parameters needed to balance a transaction, in cardano-cli naming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolParams {
    pub tx_fee_per_byte: u64,
    pub tx_fee_fixed: u64,
    pub stake_address_deposit: u64,
    pub utxo_cost_per_byte: u64,
    pub max_tx_size: u64,
}

impl ProtocolParams {
    /// Linear fee for a transaction of `size` bytes
    pub fn min_fee(&self, size: usize) -> u64 {
        self.tx_fee_per_byte * size as u64 + self.tx_fee_fixed
    }
}

impl Default for ProtocolParams {
    /// Mainnet values at the time of writing
    fn default() -> Self {
        Self {
            tx_fee_per_byte: 44,
            tx_fee_fixed: 155_381,
            stake_address_deposit: 2_000_000,
            utxo_cost_per_byte: 4_310,
            max_tx_size: 16_384,
        }
    }
}

fn lovelace<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(u64),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utxo_from_koios_json() {
        let json = r#"{
            "tx_hash": "aa",
            "tx_index": 1,
            "address": "addr_test1xyz",
            "value": "5000000",
            "asset_list": null,
            "block_height": 123
        }"#;

        let utxo: Utxo = serde_json::from_str(json).unwrap();
        assert_eq!(utxo.lovelace, 5_000_000);
        assert!(!utxo.has_assets());
    }

    #[test]
    fn test_utxo_numeric_value_and_assets() {
        let json = r#"{"tx_hash":"bb","tx_index":0,"value":42,
            "asset_list":[{"policy_id":"00","quantity":"1"}]}"#;

        let utxo: Utxo = serde_json::from_str(json).unwrap();
        assert_eq!(utxo.lovelace, 42);
        assert!(utxo.has_assets());
    }

    #[test]
    fn test_protocol_params_from_cli_json() {
        let json = r#"{"txFeePerByte":44,"txFeeFixed":155381,"stakeAddressDeposit":2000000,
            "utxoCostPerByte":4310,"maxTxSize":16384,"maxBlockBodySize":90112}"#;

        let params: ProtocolParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, ProtocolParams::default());
        assert_eq!(params.min_fee(300), 44 * 300 + 155_381);
    }

    #[test]
    fn test_account_info_tolerates_missing_fields() {
        let info: AccountInfo =
            serde_json::from_str(r#"{"stake_address":"stake1x","status":"registered"}"#).unwrap();
        assert_eq!(info.status.as_deref(), Some("registered"));
        assert!(info.delegated_pool.is_none());
    }
}
