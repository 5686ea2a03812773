use super::error::DomainResult;

/// Bech32 encoding capability, injected wherever human-readable identifiers
/// (addresses, pool ids, root keys) are converted to or from raw bytes.
pub trait Bech32Codec: Send + Sync {
    /// Encode `data` under the human-readable part `hrp`
    fn encode(&self, hrp: &str, data: &[u8]) -> DomainResult<String>;

    /// Decode a bech32 string into its human-readable part and payload
    fn decode(&self, text: &str) -> DomainResult<(String, Vec<u8>)>;
}
