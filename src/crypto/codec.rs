use crate::domain::{Bech32Codec, DomainError, DomainResult};
use bech32::Hrp;

/// Bech32 codec backed by the `bech32` crate.
///
/// Uses the BIP-173 checksum without the 90 character segwit limit, which
/// Cardano addresses exceed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bech32;

impl Bech32Codec for Bech32 {
    fn encode(&self, hrp: &str, data: &[u8]) -> DomainResult<String> {
        let hrp = Hrp::parse(hrp)
            .map_err(|e| DomainError::InvalidPayload(format!("Invalid bech32 prefix {}: {}", hrp, e)))?;

        bech32::encode::<bech32::Bech32>(hrp, data)
            .map_err(|e| DomainError::InvalidPayload(format!("Bech32 encoding failed: {}", e)))
    }

    fn decode(&self, text: &str) -> DomainResult<(String, Vec<u8>)> {
        let (hrp, data) = bech32::decode(text.trim())
            .map_err(|e| DomainError::InvalidPayload(format!("Invalid bech32 string: {}", e)))?;

        Ok((hrp.as_str().to_lowercase(), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_long_payload() {
        // Base addresses are 57 bytes, well past the segwit length limit
        let payload = vec![0x01; 57];
        let encoded = Bech32.encode("addr_test", &payload).unwrap();
        assert!(encoded.starts_with("addr_test1"));
        assert!(encoded.len() > 90);

        let (hrp, decoded) = Bech32.decode(&encoded).unwrap();
        assert_eq!(hrp, "addr_test");
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let mut encoded = Bech32.encode("pool", &[7u8; 28]).unwrap();
        let last = encoded.pop().unwrap();
        encoded.push(if last == 'q' { 'p' } else { 'q' });

        assert!(Bech32.decode(&encoded).is_err());
    }

    #[test]
    fn test_invalid_hrp() {
        assert!(Bech32.encode("", &[1, 2, 3]).is_err());
    }
}
