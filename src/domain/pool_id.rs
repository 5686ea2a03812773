use super::codec::Bech32Codec;
use super::error::{DomainError, DomainResult};
use std::fmt;

const POOL_HRP: &str = "pool";
const POOL_HEX_LEN: usize = 56;
const POOL_HASH_LEN: usize = 28;

/// Delegation target in the encoding the transaction builder expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolIdentifier(String);

impl PoolIdentifier {
    /// Canonicalize a pool id.
    ///
    /// `pool1...` ids are returned unchanged and 56-char hex ids are re-encoded
    /// as bech32. Anything else passes through untouched; the builder rejects
    /// ids it cannot decode.
    pub fn normalize(raw: &str, codec: Option<&dyn Bech32Codec>) -> DomainResult<Self> {
        let trimmed = raw.trim();

        if is_canonical(trimmed) {
            return Ok(Self(trimmed.to_string()));
        }

        if is_pool_hex(trimmed) {
            let codec = codec.ok_or_else(|| {
                DomainError::CodecUnavailable(
                    "hex pool ids need a bech32 codec to convert to pool1...".to_string(),
                )
            })?;
            let bytes = hex::decode(trimmed)?;
            return Ok(Self(codec.encode(POOL_HRP, &bytes)?));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the 28-byte pool key hash carried by a `pool1...` id
    pub fn key_hash(&self, codec: &dyn Bech32Codec) -> DomainResult<[u8; POOL_HASH_LEN]> {
        let (hrp, bytes) = codec
            .decode(&self.0)
            .map_err(|_| DomainError::InvalidPoolId(self.0.clone()))?;

        if hrp != POOL_HRP || bytes.len() != POOL_HASH_LEN {
            return Err(DomainError::InvalidPoolId(self.0.clone()));
        }

        let mut hash = [0u8; POOL_HASH_LEN];
        hash.copy_from_slice(&bytes);
        Ok(hash)
    }
}

impl fmt::Display for PoolIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_canonical(s: &str) -> bool {
    s.strip_prefix("pool1")
        .map(|rest| {
            !rest.is_empty()
                && rest
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
        .unwrap_or(false)
}

fn is_pool_hex(s: &str) -> bool {
    s.len() == POOL_HEX_LEN && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Bech32;

    const POOL_HEX: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef01";

    fn normalize(raw: &str) -> String {
        PoolIdentifier::normalize(raw, Some(&Bech32))
            .unwrap()
            .as_str()
            .to_string()
    }

    #[test]
    fn test_hex_converts_to_bech32() {
        let normalized = normalize(POOL_HEX);
        assert!(normalized.starts_with("pool1"));

        let pool = PoolIdentifier::normalize(&normalized, Some(&Bech32)).unwrap();
        assert_eq!(hex::encode(pool.key_hash(&Bech32).unwrap()), POOL_HEX);
    }

    #[test]
    fn test_uppercase_hex_converts() {
        assert_eq!(normalize(&POOL_HEX.to_uppercase()), normalize(POOL_HEX));
    }

    #[test]
    fn test_canonical_unchanged() {
        let canonical = normalize(POOL_HEX);
        assert_eq!(normalize(&canonical), canonical);
        assert_eq!(normalize(&format!("  {}\n", canonical)), canonical);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            POOL_HEX,
            "pool1abc",
            "POOL1ABC",
            "abcd",
            " not a pool ",
            "",
            &POOL_HEX[..55],
        ];

        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_unrecognized_passes_through() {
        assert_eq!(normalize("stake1xyz"), "stake1xyz");
        assert_eq!(normalize("POOL1ABC"), "POOL1ABC");
    }

    #[test]
    fn test_hex_without_codec_is_codec_unavailable() {
        let err = PoolIdentifier::normalize(POOL_HEX, None).unwrap_err();
        assert!(matches!(err, DomainError::CodecUnavailable(_)));

        // No conversion needed, no codec needed
        let pool = PoolIdentifier::normalize("pool1abc", None).unwrap();
        assert_eq!(pool.as_str(), "pool1abc");
        let other = PoolIdentifier::normalize("xyz", None).unwrap();
        assert_eq!(other.as_str(), "xyz");
    }

    #[test]
    fn test_key_hash_rejects_garbage() {
        let pool = PoolIdentifier::normalize("pool1abc", Some(&Bech32)).unwrap();
        assert!(matches!(
            pool.key_hash(&Bech32),
            Err(DomainError::InvalidPoolId(_))
        ));
    }
}
