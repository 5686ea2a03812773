use super::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a Shelley-era key plays in a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyRole {
    Payment,
    Stake,
}

impl KeyRole {
    pub fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "payment" => Ok(Self::Payment),
            "stake" => Ok(Self::Stake),
            _ => Err(DomainError::InvalidKeyFile {
                reason: format!("Unknown key role: {}", s),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Stake => "stake",
        }
    }

    /// cardano-cli text envelope type of a signing key
    pub fn signing_key_descriptor(&self) -> String {
        format!("{}SigningKeyShelley_ed25519", self.capitalized_name())
    }

    /// cardano-cli text envelope type of a verification key
    pub fn verification_key_descriptor(&self) -> String {
        format!("{}VerificationKeyShelley_ed25519", self.capitalized_name())
    }

    pub fn capitalized_name(&self) -> &'static str {
        match self {
            Self::Payment => "Payment",
            Self::Stake => "Stake",
        }
    }

    /// Default file name (without extension)
    pub fn default_filename(&self) -> &'static str {
        self.as_str()
    }

    /// Parse the role from an envelope type such as "StakeSigningKeyShelley_ed25519"
    pub fn from_descriptor(descriptor: &str) -> DomainResult<Self> {
        if descriptor.starts_with("Payment") {
            Ok(Self::Payment)
        } else if descriptor.starts_with("Stake") {
            Ok(Self::Stake)
        } else {
            Err(DomainError::InvalidKeyFile {
                reason: format!("Unknown key role in descriptor: {}", descriptor),
            })
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_role_conversions() {
        assert_eq!(KeyRole::from_str("payment").unwrap(), KeyRole::Payment);
        assert_eq!(KeyRole::from_str("STAKE").unwrap(), KeyRole::Stake);
        assert!(KeyRole::from_str("drep").is_err());
    }

    #[test]
    fn test_type_descriptors() {
        assert_eq!(
            KeyRole::Payment.signing_key_descriptor(),
            "PaymentSigningKeyShelley_ed25519"
        );
        assert_eq!(
            KeyRole::Stake.verification_key_descriptor(),
            "StakeVerificationKeyShelley_ed25519"
        );
    }

    #[test]
    fn test_role_from_descriptor() {
        assert_eq!(
            KeyRole::from_descriptor("StakeSigningKeyShelley_ed25519").unwrap(),
            KeyRole::Stake
        );
        assert!(KeyRole::from_descriptor("GenesisSigningKey_ed25519").is_err());
    }
}
