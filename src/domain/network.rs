use super::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Koios network selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Mainnet (Koios calls it "api")
    Api,
    Preprod,
    Preview,
    Guild,
}

impl Network {
    pub fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "api" | "mainnet" => Ok(Self::Api),
            "preprod" => Ok(Self::Preprod),
            "preview" => Ok(Self::Preview),
            "guild" => Ok(Self::Guild),
            _ => Err(DomainError::Config(format!(
                "Unknown network: {} (expected api, preprod, preview or guild)",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Preprod => "preprod",
            Self::Preview => "preview",
            Self::Guild => "guild",
        }
    }

    /// Base URL of the Koios REST API for this network
    pub fn koios_base_url(&self) -> &'static str {
        match self {
            Self::Api => "https://api.koios.rest/api/v1",
            Self::Preprod => "https://preprod.koios.rest/api/v1",
            Self::Preview => "https://preview.koios.rest/api/v1",
            Self::Guild => "https://guild.koios.rest/api/v1",
        }
    }

    /// Ledger network id: 1 for mainnet, 0 for every test network
    pub fn default_network_id(&self) -> u8 {
        match self {
            Self::Api => 1,
            Self::Preprod | Self::Preview | Self::Guild => 0,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network() {
        assert_eq!(Network::from_str("api").unwrap(), Network::Api);
        assert_eq!(Network::from_str("Mainnet").unwrap(), Network::Api);
        assert_eq!(Network::from_str("PREPROD").unwrap(), Network::Preprod);
        assert!(Network::from_str("sancho").is_err());
    }

    #[test]
    fn test_network_ids() {
        assert_eq!(Network::Api.default_network_id(), 1);
        assert_eq!(Network::Preview.default_network_id(), 0);
        assert_eq!(Network::Guild.default_network_id(), 0);
    }
}
