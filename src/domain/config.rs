use super::network::Network;
use std::path::PathBuf;
use std::time::Duration;

/// Confirmation polling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmSettings {
    pub enabled: bool,
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for ConfirmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: 6,
            delay: Duration::from_millis(10_000),
        }
    }
}

/// Process-wide configuration, built once at startup and never mutated
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub network: Network,
    pub network_id: u8,
    pub api_key: Option<String>,
    pub request_timeout: Duration,
    pub confirm: ConfirmSettings,
}

impl AppConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            network_id: network.default_network_id(),
            api_key: None,
            request_timeout: Duration::from_secs(30),
            confirm: ConfirmSettings::default(),
        }
    }

    pub fn with_network_id(mut self, network_id: u8) -> Self {
        self.network_id = network_id;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_confirm(mut self, confirm: ConfirmSettings) -> Self {
        self.confirm = confirm;
        self
    }
}

/// The single action a process invocation performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Status,
    Send {
        recipient: String,
        lovelace: u64,
        message: Option<String>,
    },
    Stake {
        pool_id: String,
        register: bool,
        message: Option<String>,
    },
    Generate {
        wallet_dir: Option<PathBuf>,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Send { .. } => "send",
            Self::Stake { .. } => "stake",
            Self::Generate { .. } => "generate",
        }
    }
}
