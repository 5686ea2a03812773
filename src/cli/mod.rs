pub mod output;

use crate::application::{KeyGeneration, Orchestrator};
use crate::crypto::Bech32;
use crate::domain::{
    AppConfig, ConfirmSettings, KeyInputs, KeyRole, Network, Operation, SigningKeyMaterial,
};
use crate::provider::KoiosProvider;
use crate::storage::KeyReader;
use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{value_parser, Args, Parser, ValueEnum};
use output::{print_output, OutputFormat};
use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Operation selected by `--mode` / `MODE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Status,
    Send,
    Stake,
    Generate,
}

#[derive(Parser)]
#[command(name = "agent-wallet")]
#[command(about = "Agent-operated Cardano wallet backed by Koios", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Operation to run
    #[arg(long, env = "MODE", value_enum, default_value_t = Mode::Status)]
    pub mode: Mode,

    /// Koios network (api, preprod, preview, guild)
    #[arg(long, env = "KOIOS_NETWORK", default_value = "api", value_parser = parse_network)]
    pub network: Network,

    /// Optional Koios API key (sent as a bearer token)
    #[arg(long, env = "KOIOS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Ledger network id (default: 1 for api, 0 otherwise)
    #[arg(long, env = "NETWORK_ID", value_parser = value_parser!(u8).range(0..=15))]
    pub network_id: Option<u8>,

    #[command(flatten)]
    pub keys: KeyArgs,

    #[command(flatten)]
    pub send: SendArgs,

    #[command(flatten)]
    pub stake: StakeArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,

    /// CIP-20 message attached to send and stake transactions
    #[arg(long, env = "MESSAGE")]
    pub message: Option<String>,

    /// Directory that `generate` writes key files and addresses.json into
    #[arg(long, env = "WALLET_DIR")]
    pub wallet_dir: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Log filter, e.g. "info" or "koios_agent_wallet=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Print usage and exit without touching the network
    #[arg(long, env = "SELF_TEST", value_parser = FalseyValueParser::new())]
    pub self_test: bool,
}

#[derive(Args)]
pub struct KeyArgs {
    /// cardano-cli payment.skey cborHex
    #[arg(long, env = "PAYMENT_SKEY_CBOR_HEX", hide_env_values = true)]
    pub payment_skey_cbor_hex: Option<String>,

    /// cardano-cli stake.skey cborHex (required for staking)
    #[arg(long, env = "STAKE_SKEY_CBOR_HEX", hide_env_values = true)]
    pub stake_skey_cbor_hex: Option<String>,

    /// payment.skey file, instead of the cborHex value
    #[arg(long, conflicts_with = "payment_skey_cbor_hex")]
    pub payment_skey_file: Option<PathBuf>,

    /// stake.skey file, instead of the cborHex value
    #[arg(long, conflicts_with = "stake_skey_cbor_hex")]
    pub stake_skey_file: Option<PathBuf>,

    /// Root extended private key (root_xsk...)
    #[arg(long, env = "ROOT_XPRV_BECH32", hide_env_values = true)]
    pub root_xprv_bech32: Option<String>,

    /// Watch-only address (no signing)
    #[arg(long, env = "ADDRESS_ONLY")]
    pub address_only: Option<String>,
}

#[derive(Args)]
pub struct SendArgs {
    /// Address to send ADA to
    #[arg(long, env = "RECIPIENT_ADDR")]
    pub recipient_addr: Option<String>,

    /// Amount in lovelace
    #[arg(long, env = "SEND_LOVELACE", default_value_t = 1_000_000)]
    pub send_lovelace: u64,
}

#[derive(Args)]
pub struct StakeArgs {
    /// Pool id: bech32 (pool1...) or 56 hex characters
    #[arg(long, env = "POOL_ID")]
    pub pool_id: Option<String>,

    /// Include a stake registration certificate
    #[arg(long, env = "REGISTER_STAKE", value_parser = FalseyValueParser::new())]
    pub register_stake: bool,
}

#[derive(Args)]
pub struct ConfirmArgs {
    /// Poll Koios until the submitted transaction is visible
    #[arg(long, env = "CONFIRM", value_parser = FalseyValueParser::new())]
    pub confirm: bool,

    /// Poll attempts
    #[arg(long, env = "CONFIRM_RETRIES", default_value_t = 6, value_parser = value_parser!(u32).range(1..))]
    pub confirm_retries: u32,

    /// Delay between polls in milliseconds
    #[arg(long, env = "CONFIRM_DELAY_MS", default_value_t = 10_000)]
    pub confirm_delay_ms: u64,
}

fn parse_network(s: &str) -> Result<Network, String> {
    Network::from_str(s).map_err(|e| e.to_string())
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        let mut config = AppConfig::new(self.network).with_confirm(ConfirmSettings {
            enabled: self.confirm.confirm,
            max_attempts: self.confirm.confirm_retries,
            delay: Duration::from_millis(self.confirm.confirm_delay_ms),
        });
        if let Some(network_id) = self.network_id {
            config = config.with_network_id(network_id);
        }
        if let Some(api_key) = non_empty(&self.api_key) {
            config = config.with_api_key(api_key);
        }
        config
    }

    /// Collect credential inputs, reading .skey files where given
    pub fn key_inputs(&self) -> Result<KeyInputs> {
        let keys = &self.keys;
        let payment_secret_hex = match &keys.payment_skey_file {
            Some(path) => Some(
                KeyReader::load_signing_key_hex(path, KeyRole::Payment)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
            ),
            None => non_empty(&keys.payment_skey_cbor_hex).map(|s| SecretString::new(s.to_string())),
        };
        let stake_secret_hex = match &keys.stake_skey_file {
            Some(path) => Some(
                KeyReader::load_signing_key_hex(path, KeyRole::Stake)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
            ),
            None => non_empty(&keys.stake_skey_cbor_hex).map(|s| SecretString::new(s.to_string())),
        };

        Ok(KeyInputs {
            payment_secret_hex,
            stake_secret_hex,
            root_key_bech32: non_empty(&keys.root_xprv_bech32)
                .map(|s| SecretString::new(s.to_string())),
            address: non_empty(&keys.address_only).map(str::to_string),
        })
    }

    pub fn operation(&self) -> Operation {
        let message = non_empty(&self.message).map(str::to_string);

        match self.mode {
            Mode::Status => Operation::Status,
            Mode::Send => Operation::Send {
                recipient: self.send.recipient_addr.clone().unwrap_or_default(),
                lovelace: self.send.send_lovelace,
                message,
            },
            Mode::Stake => Operation::Stake {
                pool_id: self.stake.pool_id.clone().unwrap_or_default(),
                register: self.stake.register_stake,
                message,
            },
            Mode::Generate => Operation::Generate {
                wallet_dir: self.wallet_dir.clone(),
            },
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Execute the selected operation and print its report
pub async fn handle_cli(cli: Cli) -> Result<()> {
    let config = cli.app_config();
    let operation = cli.operation();

    if let Operation::Generate { wallet_dir } = &operation {
        return handle_generate(&config, wallet_dir.as_deref(), cli.format);
    }

    let material = SigningKeyMaterial::resolve(cli.key_inputs()?)
        .context("No usable key configuration")?;
    let provider = KoiosProvider::new(&config).context("Failed to create Koios client")?;
    info!(base_url = provider.base_url(), "using Koios");

    let mut orchestrator = Orchestrator::new(config, material, provider);
    let report = orchestrator
        .run(&operation)
        .await
        .with_context(|| format!("{} failed", operation.name()))?;

    print_output(&report, cli.format)
}

fn handle_generate(
    config: &AppConfig,
    wallet_dir: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<()> {
    let wallet = KeyGeneration::generate(config.network, config.network_id, &Bech32)
        .context("Failed to generate wallet")?;

    let files = match wallet_dir {
        Some(dir) => {
            let files = KeyGeneration::write_wallet_dir(&wallet, dir)
                .with_context(|| format!("Failed to write wallet to {}", dir.display()))?;
            info!(dir = %dir.display(), files = files.len(), "wallet files written");
            files
        }
        None => Vec::new(),
    };

    print_output(&wallet.dossier(files)?, format)
}
