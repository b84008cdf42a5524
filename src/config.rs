//! Configuration - config file, CLI flags and the resolved `PortalConfig`
//!
//! The program identity (program id and base-account keypair) lives here as
//! an explicit value built once at startup and handed to the remote actor.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::constants::{
    BASE_ACCOUNT_FILE_NAME, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_COMMITMENT,
    DEFAULT_RPC_URL, TRUST_FILE_NAME,
};

/// Command line flags; each overrides the matching config file field
#[derive(Parser, Debug, Default)]
#[command(name = "gif-portal", version, about = "Browse and submit GIF links stored on Solana")]
pub struct Cli {
    /// Path to the YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RPC endpoint URL
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// GIF program id (base58)
    #[arg(long)]
    pub program_id: Option<String>,

    /// Base account keypair file (JSON byte array)
    #[arg(long)]
    pub base_account: Option<PathBuf>,

    /// Wallet keypair file (JSON byte array)
    #[arg(long)]
    pub wallet: Option<PathBuf>,
}

/// On-disk config file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub rpc_url: Option<String>,
    pub commitment: Option<String>,
    pub program_id: Option<String>,
    pub base_account_keypair: Option<PathBuf>,
    pub wallet_keypair: Option<PathBuf>,
}

impl ConfigFile {
    /// Loads the config file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
}

/// Resolved configuration handed to the remote actor
#[derive(Clone, Debug)]
pub struct PortalConfig {
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub program_id: Pubkey,
    /// Program-controlled keypair of the account holding the GIF list
    pub base_account: Arc<Keypair>,
    pub wallet_keypair: PathBuf,
    pub trust_file: PathBuf,
}

impl PortalConfig {
    /// Builds the config from the config file with CLI overrides on top
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let config_dir = default_config_dir();
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| config_dir.join(CONFIG_FILE_NAME));
        let file = ConfigFile::load(&config_path)?;
        Self::from_sources(cli, file, &config_dir)
    }

    /// Fixed account identifier the GIF list is keyed by
    pub fn base_account_address(&self) -> Pubkey {
        self.base_account.pubkey()
    }

    fn from_sources(cli: &Cli, file: ConfigFile, config_dir: &Path) -> Result<Self> {
        let rpc_url = cli
            .rpc_url
            .clone()
            .or(file.rpc_url)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());

        let commitment = parse_commitment(file.commitment.as_deref().unwrap_or(DEFAULT_COMMITMENT))?;

        let program_id = cli
            .program_id
            .clone()
            .or(file.program_id)
            .ok_or_else(|| anyhow!("No program id configured (set program_id or pass --program-id)"))?;
        let program_id = parse_pubkey(&program_id)?;

        let base_account_path = cli
            .base_account
            .clone()
            .or(file.base_account_keypair)
            .unwrap_or_else(|| config_dir.join(BASE_ACCOUNT_FILE_NAME));
        let base_account = read_keypair(&base_account_path)
            .context("Failed to load base account keypair")?;

        let wallet_keypair = cli
            .wallet
            .clone()
            .or(file.wallet_keypair)
            .unwrap_or_else(default_wallet_path);

        tracing::info!(
            rpc_url = %rpc_url,
            program_id = %program_id,
            base_account = %base_account.pubkey(),
            wallet = %wallet_keypair.display(),
            "Configuration resolved"
        );

        Ok(PortalConfig {
            rpc_url,
            commitment,
            program_id,
            base_account: Arc::new(base_account),
            wallet_keypair,
            trust_file: config_dir.join(TRUST_FILE_NAME),
        })
    }
}

/// `~/.gif-portal`, falling back to the working directory
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Solana CLI default keypair location
pub fn default_wallet_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("solana")
        .join("id.json")
}

/// Reads a keypair stored as a JSON array of 64 bytes
pub fn read_keypair(path: &Path) -> Result<Keypair> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keypair {}", path.display()))?;
    let bytes: Vec<u8> = serde_json::from_str(&content)
        .with_context(|| format!("Keypair {} is not a JSON byte array", path.display()))?;
    Keypair::try_from(bytes.as_slice())
        .map_err(|e| anyhow!("Invalid keypair {}: {}", path.display(), e))
}

fn parse_pubkey(value: &str) -> Result<Pubkey> {
    value
        .parse::<Pubkey>()
        .map_err(|e| anyhow!("Invalid program id '{}': {}", value, e))
}

fn parse_commitment(value: &str) -> Result<CommitmentConfig> {
    value
        .parse::<CommitmentConfig>()
        .map_err(|_| anyhow!("Unknown commitment level '{}'", value))
}
