//! Keypair-file wallet
//!
//! A wallet backed by a Solana CLI keypair file. Presence means the file
//! exists. Approved addresses are remembered in a YAML trust store so later
//! runs can reconnect silently.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::config::read_keypair;
use crate::constants::KEYPAIR_WALLET_BRAND;
use crate::remote::{Wallet, WalletError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct TrustFile {
    #[serde(default)]
    trusted: Vec<String>,
}

/// Persisted set of wallet addresses the user has approved
pub struct TrustStore {
    path: PathBuf,
}

impl TrustStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TrustStore { path: path.into() }
    }

    pub fn is_trusted(&self, address: &Pubkey) -> Result<bool> {
        let address = address.to_string();
        Ok(self.load()?.trusted.iter().any(|a| *a == address))
    }

    /// Records `address` as approved; no-op if already present
    pub fn trust(&self, address: &Pubkey) -> Result<()> {
        let mut file = self.load()?;
        let address = address.to_string();
        if file.trusted.contains(&address) {
            return Ok(());
        }
        file.trusted.push(address);
        self.ensure_dir()?;
        let content = serde_yaml::to_string(&file).context("Failed to serialize trust store")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write trust store {}", self.path.display()))?;
        Ok(())
    }

    fn load(&self) -> Result<TrustFile> {
        if !self.path.exists() {
            return Ok(TrustFile::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read trust store {}", self.path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid trust store {}", self.path.display()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

/// Wallet reading its keypair from disk on connect
pub struct KeypairWallet {
    keypair_path: PathBuf,
    trust: TrustStore,
    session: OnceLock<Arc<Keypair>>,
}

impl KeypairWallet {
    pub fn new(keypair_path: impl Into<PathBuf>, trust: TrustStore) -> Self {
        KeypairWallet {
            keypair_path: keypair_path.into(),
            trust,
            session: OnceLock::new(),
        }
    }
}

impl Wallet for KeypairWallet {
    fn detect(&self) -> Option<&'static str> {
        self.keypair_path.exists().then_some(KEYPAIR_WALLET_BRAND)
    }

    async fn connect(&self, only_if_trusted: bool) -> Result<Pubkey, WalletError> {
        if !self.keypair_path.exists() {
            return Err(WalletError::NotFound(self.keypair_path.display().to_string()));
        }
        let keypair = read_keypair(&self.keypair_path)
            .map_err(|e| WalletError::Keypair(format!("{:#}", e)))?;
        let address = keypair.pubkey();

        if only_if_trusted {
            let trusted = self
                .trust
                .is_trusted(&address)
                .map_err(|e| WalletError::TrustStore(format!("{:#}", e)))?;
            if !trusted {
                return Err(WalletError::NotTrusted(address.to_string()));
            }
        } else {
            self.trust
                .trust(&address)
                .map_err(|e| WalletError::TrustStore(format!("{:#}", e)))?;
        }

        // The keypair file is fixed for the process, so the first connect wins
        let _ = self.session.set(Arc::new(keypair));
        tracing::info!(address = %address, only_if_trusted, "Wallet connected");
        Ok(address)
    }

    fn signer(&self) -> Result<Arc<Keypair>, WalletError> {
        self.session.get().cloned().ok_or(WalletError::NotConnected)
    }
}
