//! Remote layer - the wallet and ledger collaborators and the actor that
//! drives them on the Tokio runtime

pub mod actor;
pub mod rpc;
pub mod wallet;

pub use actor::RemoteActor;
pub use rpc::RpcLedger;
pub use wallet::{KeypairWallet, TrustStore};

use std::future::Future;
use std::sync::Arc;

use solana_instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};

use crate::models::GifItem;

/// Wallet failures the session flow distinguishes
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("No wallet found at {0}")]
    NotFound(String),
    #[error("Wallet {0} has not been approved yet")]
    NotTrusted(String),
    #[error("Unreadable wallet keypair: {0}")]
    Keypair(String),
    #[error("Trust store error: {0}")]
    TrustStore(String),
    #[error("Wallet is not connected")]
    NotConnected,
}

/// A wallet that can be detected, connected and used as a signer
pub trait Wallet: Send + Sync + 'static {
    /// Presence flag; `Some(brand)` when a wallet is available
    fn detect(&self) -> Option<&'static str>;

    /// Connects and returns the wallet address. With `only_if_trusted` the
    /// wallet must not prompt and fails unless previously approved.
    fn connect(
        &self,
        only_if_trusted: bool,
    ) -> impl Future<Output = Result<Pubkey, WalletError>> + Send;

    /// Signer of the connected session
    fn signer(&self) -> Result<Arc<Keypair>, WalletError>;
}

/// Result of reading the GIF list from the ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Found(Vec<GifItem>),
    /// The base account does not exist yet
    NotFound,
    TransientError(String),
}

/// Ledger/program client
pub trait Ledger: Send + Sync + 'static {
    /// Reads the GIF list held by `account`
    fn fetch_gif_list(&self, account: Pubkey) -> impl Future<Output = FetchOutcome> + Send;

    /// Submits `instruction` signed by `signers`; the first signer pays fees
    fn submit(
        &self,
        instruction: Instruction,
        signers: Vec<Arc<Keypair>>,
    ) -> impl Future<Output = anyhow::Result<Signature>> + Send;
}
