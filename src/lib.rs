//! # GIF Portal
//!
//! A terminal client for a shared GIF board kept in a Solana program account.
//!
//! ## Features
//! - Silent reconnect to a previously approved wallet at startup
//! - One-time initialization of the program account
//! - Browsing the stored GIF links with their submitters
//! - Submitting new links signed by the connected wallet
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (session state machine)
//! - Remote Layer (Tokio runtime) - wallet and RPC calls

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod program;
pub mod remote;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::{Cli, PortalConfig};
pub use messages::{RemoteCommand, RemoteResponse, RenderState, UiEvent};
pub use models::{GifItem, GifList, View};
pub use remote::{FetchOutcome, KeypairWallet, Ledger, RemoteActor, RpcLedger, Wallet};
