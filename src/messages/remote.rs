//! Remote messages - communication between App and Remote layers

use crate::remote::FetchOutcome;

/// Commands sent from App layer to Remote layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    /// Startup check: detect the wallet and reconnect only if already trusted
    SilentConnect,
    /// User-requested connect; may approve a new wallet
    Connect,
    /// Read the GIF list from the base account
    FetchGifList { id: u64 },
    /// One-time creation of the base account
    InitializeAccount { id: u64 },
    /// Append a link to the GIF list
    SubmitGif { id: u64, gif_link: String },
    /// Shutdown the remote actor
    Shutdown,
}

/// The two write instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Initialize,
    SubmitGif,
}

impl WriteKind {
    pub fn label(&self) -> &'static str {
        match self {
            WriteKind::Initialize => "Account initialization",
            WriteKind::SubmitGif => "GIF submission",
        }
    }
}

/// Responses sent from Remote layer to App layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteResponse {
    /// No wallet is available
    WalletMissing { silent: bool },
    /// Wallet connected with this address
    Connected { address: String, silent: bool },
    /// Wallet present but the connect attempt failed
    ConnectFailed { message: String, silent: bool },
    /// Result of a GIF list read
    GifListFetched { id: u64, outcome: FetchOutcome },
    /// A write landed on chain
    WriteConfirmed {
        id: u64,
        kind: WriteKind,
        signature: String,
    },
    /// A write could not be completed
    WriteFailed {
        id: u64,
        kind: WriteKind,
        message: String,
    },
}
