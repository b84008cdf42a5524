//! Remote actor - runs wallet and ledger calls in the Tokio runtime

use std::sync::Arc;

use solana_instruction::Instruction;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::config::PortalConfig;
use crate::messages::{RemoteCommand, RemoteResponse, WriteKind};
use crate::program;
use crate::remote::{FetchOutcome, Ledger, Wallet};

/// Remote actor that executes session commands against the collaborators
pub struct RemoteActor<W, L> {
    wallet: Arc<W>,
    ledger: Arc<L>,
    config: Arc<PortalConfig>,
    response_tx: mpsc::UnboundedSender<RemoteResponse>,
    active_calls: JoinSet<()>,
}

impl<W: Wallet, L: Ledger> RemoteActor<W, L> {
    pub fn new(
        wallet: W,
        ledger: L,
        config: PortalConfig,
        response_tx: mpsc::UnboundedSender<RemoteResponse>,
    ) -> Self {
        RemoteActor {
            wallet: Arc::new(wallet),
            ledger: Arc::new(ledger),
            config: Arc::new(config),
            response_tx,
            active_calls: JoinSet::new(),
        }
    }

    /// Run the remote actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<RemoteCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(RemoteCommand::SilentConnect) => self.spawn_connect(true),
                        Some(RemoteCommand::Connect) => self.spawn_connect(false),
                        Some(RemoteCommand::FetchGifList { id }) => self.spawn_fetch(id),
                        Some(RemoteCommand::InitializeAccount { id }) => {
                            self.spawn_write(id, WriteKind::Initialize, None)
                        }
                        Some(RemoteCommand::SubmitGif { id, gif_link }) => {
                            self.spawn_write(id, WriteKind::SubmitGif, Some(gif_link))
                        }
                        Some(RemoteCommand::Shutdown) => {
                            self.active_calls.abort_all();
                            break;
                        }
                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(result) = self.active_calls.join_next() => {
                    if let Err(e) = result {
                        if e.is_panic() {
                            tracing::error!(error = %e, "Remote call panicked");
                        }
                    }
                }
            }
        }
    }

    fn spawn_connect(&mut self, silent: bool) {
        let wallet = self.wallet.clone();
        let response_tx = self.response_tx.clone();

        self.active_calls.spawn(async move {
            let response = match wallet.detect() {
                None => {
                    tracing::info!(silent, "No wallet detected");
                    RemoteResponse::WalletMissing { silent }
                }
                Some(brand) => {
                    tracing::info!(brand, silent, "Wallet detected");
                    match wallet.connect(silent).await {
                        Ok(address) => RemoteResponse::Connected {
                            address: address.to_string(),
                            silent,
                        },
                        Err(e) => RemoteResponse::ConnectFailed {
                            message: e.to_string(),
                            silent,
                        },
                    }
                }
            };
            let _ = response_tx.send(response);
        });
    }

    fn spawn_fetch(&mut self, id: u64) {
        let ledger = self.ledger.clone();
        let account = self.config.base_account_address();
        let response_tx = self.response_tx.clone();

        self.active_calls.spawn(async move {
            let outcome = ledger.fetch_gif_list(account).await;
            tracing::info!(id, outcome = outcome_kind(&outcome), "GIF list fetched");
            let _ = response_tx.send(RemoteResponse::GifListFetched { id, outcome });
        });
    }

    fn spawn_write(&mut self, id: u64, kind: WriteKind, gif_link: Option<String>) {
        let wallet = self.wallet.clone();
        let ledger = self.ledger.clone();
        let config = self.config.clone();
        let response_tx = self.response_tx.clone();

        self.active_calls.spawn(async move {
            let result: anyhow::Result<Signature> = async {
                let user = wallet.signer()?;
                let instruction = build_write(&config, kind, gif_link.as_deref(), &user)?;
                // The base account co-signs its own creation
                let mut signers = vec![user];
                if kind == WriteKind::Initialize {
                    signers.push(config.base_account.clone());
                }
                ledger.submit(instruction, signers).await
            }
            .await;

            let response = match result {
                Ok(signature) => RemoteResponse::WriteConfirmed {
                    id,
                    kind,
                    signature: signature.to_string(),
                },
                Err(e) => {
                    tracing::warn!(id, error = %format!("{:#}", e), "{} failed", kind.label());
                    RemoteResponse::WriteFailed {
                        id,
                        kind,
                        message: format!("{:#}", e),
                    }
                }
            };
            let _ = response_tx.send(response);
        });
    }
}

fn build_write(
    config: &PortalConfig,
    kind: WriteKind,
    gif_link: Option<&str>,
    user: &Keypair,
) -> anyhow::Result<Instruction> {
    let base = config.base_account_address();
    match kind {
        WriteKind::Initialize => Ok(program::start_stuff_off(
            &config.program_id,
            &base,
            &user.pubkey(),
        )),
        WriteKind::SubmitGif => {
            let link = gif_link.ok_or_else(|| anyhow::anyhow!("Missing gif link"))?;
            program::add_gif(&config.program_id, &base, &user.pubkey(), link)
        }
    }
}

fn outcome_kind(outcome: &FetchOutcome) -> &'static str {
    match outcome {
        FetchOutcome::Found(_) => "found",
        FetchOutcome::NotFound => "not_found",
        FetchOutcome::TransientError(_) => "transient_error",
    }
}
