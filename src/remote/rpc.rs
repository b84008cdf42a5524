//! Solana RPC ledger - reads the base account and submits program instructions

use anyhow::{anyhow, Context};
use solana_account::Account;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use std::sync::Arc;

use crate::config::PortalConfig;
use crate::program::{decode_base_account, decode_instruction};
use crate::remote::{FetchOutcome, Ledger};

/// Ledger backed by a JSON-RPC node
pub struct RpcLedger {
    client: RpcClient,
    program_id: Pubkey,
}

impl RpcLedger {
    pub fn new(config: &PortalConfig) -> Self {
        RpcLedger {
            client: RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment),
            program_id: config.program_id,
        }
    }
}

/// Maps the account read for `address` to a fetch outcome. Only a missing
/// account is `NotFound`; anything unreadable is transient.
fn classify_account(address: &Pubkey, account: Option<Account>, program_id: &Pubkey) -> FetchOutcome {
    let Some(data) = account else {
        tracing::debug!(account = %address, "Base account not found");
        return FetchOutcome::NotFound;
    };

    if data.owner != *program_id {
        return FetchOutcome::TransientError(format!(
            "Account {} is owned by {}, not the GIF program",
            address, data.owner
        ));
    }

    match decode_base_account(&data.data) {
        Ok(base) => {
            tracing::debug!(account = %address, total = base.total_gifs, "Base account decoded");
            FetchOutcome::Found(base.gif_list)
        }
        Err(e) => FetchOutcome::TransientError(format!("{:#}", e)),
    }
}

impl Ledger for RpcLedger {
    async fn fetch_gif_list(&self, account: Pubkey) -> FetchOutcome {
        let response = match self
            .client
            .get_account_with_commitment(&account, self.client.commitment())
            .await
        {
            Ok(response) => response,
            Err(e) => return FetchOutcome::TransientError(format!("RPC error: {}", e)),
        };

        classify_account(&account, response.value, &self.program_id)
    }

    async fn submit(
        &self,
        instruction: Instruction,
        signers: Vec<Arc<Keypair>>,
    ) -> anyhow::Result<Signature> {
        let payer = signers
            .first()
            .ok_or_else(|| anyhow!("Transaction needs at least one signer"))?;
        let name = decode_instruction(&instruction.data)
            .map(|ix| ix.name())
            .unwrap_or("unknown");

        let blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .context("Failed to fetch latest blockhash")?;

        let message = Message::new(&[instruction], Some(&payer.pubkey()));
        let mut tx = Transaction::new_unsigned(message);
        let keypairs: Vec<&Keypair> = signers.iter().map(|s| s.as_ref()).collect();
        tx.try_sign(&keypairs, blockhash)
            .context("Failed to sign transaction")?;

        let signature = self
            .client
            .send_and_confirm_transaction(&tx)
            .await
            .with_context(|| format!("Failed {} submission", name))?;

        tracing::info!(instruction = name, signature = %signature, "Transaction confirmed");
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::encode_base_account;

    fn account(owner: Pubkey, data: Vec<u8>) -> Account {
        Account {
            lamports: 1_000_000,
            data,
            owner,
            executable: false,
            rent_epoch: 0,
        }
    }

    #[test]
    fn test_missing_account_is_not_found() {
        let address = Pubkey::new_unique();
        let outcome = classify_account(&address, None, &Pubkey::new_unique());
        assert_eq!(outcome, FetchOutcome::NotFound);
    }

    #[test]
    fn test_foreign_owner_is_transient() {
        let program_id = Pubkey::new_unique();
        let data = encode_base_account(&[("https://x/1.gif", [1u8; 32])]);
        let outcome = classify_account(
            &Pubkey::new_unique(),
            Some(account(Pubkey::new_unique(), data)),
            &program_id,
        );
        assert!(matches!(outcome, FetchOutcome::TransientError(msg) if msg.contains("owned by")));
    }

    #[test]
    fn test_corrupt_data_is_transient() {
        let program_id = Pubkey::new_unique();
        let mut data = encode_base_account(&[]);
        data[0] ^= 0xff;
        let outcome = classify_account(&Pubkey::new_unique(), Some(account(program_id, data)), &program_id);
        assert!(matches!(outcome, FetchOutcome::TransientError(_)));

        let outcome = classify_account(&Pubkey::new_unique(), Some(account(program_id, vec![])), &program_id);
        assert!(matches!(outcome, FetchOutcome::TransientError(_)));
    }

    #[test]
    fn test_program_account_is_found() {
        let program_id = Pubkey::new_unique();
        let mut data = encode_base_account(&[("https://x/1.gif", [7u8; 32])]);
        data.extend([0u8; 64]);

        let outcome = classify_account(&Pubkey::new_unique(), Some(account(program_id, data)), &program_id);
        let FetchOutcome::Found(items) = outcome else {
            panic!("expected the GIF list");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].gif_link, "https://x/1.gif");
        assert_eq!(items[0].user_address, Pubkey::new_from_array([7u8; 32]).to_string());
    }
}
