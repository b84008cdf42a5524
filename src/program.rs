//! GIF program codec
//!
//! Builds the two program instructions and decodes the base account.
//! The program is Anchor-based: every instruction and account starts with an
//! 8-byte discriminator (`sha256("<namespace>:<name>")[..8]`) followed by a
//! borsh payload.

use anyhow::{bail, Context, Result};
use borsh::{BorshDeserialize, BorshSerialize};
use sha2::{Digest, Sha256};
use solana_instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::models::GifItem;

/// System program id (all-zero address)
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0; 32]);

const DISCRIMINATOR_LEN: usize = 8;

/// Decoded program instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GifInstruction {
    StartStuffOff,
    AddGif { gif_link: String },
}

impl GifInstruction {
    pub fn name(&self) -> &'static str {
        match self {
            GifInstruction::StartStuffOff => "start_stuff_off",
            GifInstruction::AddGif { .. } => "add_gif",
        }
    }
}

/// Decoded base account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseAccount {
    pub total_gifs: u64,
    pub gif_list: Vec<GifItem>,
}

#[derive(BorshSerialize, BorshDeserialize)]
struct RawItem {
    gif_link: String,
    user_address: [u8; 32],
}

#[derive(BorshSerialize, BorshDeserialize)]
struct RawBaseAccount {
    total_gifs: u64,
    gif_list: Vec<RawItem>,
}

fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let hash = Sha256::digest(format!("{}:{}", namespace, name).as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    out
}

fn instruction_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator("global", name)
}

fn account_discriminator() -> [u8; DISCRIMINATOR_LEN] {
    discriminator("account", "BaseAccount")
}

/// Creates the base account. Both `base_account` and `user` must sign.
pub fn start_stuff_off(program_id: &Pubkey, base_account: &Pubkey, user: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*base_account, true),
            AccountMeta::new(*user, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: instruction_discriminator("start_stuff_off").to_vec(),
    }
}

/// Appends `gif_link` to the base account's list, attributed to `user`
pub fn add_gif(
    program_id: &Pubkey,
    base_account: &Pubkey,
    user: &Pubkey,
    gif_link: &str,
) -> Result<Instruction> {
    let mut data = instruction_discriminator("add_gif").to_vec();
    data.extend(borsh::to_vec(gif_link).context("Failed to encode gif link")?);

    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*base_account, false),
            AccountMeta::new(*user, true),
        ],
        data,
    })
}

/// Maps instruction data back to a known program instruction
pub fn decode_instruction(data: &[u8]) -> Option<GifInstruction> {
    if data.len() < DISCRIMINATOR_LEN {
        return None;
    }
    let (tag, args) = data.split_at(DISCRIMINATOR_LEN);

    if tag == instruction_discriminator("start_stuff_off") {
        Some(GifInstruction::StartStuffOff)
    } else if tag == instruction_discriminator("add_gif") {
        let gif_link = String::try_from_slice(args).ok()?;
        Some(GifInstruction::AddGif { gif_link })
    } else {
        None
    }
}

/// Decodes base account data. Bytes past the borsh payload are ignored since
/// accounts are allocated with spare space.
pub fn decode_base_account(data: &[u8]) -> Result<BaseAccount> {
    if data.len() < DISCRIMINATOR_LEN {
        bail!("Account data too short ({} bytes)", data.len());
    }
    let (tag, mut payload) = data.split_at(DISCRIMINATOR_LEN);
    if tag != account_discriminator() {
        bail!("Account is not a BaseAccount");
    }

    let raw = RawBaseAccount::deserialize(&mut payload).context("Malformed BaseAccount data")?;

    Ok(BaseAccount {
        total_gifs: raw.total_gifs,
        gif_list: raw
            .gif_list
            .into_iter()
            .map(|item| GifItem {
                gif_link: item.gif_link,
                user_address: Pubkey::new_from_array(item.user_address).to_string(),
            })
            .collect(),
    })
}

/// Encodes base account data the way the program stores it
#[cfg(test)]
pub(crate) fn encode_base_account(items: &[(&str, [u8; 32])]) -> Vec<u8> {
    let raw = RawBaseAccount {
        total_gifs: items.len() as u64,
        gif_list: items
            .iter()
            .map(|(link, user)| RawItem {
                gif_link: link.to_string(),
                user_address: *user,
            })
            .collect(),
    };
    let mut data = account_discriminator().to_vec();
    data.extend(borsh::to_vec(&raw).unwrap());
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_discriminators() {
        // sha256("global:initialize")[..8], the well-known Anchor value
        assert_eq!(
            instruction_discriminator("initialize"),
            [175, 175, 109, 31, 13, 152, 155, 237]
        );
        assert_ne!(
            instruction_discriminator("start_stuff_off"),
            instruction_discriminator("add_gif")
        );
    }

    #[test]
    fn test_start_stuff_off_accounts() {
        let program = Pubkey::new_unique();
        let base = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let ix = start_stuff_off(&program, &base, &user);

        assert_eq!(ix.program_id, program);
        assert_eq!(ix.accounts.len(), 3);
        assert!(ix.accounts[0].is_signer && ix.accounts[0].is_writable);
        assert!(ix.accounts[1].is_signer && ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].pubkey, SYSTEM_PROGRAM_ID);
        assert!(!ix.accounts[2].is_writable);
        assert_eq!(decode_instruction(&ix.data), Some(GifInstruction::StartStuffOff));
    }

    #[test]
    fn test_add_gif_layout() {
        let program = Pubkey::new_unique();
        let base = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let ix = add_gif(&program, &base, &user, "https://x/2.gif").unwrap();

        assert!(!ix.accounts[0].is_signer);
        assert!(ix.accounts[1].is_signer);
        // discriminator + u32 length prefix + utf8 bytes
        assert_eq!(ix.data.len(), 8 + 4 + "https://x/2.gif".len());
        assert_eq!(&ix.data[8..12], &(15u32).to_le_bytes());
        assert_eq!(
            decode_instruction(&ix.data),
            Some(GifInstruction::AddGif {
                gif_link: "https://x/2.gif".to_string()
            })
        );
    }

    #[test]
    fn test_decode_unknown_instruction() {
        assert_eq!(decode_instruction(&[1, 2, 3]), None);
        assert_eq!(decode_instruction(&[0u8; 16]), None);
    }

    #[test]
    fn test_decode_base_account_ignores_trailing_space() {
        let mut data = encode_base_account(&[("https://x/1.gif", [7u8; 32]), ("https://x/2.gif", [9u8; 32])]);
        data.extend([0u8; 512]);

        let account = decode_base_account(&data).unwrap();
        assert_eq!(account.total_gifs, 2);
        assert_eq!(account.gif_list[0].gif_link, "https://x/1.gif");
        assert_eq!(account.gif_list[1].gif_link, "https://x/2.gif");
        assert_eq!(
            account.gif_list[0].user_address,
            Pubkey::new_from_array([7u8; 32]).to_string()
        );
    }

    #[test]
    fn test_decode_base_account_rejects_foreign_data() {
        let mut data = encode_base_account(&[]);
        data[0] ^= 0xff;
        assert!(decode_base_account(&data).is_err());
        assert!(decode_base_account(&[1, 2]).is_err());
    }
}
