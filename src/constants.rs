//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default RPC endpoint (devnet cluster)
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Default commitment level for reads and preflight
pub const DEFAULT_COMMITMENT: &str = "processed";

/// Directory under $HOME holding config, trust store and base account keypair
pub const CONFIG_DIR_NAME: &str = ".gif-portal";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Trusted wallet addresses file name inside the config directory
pub const TRUST_FILE_NAME: &str = "trusted.yaml";

/// Base account keypair file name inside the config directory
pub const BASE_ACCOUNT_FILE_NAME: &str = "base_account.json";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "gif-portal.log";

/// Brand reported by the keypair-file wallet
pub const KEYPAIR_WALLET_BRAND: &str = "keypair-file";

/// Maximum number of entries kept in the activity log
pub const MAX_ACTIVITY: usize = 100;

/// Footer handle
pub const TWITTER_HANDLE: &str = "ryan_c_harris";

/// Application name
pub const APP_NAME: &str = "GIF Portal";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Footer link target
pub fn twitter_link() -> String {
    format!("https://twitter.com/{}", TWITTER_HANDLE)
}
