//! Wallet configuration.
//!
//! Centralizes the storage layout, display lengths and provider timing
//! used by the lifecycle manager.

// =============================================================================
// Storage Layout
// =============================================================================

/// localStorage keys for the persisted connection snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// `"true"` while a connection is persisted.
    pub connected: String,
    /// Last connected account address.
    pub account: String,
    /// Last known chain id as a `0x` hex string.
    pub chain_id: String,
    /// `"true"` after an explicit disconnect; suppresses auto-restore.
    pub disconnected: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            connected: "walletConnected".to_string(),
            account: "walletAddress".to_string(),
            chain_id: "chainId".to_string(),
            disconnected: "walletDisconnected".to_string(),
        }
    }
}

// =============================================================================
// Address Display
// =============================================================================

/// Leading characters kept by [`format_address`](crate::format_address).
pub const DEFAULT_PREFIX_LEN: usize = 6;

/// Trailing characters kept by [`format_address`](crate::format_address).
pub const DEFAULT_SUFFIX_LEN: usize = 4;

// =============================================================================
// Provider Timing
// =============================================================================

/// Timeout for non-prompting provider calls in milliseconds.
pub const SILENT_PROBE_TIMEOUT_MS: i32 = 2000;

/// Top-level wallet configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub keys: StorageKeys,
    pub prefix_len: usize,
    pub suffix_len: usize,
    /// Applied by the browser adapter to `eth_accounts` and `eth_chainId`.
    /// Prompting calls are never timed out.
    pub silent_probe_timeout_ms: i32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            prefix_len: DEFAULT_PREFIX_LEN,
            suffix_len: DEFAULT_SUFFIX_LEN,
            silent_probe_timeout_ms: SILENT_PROBE_TIMEOUT_MS,
        }
    }
}
