//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

use propchain_wallet::WalletConfig;

// =============================================================================
// Application Metadata
// =============================================================================

/// Brand name displayed in the navigation bar.
pub const APP_NAME: &str = "PropChain";

/// Tagline shown on the home page.
pub const APP_TAGLINE: &str = "Find your next home. Own it on-chain.";

// =============================================================================
// Wallet Configuration
// =============================================================================

/// Download page opened by the install prompt.
pub const WALLET_DOWNLOAD_URL: &str = "https://metamask.io/download/";

/// Name of the single supported wallet.
pub const WALLET_NAME: &str = "MetaMask";

/// Wallet lifecycle configuration (storage keys, display, timeouts).
pub fn wallet_config() -> WalletConfig {
    WalletConfig::default()
}

// =============================================================================
// Listings
// =============================================================================

/// Listing ids marked as favorites on first load.
pub const DEFAULT_FAVORITES: &[u32] = &[1, 4];

/// Number of listings shown on the home page.
pub const FEATURED_COUNT: usize = 3;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
