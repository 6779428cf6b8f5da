//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuDownload as Download, LuExternalLink as ExternalLink, LuGlobe as Network,
        LuHeart as Heart, LuHeart as HeartFilled, LuHouse as Home,
        LuLayoutDashboard as Dashboard, LuLogOut as Logout, LuMapPin as Location,
        LuWallet as Wallet, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBoxArrowRight as Logout, BsBoxArrowUpRight as ExternalLink, BsDownload as Download,
        BsGeoAltFill as Location, BsGlobe as Network, BsHeart as Heart,
        BsHeartFill as HeartFilled, BsHouseFill as Home, BsSpeedometer2 as Dashboard,
        BsWallet2 as Wallet, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(HOME, Home);
themed_icon!(WALLET, Wallet);
themed_icon!(LOGOUT, Logout);
themed_icon!(CLOSE, Close);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(DOWNLOAD, Download);
themed_icon!(HEART, Heart);
themed_icon!(HEART_FILLED, HeartFilled);
themed_icon!(LOCATION, Location);
themed_icon!(NETWORK, Network);
themed_icon!(DASHBOARD, Dashboard);
