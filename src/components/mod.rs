//! UI components built with Leptos.
//!
//! - [`router`] - Application routing (main entry point)
//! - [`navbar`] - Brand, navigation links and wallet controls
//! - [`modals`] - Install prompt and wallet picker
//! - [`listings`] - Property grid, detail page and favorites
//! - [`dashboard`] - Wallet-gated account overview
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod dashboard;
pub mod icons;
pub mod listings;
pub mod modals;
pub mod navbar;
pub mod router;

pub use router::AppRouter;
