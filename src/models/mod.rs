//! Data models and types for the application.
//!
//! - [`AppRoute`] - Hash-based navigation
//! - [`Listing`] - Property listings shown on the listings pages

mod listing;
mod route;

pub use listing::{Listing, format_price};
pub use route::AppRoute;
