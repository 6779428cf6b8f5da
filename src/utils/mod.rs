//! Browser utility functions.
//!
//! - [`dom`] - Window access and hash navigation

pub mod dom;
