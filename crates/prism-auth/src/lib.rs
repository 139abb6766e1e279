//! # prism-auth
//!
//! API-key credential storage for the Prism CLI.
//!
//! The key is a long-lived bearer credential for the analytics service.
//! Storage tiers, in load priority order: OS keyring → `PRISM_API_KEY`
//! environment variable → `~/.config/prism/credentials` file (0600 on unix).

mod error;
mod key_store;

pub use error::AuthError;
pub use key_store::{delete, detect_source, load, mask, store};
