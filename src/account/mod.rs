//! Account module
//!
//! Identity, credentials and profile state, plus the process-wide directory:
//! - Human-readable logins resolving to stable internal handles
//! - Plaintext password credential (stronger auth is out of scope)
//! - Free-form string profile attributes with reserved-name dispatch

pub mod store;
pub mod types;

pub use store::AccountStore;
pub use types::{Account, AccountId, ProfileField};
