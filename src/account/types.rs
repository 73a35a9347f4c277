//! Account type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mailbox::Mailbox;

/// Stable internal account handle. Logins are mutable; handles are not, so
/// friend and request lists hold handles and survive renames.
pub type AccountId = u64;

/// A registered account: identity, credentials, profile and social state.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Account {
    pub id: AccountId,
    pub login: String,
    pub password: String,
    pub name: String,

    /// Custom profile attributes. Reserved field names never land here.
    pub attributes: HashMap<String, String>,

    /// Accepted friendships, in acceptance order. No duplicates, never
    /// contains the account's own handle.
    pub friends: Vec<AccountId>,

    /// Inbound friend requests awaiting acceptance, in arrival order.
    pub requests: Vec<AccountId>,

    pub mailbox: Mailbox,
}

impl Account {
    pub fn new(id: AccountId, login: &str, password: &str, name: &str) -> Self {
        Account {
            id,
            login: login.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            attributes: HashMap::new(),
            friends: Vec::new(),
            requests: Vec::new(),
            mailbox: Mailbox::new(),
        }
    }

    /// Exact plaintext comparison. Stronger authentication is out of scope.
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Profile field addressing. The three reserved names dispatch to built-in
/// fields; every other name is a custom attribute. Resolved once at the API
/// boundary so no string branching leaks into the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Password,
    Login,
    Custom(String),
}

impl ProfileField {
    pub fn from_name(field: &str) -> Self {
        match field {
            "name" => ProfileField::Name,
            "password" => ProfileField::Password,
            "login" => ProfileField::Login,
            other => ProfileField::Custom(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names_resolve_to_builtins() {
        assert_eq!(ProfileField::from_name("name"), ProfileField::Name);
        assert_eq!(ProfileField::from_name("password"), ProfileField::Password);
        assert_eq!(ProfileField::from_name("login"), ProfileField::Login);
        assert_eq!(
            ProfileField::from_name("city"),
            ProfileField::Custom("city".to_string())
        );
    }

    #[test]
    fn test_password_verification() {
        let account = Account::new(1, "alice", "secret", "Alice");
        assert!(account.verify_password("secret"));
        assert!(!account.verify_password("wrong"));
    }
}
