//! Account storage and management

use std::collections::HashMap;

use super::types::{Account, AccountId, ProfileField};
use crate::error::CircleError;

/// The process-wide account directory. Owns every account and enforces
/// login uniqueness. Logins index into stable handles; a rename rekeys the
/// index without touching any peer's friend or request lists.
#[derive(Clone, Debug, Default)]
pub struct AccountStore {
    accounts: HashMap<AccountId, Account>,
    by_login: HashMap<String, AccountId>,
    next_id: AccountId,
}

impl AccountStore {
    /// Create a new empty account directory
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            by_login: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a new account with empty social state.
    pub fn create(
        &mut self,
        login: &str,
        password: &str,
        name: &str,
    ) -> Result<AccountId, CircleError> {
        if self.by_login.contains_key(login) {
            return Err(CircleError::DuplicateAccount);
        }
        if login.is_empty() || password.is_empty() {
            return Err(CircleError::InvalidCredential);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.by_login.insert(login.to_string(), id);
        self.accounts.insert(id, Account::new(id, login, password, name));
        Ok(id)
    }

    /// Exact-match login lookup.
    pub fn find(&self, login: &str) -> Option<&Account> {
        self.by_login
            .get(login)
            .and_then(|id| self.accounts.get(id))
    }

    pub fn find_mut(&mut self, login: &str) -> Option<&mut Account> {
        let id = self.by_login.get(login).copied()?;
        self.accounts.get_mut(&id)
    }

    pub fn resolve_login(&self, login: &str) -> Option<AccountId> {
        self.by_login.get(login).copied()
    }

    /// Account by handle. Handles never dangle within a process run, but
    /// callers still get a typed error rather than a panic.
    pub fn get(&self, id: AccountId) -> Result<&Account, CircleError> {
        self.accounts.get(&id).ok_or(CircleError::AccountNotFound)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Result<&mut Account, CircleError> {
        self.accounts
            .get_mut(&id)
            .ok_or(CircleError::AccountNotFound)
    }

    pub fn login_of(&self, id: AccountId) -> Option<&str> {
        self.accounts.get(&id).map(|a| a.login.as_str())
    }

    /// Read one profile field by login.
    pub fn attribute(&self, login: &str, field: &ProfileField) -> Result<String, CircleError> {
        let account = self.find(login).ok_or(CircleError::AccountNotFound)?;
        match field {
            ProfileField::Name => Ok(account.name.clone()),
            ProfileField::Password => Ok(account.password.clone()),
            ProfileField::Login => Ok(account.login.clone()),
            ProfileField::Custom(key) => account
                .attributes
                .get(key)
                .cloned()
                .ok_or(CircleError::AttributeNotSet),
        }
    }

    /// Move an account to a new login. Renaming to the current login is a
    /// no-op; a login held by another account (or an empty one) is rejected
    /// and both accounts are left unchanged.
    pub fn rename(&mut self, id: AccountId, new_login: &str) -> Result<(), CircleError> {
        let current = self.get(id)?.login.clone();
        if current == new_login {
            return Ok(());
        }
        if new_login.is_empty() || self.by_login.contains_key(new_login) {
            return Err(CircleError::InvalidCredential);
        }

        self.by_login.remove(&current);
        self.by_login.insert(new_login.to_string(), id);
        self.get_mut(id)?.login = new_login.to_string();
        Ok(())
    }

    /// Accounts in creation order (handle order).
    pub fn iter_ordered(&self) -> Vec<&Account> {
        let mut ids: Vec<AccountId> = self.accounts.keys().copied().collect();
        ids.sort_unstable();
        ids.iter().filter_map(|id| self.accounts.get(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Drop every account. Handles are not reused within a process run.
    pub fn clear(&mut self) {
        self.accounts.clear();
        self.by_login.clear();
    }
}
