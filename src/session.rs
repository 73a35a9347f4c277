//! Session management: token issue and resolution.

use std::collections::HashMap;
use uuid::Uuid;

use crate::account::{AccountId, AccountStore};
use crate::error::CircleError;

/// Maps opaque session tokens to account handles. An account may hold any
/// number of live sessions. Sessions never expire; they are dropped only by
/// a full system reset.
#[derive(Clone, Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<String, AccountId>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Authenticate against the directory and issue a fresh token.
    pub fn open(
        &mut self,
        store: &AccountStore,
        login: &str,
        password: &str,
    ) -> Result<String, CircleError> {
        let account = store.find(login).ok_or(CircleError::AuthenticationFailed)?;
        if !account.verify_password(password) {
            return Err(CircleError::AuthenticationFailed);
        }

        // Re-roll on the off chance a v4 token collides with a live session.
        let mut token = Uuid::new_v4().to_string();
        while self.sessions.contains_key(&token) {
            token = Uuid::new_v4().to_string();
        }
        self.sessions.insert(token.clone(), account.id);
        Ok(token)
    }

    /// Resolve a token to its account handle. Unknown tokens surface as a
    /// missing account, matching what callers report.
    pub fn resolve(&self, token: &str) -> Result<AccountId, CircleError> {
        self.sessions
            .get(token)
            .copied()
            .ok_or(CircleError::AccountNotFound)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }
}
