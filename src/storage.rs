//! JSON snapshot persistence for the account directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::account::AccountStore;
use crate::error::CircleError;
use crate::mailbox::Note;

/// On-disk account record. Friends and requests are stored as logins, the
/// externally unique key; stable handles are reassigned on load.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AccountRecord {
    pub login: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub requests: Vec<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// Loads and saves the full directory as a single JSON snapshot file.
/// Sessions are never persisted.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is an empty directory, not an
    /// error.
    pub fn load(&self) -> Result<AccountStore, CircleError> {
        if !self.path.exists() {
            return Ok(AccountStore::new());
        }
        let data = fs::read_to_string(&self.path)
            .map_err(|e| CircleError::Snapshot(e.to_string()))?;
        let records: Vec<AccountRecord> =
            serde_json::from_str(&data).map_err(|e| CircleError::Snapshot(e.to_string()))?;
        restore(&records)
    }

    /// Write the full current account set, in creation order.
    pub fn save(&self, store: &AccountStore) -> Result<(), CircleError> {
        let records = snapshot(store);
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| CircleError::Snapshot(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| CircleError::Snapshot(e.to_string()))
    }

    /// Delete the snapshot file, if present.
    pub fn wipe(&self) -> Result<(), CircleError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| CircleError::Snapshot(e.to_string()))?;
        }
        Ok(())
    }
}

/// Flatten the directory into login-keyed records.
pub fn snapshot(store: &AccountStore) -> Vec<AccountRecord> {
    store
        .iter_ordered()
        .into_iter()
        .map(|account| AccountRecord {
            login: account.login.clone(),
            password: account.password.clone(),
            name: account.name.clone(),
            attributes: account.attributes.clone(),
            friends: logins_of(store, &account.friends),
            requests: logins_of(store, &account.requests),
            notes: account.mailbox.iter().cloned().collect(),
        })
        .collect()
}

/// Rebuild a directory from records: create every account first, then
/// restore attributes, social lists and mailboxes verbatim.
pub fn restore(records: &[AccountRecord]) -> Result<AccountStore, CircleError> {
    let mut store = AccountStore::new();
    for rec in records {
        store.create(&rec.login, &rec.password, &rec.name)?;
    }
    for rec in records {
        let friends = resolve_all(&store, &rec.friends)?;
        let requests = resolve_all(&store, &rec.requests)?;
        let account = store
            .find_mut(&rec.login)
            .ok_or(CircleError::AccountNotFound)?;
        account.attributes = rec.attributes.clone();
        account.friends = friends;
        account.requests = requests;
        for note in &rec.notes {
            account.mailbox.push(note.clone());
        }
    }
    Ok(store)
}

fn logins_of(store: &AccountStore, ids: &[crate::account::AccountId]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| store.login_of(*id))
        .map(String::from)
        .collect()
}

fn resolve_all(
    store: &AccountStore,
    logins: &[String],
) -> Result<Vec<crate::account::AccountId>, CircleError> {
    logins
        .iter()
        .map(|login| {
            store
                .resolve_login(login)
                .ok_or_else(|| CircleError::Snapshot(format!("unknown login '{}' in snapshot", login)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friends;
    use crate::mailbox::Note;

    #[test]
    fn test_missing_file_is_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotStore::new(dir.path().join("accounts.json"));
        let store = snapshot.load().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_full_state() {
        let mut store = AccountStore::new();
        let alice = store.create("alice", "secret", "Alice").unwrap();
        let bob = store.create("bob", "hunter2", "Bob").unwrap();
        store.create("carol", "pw", "Carol").unwrap();

        store
            .find_mut("alice")
            .unwrap()
            .attributes
            .insert("city".to_string(), "Maceió".to_string());
        friends::add_friend(&mut store, alice, bob).unwrap();
        friends::add_friend(&mut store, bob, alice).unwrap();
        // carol's request to alice stays pending across the roundtrip.
        let carol = store.resolve_login("carol").unwrap();
        friends::add_friend(&mut store, carol, alice).unwrap();
        store.find_mut("bob").unwrap().mailbox.push(Note {
            sender: "alice".to_string(),
            body: "oi".to_string(),
        });
        store.find_mut("bob").unwrap().mailbox.push(Note {
            sender: "carol".to_string(),
            body: "tudo bem?".to_string(),
        });

        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotStore::new(dir.path().join("accounts.json"));
        snapshot.save(&store).unwrap();
        let reloaded = snapshot.load().unwrap();

        assert_eq!(reloaded.len(), 3);
        assert_eq!(
            reloaded.find("alice").unwrap().attributes.get("city").unwrap(),
            "Maceió"
        );

        let alice2 = reloaded.find("alice").unwrap();
        let bob2 = reloaded.find("bob").unwrap();
        assert_eq!(alice2.friends, vec![bob2.id]);
        assert_eq!(bob2.friends, vec![alice2.id]);
        let carol2 = reloaded.find("carol").unwrap().id;
        assert_eq!(alice2.requests, vec![carol2]);

        // Note order and captured senders survive the roundtrip.
        let mut mailbox = reloaded.find("bob").unwrap().mailbox.clone();
        let first = mailbox.pop().unwrap();
        assert_eq!(first.sender, "alice");
        assert_eq!(first.body, "oi");
        let second = mailbox.pop().unwrap();
        assert_eq!(second.sender, "carol");
        assert_eq!(second.body, "tudo bem?");
    }

    #[test]
    fn test_wipe_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotStore::new(dir.path().join("accounts.json"));
        snapshot.save(&AccountStore::new()).unwrap();
        assert!(snapshot.path().exists());

        snapshot.wipe().unwrap();
        assert!(!snapshot.path().exists());
        // Wiping an already-absent file is fine.
        snapshot.wipe().unwrap();
    }
}
