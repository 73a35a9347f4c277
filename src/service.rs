//! The per-process service object.
//!
//! One `CircleService` is constructed per process: it loads the snapshot on
//! open, owns the directory and session table, exposes every operation of
//! the command surface, and saves the snapshot on shutdown. Nothing here is
//! global; callers hold the service explicitly.

use std::path::PathBuf;
use tracing::info;

use crate::account::{AccountStore, ProfileField};
use crate::error::CircleError;
use crate::friends;
use crate::mailbox::Note;
use crate::session::SessionManager;
use crate::storage::SnapshotStore;

pub struct CircleService {
    directory: AccountStore,
    sessions: SessionManager,
    snapshot: SnapshotStore,
}

impl CircleService {
    /// Build the service, loading the snapshot when one exists.
    pub fn open(snapshot_path: impl Into<PathBuf>) -> Result<Self, CircleError> {
        let snapshot = SnapshotStore::new(snapshot_path);
        let directory = snapshot.load()?;
        info!(accounts = directory.len(), "directory loaded");
        Ok(Self {
            directory,
            sessions: SessionManager::new(),
            snapshot,
        })
    }

    pub fn create_account(
        &mut self,
        login: &str,
        password: &str,
        name: &str,
    ) -> Result<(), CircleError> {
        self.directory.create(login, password, name)?;
        info!(login, "account created");
        Ok(())
    }

    pub fn get_attribute(&self, login: &str, field: &str) -> Result<String, CircleError> {
        self.directory
            .attribute(login, &ProfileField::from_name(field))
    }

    pub fn open_session(&mut self, login: &str, password: &str) -> Result<String, CircleError> {
        self.sessions.open(&self.directory, login, password)
    }

    /// Edit one profile field for the session's account. Reserved names hit
    /// the built-in fields; a login edit is a rename subject to uniqueness.
    pub fn edit_profile(
        &mut self,
        token: &str,
        field: &str,
        value: &str,
    ) -> Result<(), CircleError> {
        let id = self.sessions.resolve(token)?;
        match ProfileField::from_name(field) {
            ProfileField::Name => self.directory.get_mut(id)?.name = value.to_string(),
            ProfileField::Password => self.directory.get_mut(id)?.password = value.to_string(),
            ProfileField::Login => self.directory.rename(id, value)?,
            ProfileField::Custom(key) => {
                self.directory
                    .get_mut(id)?
                    .attributes
                    .insert(key, value.to_string());
            }
        }
        Ok(())
    }

    /// Send-or-accept entry point of the friendship protocol.
    pub fn add_friend(&mut self, token: &str, friend_login: &str) -> Result<(), CircleError> {
        let requester = self.sessions.resolve(token)?;
        let target = self
            .directory
            .resolve_login(friend_login)
            .ok_or(CircleError::AccountNotFound)?;
        friends::add_friend(&mut self.directory, requester, target)?;
        Ok(())
    }

    /// Directional membership query on `login`'s friend list. An unknown
    /// friend argument is simply not a friend.
    pub fn is_friend(&self, login: &str, friend_login: &str) -> Result<bool, CircleError> {
        let subject = self
            .directory
            .find(login)
            .ok_or(CircleError::AccountNotFound)?;
        Ok(match self.directory.resolve_login(friend_login) {
            Some(friend) => subject.friends.contains(&friend),
            None => false,
        })
    }

    /// Friend logins in acceptance order.
    pub fn get_friends(&self, login: &str) -> Result<Vec<String>, CircleError> {
        let subject = self
            .directory
            .find(login)
            .ok_or(CircleError::AccountNotFound)?;
        Ok(subject
            .friends
            .iter()
            .filter_map(|id| self.directory.login_of(*id))
            .map(String::from)
            .collect())
    }

    pub fn send_note(
        &mut self,
        token: &str,
        recipient_login: &str,
        body: &str,
    ) -> Result<(), CircleError> {
        let sender = self.sessions.resolve(token)?;
        let recipient = self
            .directory
            .resolve_login(recipient_login)
            .ok_or(CircleError::AccountNotFound)?;
        if sender == recipient {
            return Err(CircleError::SelfMessage);
        }

        let sender_login = self.directory.get(sender)?.login.clone();
        self.directory.get_mut(recipient)?.mailbox.push(Note {
            sender: sender_login,
            body: body.to_string(),
        });
        Ok(())
    }

    /// Pop the head of the session account's mailbox and return the body.
    pub fn read_note(&mut self, token: &str) -> Result<String, CircleError> {
        let id = self.sessions.resolve(token)?;
        let note = self.directory.get_mut(id)?.mailbox.pop()?;
        Ok(note.body)
    }

    /// Drop every account and session and delete the snapshot file.
    pub fn reset(&mut self) -> Result<(), CircleError> {
        self.directory.clear();
        self.sessions.clear();
        self.snapshot.wipe()?;
        info!("system reset");
        Ok(())
    }

    /// Persist the directory. Called at shutdown and on request.
    pub fn save(&self) -> Result<(), CircleError> {
        self.snapshot.save(&self.directory)?;
        info!(accounts = self.directory.len(), "directory saved");
        Ok(())
    }

    pub fn account_count(&self) -> usize {
        self.directory.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (CircleService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let service = CircleService::open(dir.path().join("accounts.json")).unwrap();
        (service, dir)
    }

    fn seeded() -> (CircleService, tempfile::TempDir) {
        let (mut service, dir) = service();
        service.create_account("alice", "secret", "Alice").unwrap();
        service.create_account("bob", "hunter2", "Bob").unwrap();
        (service, dir)
    }

    #[test]
    fn test_friendship_scenario() {
        let (mut service, _dir) = seeded();

        let alice = service.open_session("alice", "secret").unwrap();
        service.add_friend(&alice, "bob").unwrap();
        assert!(!service.is_friend("alice", "bob").unwrap());

        let bob = service.open_session("bob", "hunter2").unwrap();
        service.add_friend(&bob, "alice").unwrap();

        assert!(service.is_friend("alice", "bob").unwrap());
        assert!(service.is_friend("bob", "alice").unwrap());
        assert_eq!(service.get_friends("bob").unwrap(), vec!["alice"]);
        assert_eq!(service.get_friends("alice").unwrap(), vec!["bob"]);
    }

    #[test]
    fn test_note_scenario() {
        let (mut service, _dir) = seeded();

        let alice = service.open_session("alice", "secret").unwrap();
        service.send_note(&alice, "bob", "oi").unwrap();

        let bob = service.open_session("bob", "hunter2").unwrap();
        assert_eq!(service.read_note(&bob).unwrap(), "oi");
        assert_eq!(service.read_note(&bob).unwrap_err(), CircleError::EmptyMailbox);
    }

    #[test]
    fn test_note_fifo_across_senders() {
        let (mut service, _dir) = seeded();
        service.create_account("carol", "pw", "Carol").unwrap();

        let alice = service.open_session("alice", "secret").unwrap();
        let carol = service.open_session("carol", "pw").unwrap();
        service.send_note(&alice, "bob", "first").unwrap();
        service.send_note(&carol, "bob", "second").unwrap();

        let bob = service.open_session("bob", "hunter2").unwrap();
        assert_eq!(service.read_note(&bob).unwrap(), "first");
        assert_eq!(service.read_note(&bob).unwrap(), "second");
    }

    #[test]
    fn test_self_targets_rejected() {
        let (mut service, _dir) = seeded();
        let alice = service.open_session("alice", "secret").unwrap();

        assert_eq!(
            service.add_friend(&alice, "alice").unwrap_err(),
            CircleError::SelfFriendship
        );
        assert_eq!(
            service.send_note(&alice, "alice", "hi").unwrap_err(),
            CircleError::SelfMessage
        );
    }

    #[test]
    fn test_unknown_targets_rejected() {
        let (mut service, _dir) = seeded();
        let alice = service.open_session("alice", "secret").unwrap();

        assert_eq!(
            service.add_friend(&alice, "ghost").unwrap_err(),
            CircleError::AccountNotFound
        );
        assert_eq!(
            service.send_note(&alice, "ghost", "hi").unwrap_err(),
            CircleError::AccountNotFound
        );
        assert_eq!(
            service.is_friend("ghost", "alice").unwrap_err(),
            CircleError::AccountNotFound
        );
        assert!(!service.is_friend("alice", "ghost").unwrap());
    }

    #[test]
    fn test_unknown_token_surfaces_account_not_found() {
        let (mut service, _dir) = seeded();

        assert_eq!(
            service.edit_profile("bogus", "name", "X").unwrap_err(),
            CircleError::AccountNotFound
        );
        assert_eq!(
            service.add_friend("bogus", "bob").unwrap_err(),
            CircleError::AccountNotFound
        );
        assert_eq!(
            service.send_note("bogus", "bob", "hi").unwrap_err(),
            CircleError::AccountNotFound
        );
        assert_eq!(
            service.read_note("bogus").unwrap_err(),
            CircleError::AccountNotFound
        );
    }

    #[test]
    fn test_profile_edit_and_attributes() {
        let (mut service, _dir) = seeded();
        let alice = service.open_session("alice", "secret").unwrap();

        service.edit_profile(&alice, "city", "Maceió").unwrap();
        assert_eq!(service.get_attribute("alice", "city").unwrap(), "Maceió");
        assert_eq!(
            service.get_attribute("alice", "country").unwrap_err(),
            CircleError::AttributeNotSet
        );

        service.edit_profile(&alice, "name", "Alice Silva").unwrap();
        assert_eq!(service.get_attribute("alice", "name").unwrap(), "Alice Silva");

        service.edit_profile(&alice, "password", "newpass").unwrap();
        assert_eq!(
            service.open_session("alice", "secret").unwrap_err(),
            CircleError::AuthenticationFailed
        );
        service.open_session("alice", "newpass").unwrap();
    }

    #[test]
    fn test_rename_keeps_friendships_and_sessions() {
        let (mut service, _dir) = seeded();

        let alice = service.open_session("alice", "secret").unwrap();
        let bob = service.open_session("bob", "hunter2").unwrap();
        service.add_friend(&alice, "bob").unwrap();
        service.add_friend(&bob, "alice").unwrap();

        service.edit_profile(&alice, "login", "alicia").unwrap();

        assert_eq!(
            service.get_attribute("alice", "login").unwrap_err(),
            CircleError::AccountNotFound
        );
        assert_eq!(service.get_friends("bob").unwrap(), vec!["alicia"]);
        // The pre-rename session still acts on the same account.
        service.edit_profile(&alice, "city", "Recife").unwrap();
        assert_eq!(service.get_attribute("alicia", "city").unwrap(), "Recife");
    }

    #[test]
    fn test_rename_collision_via_profile_edit() {
        let (mut service, _dir) = seeded();
        let alice = service.open_session("alice", "secret").unwrap();

        assert_eq!(
            service.edit_profile(&alice, "login", "bob").unwrap_err(),
            CircleError::InvalidCredential
        );
        // Both accounts keep their logins.
        assert_eq!(service.get_attribute("alice", "login").unwrap(), "alice");
        assert_eq!(service.get_attribute("bob", "login").unwrap(), "bob");
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");

        {
            let mut service = CircleService::open(&path).unwrap();
            service.create_account("alice", "secret", "Alice").unwrap();
            service.create_account("bob", "hunter2", "Bob").unwrap();
            let alice = service.open_session("alice", "secret").unwrap();
            service.edit_profile(&alice, "city", "Maceió").unwrap();
            service.add_friend(&alice, "bob").unwrap();
            service.send_note(&alice, "bob", "oi").unwrap();
            service.save().unwrap();
        }

        let mut reloaded = CircleService::open(&path).unwrap();
        assert_eq!(reloaded.account_count(), 2);
        // Sessions are not persisted.
        assert_eq!(reloaded.session_count(), 0);
        assert_eq!(reloaded.get_attribute("alice", "city").unwrap(), "Maceió");
        assert_eq!(reloaded.get_attribute("bob", "password").unwrap(), "hunter2");

        // alice's request to bob survived; bob accepting it still works.
        let bob = reloaded.open_session("bob", "hunter2").unwrap();
        reloaded.add_friend(&bob, "alice").unwrap();
        assert!(reloaded.is_friend("alice", "bob").unwrap());
        assert_eq!(reloaded.read_note(&bob).unwrap(), "oi");
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut service, _dir) = seeded();
        let alice = service.open_session("alice", "secret").unwrap();
        service.save().unwrap();
        assert!(service.snapshot.path().exists());

        service.reset().unwrap();

        assert_eq!(service.account_count(), 0);
        assert_eq!(service.session_count(), 0);
        assert!(!service.snapshot.path().exists());
        assert_eq!(
            service.read_note(&alice).unwrap_err(),
            CircleError::AccountNotFound
        );
        assert_eq!(
            service.get_attribute("alice", "name").unwrap_err(),
            CircleError::AccountNotFound
        );
    }
}
