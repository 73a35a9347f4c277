use thiserror::Error;

/// User-visible failures. Each kind carries one fixed message; callers
/// distinguish outcomes by message text only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircleError {
    #[error("Account not found.")]
    AccountNotFound,
    #[error("An account with this login already exists.")]
    DuplicateAccount,
    #[error("Invalid login or password.")]
    InvalidCredential,
    #[error("Login or password incorrect.")]
    AuthenticationFailed,
    #[error("Cannot add yourself as a friend.")]
    SelfFriendship,
    #[error("Cannot send a note to yourself.")]
    SelfMessage,
    #[error("Friend request already sent, awaiting acceptance.")]
    DuplicateRequest,
    #[error("Already friends.")]
    AlreadyFriends,
    #[error("Attribute not set.")]
    AttributeNotSet,
    #[error("No notes to read.")]
    EmptyMailbox,
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}
