//! Two-phase friendship protocol.
//!
//! A single "add" entry point does double duty: the first call queues a
//! request with the target, and the target calling add back accepts it.
//! There is no decline operation; an unanswered request stays pending.

use crate::account::{Account, AccountId, AccountStore};
use crate::error::CircleError;

/// Relationship between an ordered pair (requester, target), derived from
/// the stored request and friend lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationState {
    Unrelated,
    /// The requester already asked the target; waiting on the target.
    PendingOutbound,
    /// The target already asked the requester; an add from here accepts.
    PendingInbound,
    Friends,
}

/// What one successful "add" call did to the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A request was queued with the target.
    Requested,
    /// Both sides became friends.
    Accepted,
}

pub fn classify(requester: &Account, target: &Account) -> RelationState {
    if requester.requests.contains(&target.id) {
        RelationState::PendingInbound
    } else if target.requests.contains(&requester.id) {
        RelationState::PendingOutbound
    } else if requester.friends.contains(&target.id) {
        RelationState::Friends
    } else {
        RelationState::Unrelated
    }
}

/// The transition table of the protocol. Pure: decides the step, applies
/// nothing.
pub fn advance(state: RelationState) -> Result<Advance, CircleError> {
    match state {
        RelationState::Unrelated => Ok(Advance::Requested),
        RelationState::PendingInbound => Ok(Advance::Accepted),
        RelationState::PendingOutbound => Err(CircleError::DuplicateRequest),
        RelationState::Friends => Err(CircleError::AlreadyFriends),
    }
}

/// Run one protocol step for `requester` adding `target`. Either the whole
/// effect applies or none of it does.
pub fn add_friend(
    store: &mut AccountStore,
    requester: AccountId,
    target: AccountId,
) -> Result<Advance, CircleError> {
    if requester == target {
        return Err(CircleError::SelfFriendship);
    }

    let state = classify(store.get(requester)?, store.get(target)?);
    let step = advance(state)?;
    match step {
        Advance::Requested => {
            store.get_mut(target)?.requests.push(requester);
        }
        Advance::Accepted => {
            // Clear the pending entry on both sides before linking, so the
            // pair ends with exactly one friend entry each and no leftover
            // request in either direction.
            let r = store.get_mut(requester)?;
            r.requests.retain(|id| *id != target);
            r.friends.push(target);

            let t = store.get_mut(target)?;
            t.requests.retain(|id| *id != requester);
            t.friends.push(requester);
        }
    }
    Ok(step)
}
