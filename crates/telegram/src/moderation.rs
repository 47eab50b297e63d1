//! Ban and unban state transitions
//!
//! The store write and the cache update happen here. Telling the affected
//! user is a separate step done by the caller, so a failed delivery never
//! leaves the cache out of step with the store.

use store::{BannedUsers, StoreResult, UserPatch, UserStore};

use crate::constants::messages;
use crate::utils::code;

/// Direction of a moderation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanAction {
    Ban,
    Unban,
}

/// What happened to the target user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanOutcome {
    UnknownUser,
    /// The user was already in the requested state
    Unchanged,
    Changed,
}

/// Parsed arguments of `/ban` and `/unban`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanArgs {
    List,
    Target(i64),
    Invalid,
}

impl BanArgs {
    pub fn parse(args: &str) -> Self {
        match crate::utils::parse_args(args).as_slice() {
            [] => BanArgs::List,
            [id] => crate::utils::parse_user_id(id)
                .map(BanArgs::Target)
                .unwrap_or(BanArgs::Invalid),
            _ => BanArgs::Invalid,
        }
    }
}

impl BanAction {
    fn banned(self) -> bool {
        matches!(self, BanAction::Ban)
    }

    /// Reply for the admin who issued the command
    pub fn reply(self, outcome: BanOutcome, user_id: i64) -> String {
        let id = code(&user_id.to_string());
        match (self, outcome) {
            (_, BanOutcome::UnknownUser) => messages::USER_NOT_FOUND.to_string(),
            (BanAction::Ban, BanOutcome::Unchanged) => messages::ALREADY_BANNED.to_string(),
            (BanAction::Unban, BanOutcome::Unchanged) => messages::NOT_BANNED.to_string(),
            (BanAction::Ban, BanOutcome::Changed) => format!(
                "User [{}] has been banned from the bot. To Unban. {}",
                id,
                code(&format!("/unban {}", user_id))
            ),
            (BanAction::Unban, BanOutcome::Changed) => format!(
                "User [{}] has been unbanned from the bot. To ban. {}",
                id,
                code(&format!("/ban {}", user_id))
            ),
        }
    }

    /// Plain-text summary used for callback answers
    pub fn summary(self, outcome: BanOutcome, user_id: i64) -> String {
        match (self, outcome) {
            (_, BanOutcome::UnknownUser) => messages::USER_NOT_FOUND.to_string(),
            (BanAction::Ban, BanOutcome::Unchanged) => messages::ALREADY_BANNED.to_string(),
            (BanAction::Unban, BanOutcome::Unchanged) => messages::NOT_BANNED.to_string(),
            (BanAction::Ban, BanOutcome::Changed) => format!("User {} has been banned", user_id),
            (BanAction::Unban, BanOutcome::Changed) => format!("User {} has been unbanned", user_id),
        }
    }

    /// Message delivered to the affected user
    pub fn notice(self) -> &'static str {
        match self {
            BanAction::Ban => messages::BANNED_NOTICE,
            BanAction::Unban => messages::UNBANNED_NOTICE,
        }
    }
}

/// Move `user_id` into the state requested by `action`.
///
/// The cache is updated only after the store accepted the write.
pub async fn apply<S: UserStore + ?Sized>(
    store: &S,
    banned: &BannedUsers,
    action: BanAction,
    user_id: i64,
) -> StoreResult<BanOutcome> {
    let Some(user) = store.get_user(user_id).await? else {
        return Ok(BanOutcome::UnknownUser);
    };

    let target = action.banned();
    if user.banned == target {
        return Ok(BanOutcome::Unchanged);
    }

    if !store.update_user_info(user_id, &UserPatch::banned(target)).await? {
        return Ok(BanOutcome::UnknownUser);
    }

    if target {
        banned.add(user_id);
    } else {
        banned.remove(user_id);
    }
    tracing::info!("User {} {:?} applied", user_id, action);

    Ok(BanOutcome::Changed)
}
