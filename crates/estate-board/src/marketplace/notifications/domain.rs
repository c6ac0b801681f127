use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::marketplace::accounts::domain::UserId;

/// Identifier assigned by the message store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A delivered message.
///
/// `sender` is `None` for mail whose author account has since been
/// removed; system mail carries the provisioned system account instead
/// so conversations always have two resolvable ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Option<UserId>,
    pub receiver: UserId,
    pub text: String,
    pub created: NaiveDateTime,
}

/// Payload for a message about to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub sender: Option<UserId>,
    pub receiver: UserId,
    pub text: String,
}
