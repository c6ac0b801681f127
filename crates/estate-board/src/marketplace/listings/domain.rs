use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::housing::domain::{FlatId, HouseId};

use super::reactions::Reaction;

/// Identifier wrapper for posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PostId(pub u64);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for complaints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComplaintId(pub u64);

/// Commission band the seller offers an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentCommission {
    Small,
    Average,
    Big,
}

/// How the seller wants to be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactChannel {
    Call,
    Message,
    Both,
}

/// What a complaint or a moderation rejection points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingIssue {
    Price,
    Photo,
    Description,
    Other,
}

impl ListingIssue {
    pub const fn label(self) -> &'static str {
        match self {
            ListingIssue::Price => "incorrect price",
            ListingIssue::Photo => "incorrect photo",
            ListingIssue::Description => "incorrect description",
            ListingIssue::Other => "other",
        }
    }
}

/// A published listing.
///
/// `weight` carries the ranking score: the like/dislike tally plus the
/// efficiency of an active paid promotion. `likes` may go negative.
/// A user appears in at most one of `likers`/`dislikers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub flat: FlatId,
    pub house: HouseId,
    pub owner: UserId,
    pub price: f64,
    pub description: String,
    pub commission: AgentCommission,
    pub contact_by: ContactChannel,
    pub weight: i32,
    pub likes: i32,
    pub views: u64,
    pub rejected: bool,
    pub reject_reason: Option<ListingIssue>,
    pub created: NaiveDateTime,
    pub likers: BTreeSet<UserId>,
    pub dislikers: BTreeSet<UserId>,
    pub favorited_by: BTreeSet<UserId>,
}

impl Post {
    /// The user's standing reaction, derived from set membership.
    pub fn reaction_of(&self, user: UserId) -> Reaction {
        if self.likers.contains(&user) {
            Reaction::Liked
        } else if self.dislikers.contains(&user) {
            Reaction::Disliked
        } else {
            Reaction::None
        }
    }
}

/// What a seller submits to publish a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSubmission {
    pub flat: FlatId,
    pub price: f64,
    pub description: String,
    pub commission: AgentCommission,
    pub contact_by: ContactChannel,
}

/// Fully resolved insertion payload; counters start at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub flat: FlatId,
    pub house: HouseId,
    pub owner: UserId,
    pub price: f64,
    pub description: String,
    pub commission: AgentCommission,
    pub contact_by: ContactChannel,
    pub created: NaiveDateTime,
}

/// Owner-editable subset of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostUpdate {
    pub price: f64,
    pub description: String,
    pub commission: AgentCommission,
    pub contact_by: ContactChannel,
}

/// A user's report against a listing; one per (post, author).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub post: PostId,
    pub author: UserId,
    pub reason: ListingIssue,
}

/// Payload for a complaint about to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComplaint {
    pub post: PostId,
    pub author: UserId,
    pub reason: ListingIssue,
}
