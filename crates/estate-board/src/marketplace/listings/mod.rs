//! Listing (post) lifecycle: publication, reactions, moderation,
//! complaints, saved search filters, and the ranked public feed.
//!
//! A post's feed position is driven by its `weight`: the like/dislike
//! tally plus whatever an active paid promotion contributes. The
//! reaction machine lives in [`reactions`]; filter matching in
//! [`filters`].

pub mod domain;
pub mod filters;
pub mod reactions;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AgentCommission, Complaint, ComplaintId, ContactChannel, ListingIssue, NewComplaint, NewPost,
    Post, PostId, PostSubmission, PostUpdate,
};
pub use filters::{FilterId, Market, NewSavedFilter, SavedFilter};
pub use reactions::{Reaction, ReactionKind};
pub use repository::ListingRepository;
pub use router::listing_router;
pub use service::{ListingError, ListingService, RELEVANCE_WINDOW_DAYS};
