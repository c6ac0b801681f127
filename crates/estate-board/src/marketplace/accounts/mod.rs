//! Account lifecycle: registration, roles, subscriptions, contact
//! books, and the moderation flags the rest of the marketplace keys
//! off.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Contact, ContactId, NewContact, NewUser, NotifyPreference, Role, User, UserId};
pub use repository::AccountRepository;
pub use router::account_router;
pub use service::{AccountError, AccountService};
