use chrono::NaiveDate;

use crate::marketplace::store::StoreError;

use super::domain::{Contact, ContactId, NewContact, NewUser, User, UserId};

/// Storage surface for accounts and their contact books.
pub trait AccountRepository: Send + Sync {
    /// Persists a registration and returns the stored account with its
    /// assigned id.
    fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    fn fetch_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Replaces the stored account matching `user.id`.
    fn update_user(&self, user: User) -> Result<(), StoreError>;

    /// Accounts still marked subscribed whose paid period ends exactly
    /// on `date`.
    fn subscriptions_ending(&self, date: NaiveDate) -> Result<Vec<User>, StoreError>;

    fn insert_contact(&self, contact: NewContact) -> Result<Contact, StoreError>;

    fn delete_contact(&self, id: ContactId) -> Result<(), StoreError>;

    fn fetch_contact(&self, id: ContactId) -> Result<Option<Contact>, StoreError>;

    /// The owner's contact book in insertion order.
    fn contacts_for(&self, owner: UserId) -> Result<Vec<Contact>, StoreError>;
}
