use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::store::StoreError;

use super::domain::{Message, NewMessage};

/// Storage surface for delivered mail.
pub trait MessageRepository: Send + Sync {
    /// Persists a message and returns it with its assigned id and
    /// delivery timestamp.
    fn insert_message(&self, message: NewMessage) -> Result<Message, StoreError>;

    /// Everything addressed to `receiver`, oldest first.
    fn inbox(&self, receiver: UserId) -> Result<Vec<Message>, StoreError>;

    /// Messages exchanged between `a` and `b` in either direction,
    /// oldest first.
    fn conversation(&self, a: UserId, b: UserId) -> Result<Vec<Message>, StoreError>;
}
