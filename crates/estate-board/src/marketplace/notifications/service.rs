use std::sync::Arc;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::store::StoreError;

use super::domain::{Message, NewMessage};
use super::repository::MessageRepository;

/// Error raised by the messaging service.
#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("message recipient does not exist")]
    UnknownRecipient,
    #[error("only participants may read a conversation")]
    NotParticipant,
    #[error("message text must not be empty")]
    EmptyText,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Direct mail between accounts.
pub struct MessagingService<M, U> {
    messages: Arc<M>,
    users: Arc<U>,
}

impl<M, U> MessagingService<M, U>
where
    M: MessageRepository + 'static,
    U: AccountRepository + 'static,
{
    pub fn new(messages: Arc<M>, users: Arc<U>) -> Self {
        Self { messages, users }
    }

    /// Sends a message from `sender` to `receiver`.
    pub fn send(
        &self,
        sender: UserId,
        receiver: UserId,
        text: &str,
    ) -> Result<Message, MessagingError> {
        if text.trim().is_empty() {
            return Err(MessagingError::EmptyText);
        }
        self.users
            .fetch_user(receiver)?
            .ok_or(MessagingError::UnknownRecipient)?;

        let message = self.messages.insert_message(NewMessage {
            sender: Some(sender),
            receiver,
            text: text.to_owned(),
        })?;
        Ok(message)
    }

    /// The full exchange between `a` and `b`, readable only by one of
    /// the two participants.
    pub fn conversation(
        &self,
        viewer: UserId,
        a: UserId,
        b: UserId,
    ) -> Result<Vec<Message>, MessagingError> {
        if viewer != a && viewer != b {
            return Err(MessagingError::NotParticipant);
        }
        Ok(self.messages.conversation(a, b)?)
    }

    /// Everything addressed to the viewer, oldest first.
    pub fn inbox(&self, viewer: UserId) -> Result<Vec<Message>, MessagingError> {
        Ok(self.messages.inbox(viewer)?)
    }
}
