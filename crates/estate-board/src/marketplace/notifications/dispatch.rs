use std::sync::Arc;

use crate::marketplace::accounts::domain::{NotifyPreference, UserId};
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::store::StoreError;

use super::domain::NewMessage;
use super::repository::MessageRepository;

/// Failure raised while delivering a system notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification recipient does not exist")]
    UnknownRecipient,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Delivery primitive used by the scheduled sweeps and the services
/// that raise account-facing events.
pub trait Notifier: Send + Sync {
    /// Delivers `text` to `recipient`, honouring the recipient's
    /// notification preference.
    fn notify(&self, recipient: UserId, text: &str) -> Result<(), NotifyError>;
}

/// Routes system mail according to each account's notification
/// preference.
///
/// Mail is authored by the provisioned system account so recipients can
/// tell operational notices apart from user conversations. A recipient
/// who prefers agent delivery but has no agent on file receives the
/// message directly rather than silently losing it.
pub struct NotificationDispatcher<M, U> {
    messages: Arc<M>,
    users: Arc<U>,
    system_sender: UserId,
}

impl<M, U> NotificationDispatcher<M, U>
where
    M: MessageRepository + 'static,
    U: AccountRepository + 'static,
{
    pub fn new(messages: Arc<M>, users: Arc<U>, system_sender: UserId) -> Self {
        Self {
            messages,
            users,
            system_sender,
        }
    }

    fn deliver(&self, receiver: UserId, text: &str) -> Result<(), NotifyError> {
        self.messages.insert_message(NewMessage {
            sender: Some(self.system_sender),
            receiver,
            text: text.to_owned(),
        })?;
        Ok(())
    }
}

impl<M, U> Notifier for NotificationDispatcher<M, U>
where
    M: MessageRepository + 'static,
    U: AccountRepository + 'static,
{
    fn notify(&self, recipient: UserId, text: &str) -> Result<(), NotifyError> {
        let user = self
            .users
            .fetch_user(recipient)?
            .ok_or(NotifyError::UnknownRecipient)?;

        match user.notify {
            NotifyPreference::Off => Ok(()),
            NotifyPreference::Me => self.deliver(recipient, text),
            NotifyPreference::Agent => match user.agent {
                Some(agent) => self.deliver(agent, text),
                None => self.deliver(recipient, text),
            },
            NotifyPreference::MeAndAgent => {
                self.deliver(recipient, text)?;
                if let Some(agent) = user.agent {
                    self.deliver(agent, text)?;
                }
                Ok(())
            }
        }
    }
}
