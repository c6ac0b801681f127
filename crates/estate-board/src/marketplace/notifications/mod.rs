//! System messages and user-to-user mail.
//!
//! The dispatcher implements the [`Notifier`] primitive the scheduled
//! sweeps use; it resolves each recipient's notification preference and
//! writes messages on behalf of the provisioned system sender.

pub mod dispatch;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use dispatch::{NotificationDispatcher, Notifier, NotifyError};
pub use domain::{Message, MessageId, NewMessage};
pub use repository::MessageRepository;
pub use router::messaging_router;
pub use service::{MessagingError, MessagingService};
