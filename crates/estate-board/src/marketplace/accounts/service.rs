use std::sync::Arc;

use chrono::{Days, Months, NaiveDate};

use crate::marketplace::notifications::dispatch::{Notifier, NotifyError};
use crate::marketplace::store::StoreError;

use super::domain::{Contact, ContactId, NewContact, NewUser, NotifyPreference, Role, User, UserId};
use super::repository::AccountRepository;

/// How many days before a subscription lapses the advance warning goes
/// out.
pub const EXPIRY_WARNING_DAYS: u64 = 10;

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("the system role is provisioned at startup and cannot be registered")]
    ReservedRole,
    #[error("an email address is required")]
    MissingEmail,
    #[error("only staff may change moderation flags")]
    NotStaff,
    #[error("an assigned agent must hold the agent role")]
    NotAnAgent,
    #[error("a contact must reference another account")]
    SelfContact,
    #[error("only the owner may edit a contact book")]
    NotContactOwner,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Service composing account registration, subscriptions, contact
/// books, and the scheduled subscription sweeps.
pub struct AccountService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
}

impl<R, N> AccountService<R, N>
where
    R: AccountRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Registers a new account. The system role is reserved for the
    /// provisioned notification sender.
    pub fn register(&self, registration: NewUser) -> Result<User, AccountError> {
        if registration.role == Role::System {
            return Err(AccountError::ReservedRole);
        }
        if registration.email.trim().is_empty() {
            return Err(AccountError::MissingEmail);
        }
        Ok(self.repository.insert_user(registration)?)
    }

    pub fn profile(&self, id: UserId) -> Result<User, AccountError> {
        Ok(self.repository.fetch_user(id)?.ok_or(StoreError::NotFound)?)
    }

    /// Activates the paid tier for one month from `today`.
    pub fn subscribe(&self, id: UserId, today: NaiveDate) -> Result<User, AccountError> {
        let mut user = self.profile(id)?;
        user.subscribed = true;
        user.subscription_until = Some(today + Months::new(1));
        self.repository.update_user(user.clone())?;
        Ok(user)
    }

    /// Moves the paid period's end to `today`; the daily sweep clears
    /// the flag and tells the account.
    pub fn cancel_subscription(&self, id: UserId, today: NaiveDate) -> Result<User, AccountError> {
        let mut user = self.profile(id)?;
        user.subscription_until = Some(today);
        self.repository.update_user(user.clone())?;
        Ok(user)
    }

    pub fn set_notify_preference(
        &self,
        id: UserId,
        preference: NotifyPreference,
    ) -> Result<User, AccountError> {
        let mut user = self.profile(id)?;
        user.notify = preference;
        self.repository.update_user(user.clone())?;
        Ok(user)
    }

    /// Points the account at a personal agent, or clears the
    /// assignment.
    pub fn assign_agent(&self, id: UserId, agent: Option<UserId>) -> Result<User, AccountError> {
        if let Some(agent_id) = agent {
            let candidate = self.profile(agent_id)?;
            if candidate.role != Role::Agent {
                return Err(AccountError::NotAnAgent);
            }
        }
        let mut user = self.profile(id)?;
        user.agent = agent;
        self.repository.update_user(user.clone())?;
        Ok(user)
    }

    /// Flips the moderation ban on `target`. Staff only.
    pub fn set_ban(&self, actor: UserId, target: UserId, banned: bool) -> Result<User, AccountError> {
        let staff = self.profile(actor)?;
        if !staff.staff {
            return Err(AccountError::NotStaff);
        }
        let mut user = self.profile(target)?;
        user.banned = banned;
        self.repository.update_user(user.clone())?;
        Ok(user)
    }

    pub fn add_contact(&self, owner: UserId, person: UserId) -> Result<Contact, AccountError> {
        if owner == person {
            return Err(AccountError::SelfContact);
        }
        self.profile(person)?;
        Ok(self.repository.insert_contact(NewContact { owner, person })?)
    }

    pub fn remove_contact(&self, owner: UserId, id: ContactId) -> Result<(), AccountError> {
        let contact = self
            .repository
            .fetch_contact(id)?
            .ok_or(StoreError::NotFound)?;
        if contact.owner != owner {
            return Err(AccountError::NotContactOwner);
        }
        Ok(self.repository.delete_contact(id)?)
    }

    pub fn contacts(&self, owner: UserId) -> Result<Vec<Contact>, AccountError> {
        Ok(self.repository.contacts_for(owner)?)
    }

    /// Daily sweep: clears the subscribed flag on accounts whose paid
    /// period ends today and tells each one. Returns how many lapsed.
    pub fn expire_subscriptions(&self, today: NaiveDate) -> Result<usize, AccountError> {
        let due = self.repository.subscriptions_ending(today)?;
        let mut expired = 0;
        for mut user in due {
            user.subscribed = false;
            self.repository.update_user(user.clone())?;
            self.notifier.notify(
                user.id,
                "Your subscription ended today. Free-plan limits apply again to \
                 your listings and saved filters.",
            )?;
            expired += 1;
        }
        Ok(expired)
    }

    /// Daily sweep: warns accounts whose subscription lapses in
    /// [`EXPIRY_WARNING_DAYS`]. Returns how many were warned.
    pub fn warn_expiring_subscriptions(&self, today: NaiveDate) -> Result<usize, AccountError> {
        let horizon = today + Days::new(EXPIRY_WARNING_DAYS);
        let ending = self.repository.subscriptions_ending(horizon)?;
        let mut warned = 0;
        for user in ending {
            self.notifier.notify(
                user.id,
                &format!(
                    "Your subscription ends on {horizon}. Renew it to keep \
                     unlimited listings and saved filters."
                ),
            )?;
            warned += 1;
        }
        Ok(warned)
    }
}
