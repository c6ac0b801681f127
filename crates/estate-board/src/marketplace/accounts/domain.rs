use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for contact-book entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContactId(pub u64);

/// What an account is allowed to do on the marketplace.
///
/// `SalesDepartment` accounts administer houses they own; `System` is
/// the single provisioned sender for operational mail and never signs
/// in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Client,
    Agent,
    Notary,
    SalesDepartment,
    System,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Agent => "agent",
            Role::Notary => "notary",
            Role::SalesDepartment => "sales department",
            Role::System => "system",
        }
    }
}

/// Where operational notices should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyPreference {
    Me,
    MeAndAgent,
    Agent,
    Off,
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
    pub staff: bool,
    pub banned: bool,
    pub subscribed: bool,
    pub subscription_until: Option<NaiveDate>,
    pub notify: NotifyPreference,
    pub agent: Option<UserId>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration payload; moderation flags and subscription state start
/// cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
}

/// An entry in an account's personal contact book, pointing at another
/// registered account such as an agent or notary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub owner: UserId,
    pub person: UserId,
}

/// Payload for a contact-book entry about to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewContact {
    pub owner: UserId,
    pub person: UserId,
}
