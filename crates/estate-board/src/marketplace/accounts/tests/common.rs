use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::marketplace::accounts::domain::{NewUser, Role, User, UserId};
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::accounts::service::AccountService;
use crate::marketplace::notifications::dispatch::{Notifier, NotifyError};
use crate::marketplace::store::MemoryStore;

/// Captures notifications instead of delivering them.
#[derive(Default)]
pub(super) struct RecordingNotifier {
    sent: Mutex<Vec<(UserId, String)>>,
}

impl RecordingNotifier {
    pub(super) fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, recipient: UserId, text: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push((recipient, text.to_owned()));
        Ok(())
    }
}

pub(super) fn build_service() -> (
    AccountService<MemoryStore, RecordingNotifier>,
    Arc<MemoryStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = AccountService::new(store.clone(), notifier.clone());
    (service, store, notifier)
}

pub(super) fn registration(email: &str, role: Role) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "Olha".to_string(),
        last_name: "Kovalenko".to_string(),
        phone: "+380671234567".to_string(),
        role,
    }
}

pub(super) fn make_staff(store: &Arc<MemoryStore>, id: UserId) {
    let mut user = store.fetch_user(id).expect("fetch").expect("present");
    user.staff = true;
    store.update_user(user).expect("update");
}

pub(super) fn set_subscription(
    store: &Arc<MemoryStore>,
    id: UserId,
    until: NaiveDate,
) -> User {
    let mut user = store.fetch_user(id).expect("fetch").expect("present");
    user.subscribed = true;
    user.subscription_until = Some(until);
    store.update_user(user.clone()).expect("update");
    user
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
