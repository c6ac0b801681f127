use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::marketplace::accounts::domain::{NewUser, Role, UserId};
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::housing::domain::{
    Benefits, FlatState, Heating, HouseClass, HouseMarket, HouseStatus, NewBuilding, NewFlat,
    NewFloor, NewHouse, NewSection, PaymentOption, Technology, Territory,
};
use crate::marketplace::housing::repository::HousingRepository;
use crate::marketplace::listings::domain::{AgentCommission, ContactChannel, NewPost, Post};
use crate::marketplace::listings::repository::ListingRepository;
use crate::marketplace::notifications::dispatch::{Notifier, NotifyError};
use crate::marketplace::promotions::domain::{
    NewPromotionType, PromotionOrder, PromotionType, PromotionTypeId,
};
use crate::marketplace::promotions::pricing::PromotionPricing;
use crate::marketplace::promotions::repository::PromotionRepository;
use crate::marketplace::promotions::service::PromotionService;
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
    PromotionService<MemoryStore, MemoryStore, MemoryStore, RecordingNotifier>,
    Arc<MemoryStore>,
    Arc<RecordingNotifier>,
) {
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = PromotionService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        notifier.clone(),
        PromotionPricing::default(),
    );
    (service, store, notifier)
}

pub(super) fn register(store: &Arc<MemoryStore>, email: &str, role: Role) -> UserId {
    store
        .insert_user(NewUser {
            email: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "Account".to_string(),
            phone: "+380501234567".to_string(),
            role,
        })
        .expect("user stored")
        .id
}

pub(super) fn set_banned(store: &Arc<MemoryStore>, id: UserId) {
    let mut user = store.fetch_user(id).expect("fetch").expect("present");
    user.banned = true;
    store.update_user(user).expect("update");
}

/// Seeds the housing hierarchy and a listing for `seller` over it.
pub(super) fn seed_post(store: &Arc<MemoryStore>, department: UserId, seller: UserId) -> Post {
    let house = store
        .insert_house(NewHouse {
            name: "Riviera".to_string(),
            address: "Fontanska Road 33".to_string(),
            city: "Odesa".to_string(),
            market: HouseMarket::NewBuilding,
            status: HouseStatus::Flats,
            class: HouseClass::Common,
            technology: Technology::MonolithicFrame,
            territory: Territory::Closed,
            distance_to_sea_m: 450,
            ceiling_height_m: 2.8,
            heating: Heating::Central,
            payment: PaymentOption::Mortgage,
            description: "Seafront development".to_string(),
            benefits: Benefits::default(),
            sales_department: department,
        })
        .expect("house stored");
    let building = store
        .insert_building(NewBuilding { number: 1, house: house.id })
        .expect("building stored");
    let section = store
        .insert_section(NewSection { number: 1, building: building.id })
        .expect("section stored");
    let floor = store
        .insert_floor(NewFloor { number: 3, section: section.id })
        .expect("floor stored");
    let flat = store
        .insert_flat(NewFlat {
            number: 12,
            area_m2: 56.0,
            kitchen_area_m2: 11.5,
            price_per_metre: 1_000.0,
            price: 56_000.0,
            rooms: 2,
            state: FlatState::Rough,
            balcony: true,
            floor: floor.id,
        })
        .expect("flat stored");
    store
        .insert_post(NewPost {
            flat: flat.id,
            house: house.id,
            owner: seller,
            price: 56_000.0,
            description: "Two rooms with a sea view".to_string(),
            commission: AgentCommission::Average,
            contact_by: ContactChannel::Both,
            created: date(2026, 3, 1).and_hms_opt(9, 0, 0).expect("valid time"),
        })
        .expect("post stored")
}

pub(super) fn seed_type(store: &Arc<MemoryStore>, efficiency: i32) -> PromotionType {
    store
        .insert_promotion_type(NewPromotionType {
            label: "Turbo".to_string(),
            price: 500.0,
            efficiency,
        })
        .expect("type stored")
}

/// A bare paid-or-not order with no add-ons, ending mid-April.
pub(super) fn order(kind: PromotionTypeId, paid: bool) -> PromotionOrder {
    PromotionOrder {
        kind,
        phrase: None,
        color: None,
        paid,
        end_date: date(2026, 4, 15),
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
