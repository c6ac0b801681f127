use std::sync::Arc;

use crate::marketplace::accounts::domain::{NewUser, Role, UserId};
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::housing::domain::{
    Benefits, FlatState, Heating, HouseClass, HouseMarket, HouseStatus, NewFlat, NewHouse,
    PaymentOption, Technology, Territory,
};
use crate::marketplace::housing::service::HousingService;
use crate::marketplace::store::MemoryStore;

pub(super) fn build_service() -> (HousingService<MemoryStore, MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = HousingService::new(store.clone(), store.clone());
    (service, store)
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

pub(super) fn make_staff(store: &Arc<MemoryStore>, id: UserId) {
    let mut user = store.fetch_user(id).expect("fetch").expect("present");
    user.staff = true;
    store.update_user(user).expect("update");
}

pub(super) fn new_house(department: UserId) -> NewHouse {
    NewHouse {
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
    }
}

pub(super) fn new_flat(floor: crate::marketplace::housing::domain::FloorId) -> NewFlat {
    NewFlat {
        number: 12,
        area_m2: 56.0,
        kitchen_area_m2: 11.5,
        price_per_metre: 1_000.0,
        price: 56_000.0,
        rooms: 2,
        state: FlatState::Rough,
        balcony: true,
        floor,
    }
}
