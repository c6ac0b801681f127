use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::marketplace::accounts::domain::{NewUser, Role, UserId};
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::booking::service::BookingService;
use crate::marketplace::housing::domain::{
    Benefits, Flat, FlatState, Heating, House, HouseClass, HouseMarket, HouseStatus, NewBuilding,
    NewFlat, NewFloor, NewHouse, NewSection, PaymentOption, Technology, Territory,
};
use crate::marketplace::housing::repository::HousingRepository;
use crate::marketplace::store::MemoryStore;

pub(super) fn build_service() -> (
    BookingService<MemoryStore, MemoryStore, MemoryStore>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::new());
    let service = BookingService::new(store.clone(), store.clone(), store.clone());
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

pub(super) fn set_banned(store: &Arc<MemoryStore>, id: UserId) {
    let mut user = store.fetch_user(id).expect("fetch").expect("present");
    user.banned = true;
    store.update_user(user).expect("update");
}

/// Seeds one house with a single bookable flat, owned by `department`.
pub(super) fn seed_flat(store: &Arc<MemoryStore>, department: UserId) -> (House, Flat) {
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
    (house, flat)
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
