use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::store::StoreError;

use super::domain::{
    Benefits, Flat, FlatId, FlatState, FloorId, Heating, House, HouseClass, HouseId, HouseMarket,
    HouseStatus, NewBuilding, NewFlat, NewFloor, NewHouse, NewSection, PaymentOption, Technology,
    Territory,
};
use super::repository::HousingRepository;
use super::service::{HousingError, HousingService};

#[derive(Debug, Deserialize)]
pub struct HousePayload {
    pub actor: u64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub market: HouseMarket,
    pub status: HouseStatus,
    pub class: HouseClass,
    pub technology: Technology,
    pub territory: Territory,
    pub distance_to_sea_m: u32,
    pub ceiling_height_m: f64,
    pub heating: Heating,
    pub payment: PaymentOption,
    pub description: String,
    #[serde(default)]
    pub benefits: Benefits,
}

#[derive(Debug, Deserialize)]
pub struct UnitPayload {
    pub actor: u64,
    pub number: u32,
    pub parent: u64,
}

#[derive(Debug, Deserialize)]
pub struct FlatPayload {
    pub actor: u64,
    pub number: u32,
    pub area_m2: f64,
    pub kitchen_area_m2: f64,
    pub price_per_metre: f64,
    pub price: f64,
    pub rooms: u8,
    pub state: FlatState,
    pub balcony: bool,
    pub floor: u64,
}

#[derive(Debug, Deserialize)]
pub struct FlatUpdatePayload {
    pub actor: u64,
    pub number: u32,
    pub area_m2: f64,
    pub kitchen_area_m2: f64,
    pub price_per_metre: f64,
    pub price: f64,
    pub rooms: u8,
    pub state: FlatState,
    pub balcony: bool,
}

/// Router builder exposing the housing hierarchy administration
/// endpoints.
pub fn housing_router<R, U>(service: Arc<HousingService<R, U>>) -> Router
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/houses",
            get(houses_handler::<R, U>).post(create_house_handler::<R, U>),
        )
        .route(
            "/api/v1/houses/:house_id",
            get(house_handler::<R, U>).put(update_house_handler::<R, U>),
        )
        .route("/api/v1/buildings", post(building_handler::<R, U>))
        .route("/api/v1/sections", post(section_handler::<R, U>))
        .route("/api/v1/floors", post(floor_handler::<R, U>))
        .route("/api/v1/flats", post(create_flat_handler::<R, U>))
        .route(
            "/api/v1/flats/:flat_id",
            get(flat_handler::<R, U>).put(update_flat_handler::<R, U>),
        )
        .with_state(service)
}

fn error_response(error: HousingError) -> Response {
    let status = match &error {
        HousingError::NotSalesDepartment | HousingError::NotHouseOwner => StatusCode::FORBIDDEN,
        HousingError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        HousingError::Store(StoreError::Conflict) => StatusCode::CONFLICT,
        HousingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn houses_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.houses() {
        Ok(houses) => (StatusCode::OK, axum::Json(houses)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_house_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    axum::Json(payload): axum::Json<HousePayload>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    let actor = UserId(payload.actor);
    let house = NewHouse {
        name: payload.name,
        address: payload.address,
        city: payload.city,
        market: payload.market,
        status: payload.status,
        class: payload.class,
        technology: payload.technology,
        territory: payload.territory,
        distance_to_sea_m: payload.distance_to_sea_m,
        ceiling_height_m: payload.ceiling_height_m,
        heating: payload.heating,
        payment: payload.payment,
        description: payload.description,
        benefits: payload.benefits,
        // Overwritten by the service with the acting department.
        sales_department: actor,
    };
    match service.create_house(actor, house) {
        Ok(house) => (StatusCode::CREATED, axum::Json(house)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn house_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    Path(house_id): Path<u64>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.house(HouseId(house_id)) {
        Ok(house) => (StatusCode::OK, axum::Json(house)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_house_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    Path(house_id): Path<u64>,
    axum::Json(payload): axum::Json<HousePayload>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    let actor = UserId(payload.actor);
    let house = House {
        id: HouseId(house_id),
        name: payload.name,
        address: payload.address,
        city: payload.city,
        market: payload.market,
        status: payload.status,
        class: payload.class,
        technology: payload.technology,
        territory: payload.territory,
        distance_to_sea_m: payload.distance_to_sea_m,
        ceiling_height_m: payload.ceiling_height_m,
        heating: payload.heating,
        payment: payload.payment,
        description: payload.description,
        benefits: payload.benefits,
        // Overwritten by the service with the stored owner.
        sales_department: actor,
    };
    match service.update_house(actor, house) {
        Ok(house) => (StatusCode::OK, axum::Json(house)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn building_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    axum::Json(payload): axum::Json<UnitPayload>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    let building = NewBuilding {
        number: payload.number,
        house: HouseId(payload.parent),
    };
    match service.add_building(UserId(payload.actor), building) {
        Ok(building) => (StatusCode::CREATED, axum::Json(building)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn section_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    axum::Json(payload): axum::Json<UnitPayload>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    let section = NewSection {
        number: payload.number,
        building: super::domain::BuildingId(payload.parent),
    };
    match service.add_section(UserId(payload.actor), section) {
        Ok(section) => (StatusCode::CREATED, axum::Json(section)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn floor_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    axum::Json(payload): axum::Json<UnitPayload>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    let floor = NewFloor {
        number: payload.number,
        section: super::domain::SectionId(payload.parent),
    };
    match service.add_floor(UserId(payload.actor), floor) {
        Ok(floor) => (StatusCode::CREATED, axum::Json(floor)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_flat_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    axum::Json(payload): axum::Json<FlatPayload>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    let flat = NewFlat {
        number: payload.number,
        area_m2: payload.area_m2,
        kitchen_area_m2: payload.kitchen_area_m2,
        price_per_metre: payload.price_per_metre,
        price: payload.price,
        rooms: payload.rooms,
        state: payload.state,
        balcony: payload.balcony,
        floor: FloorId(payload.floor),
    };
    match service.add_flat(UserId(payload.actor), flat) {
        Ok(flat) => (StatusCode::CREATED, axum::Json(flat)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn flat_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    Path(flat_id): Path<u64>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    match service.flat(FlatId(flat_id)) {
        Ok(flat) => (StatusCode::OK, axum::Json(flat)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_flat_handler<R, U>(
    State(service): State<Arc<HousingService<R, U>>>,
    Path(flat_id): Path<u64>,
    axum::Json(payload): axum::Json<FlatUpdatePayload>,
) -> Response
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    let flat = Flat {
        id: FlatId(flat_id),
        number: payload.number,
        area_m2: payload.area_m2,
        kitchen_area_m2: payload.kitchen_area_m2,
        price_per_metre: payload.price_per_metre,
        price: payload.price,
        rooms: payload.rooms,
        state: payload.state,
        balcony: payload.balcony,
        // Placement and reservation are carried over from the stored
        // record by the service.
        floor: FloorId(0),
        booked: false,
        owned: false,
        client: None,
    };
    match service.update_flat(UserId(payload.actor), flat) {
        Ok(flat) => (StatusCode::OK, axum::Json(flat)).into_response(),
        Err(error) => error_response(error),
    }
}
