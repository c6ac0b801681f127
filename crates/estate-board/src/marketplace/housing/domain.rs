use serde::{Deserialize, Serialize};

use crate::marketplace::accounts::domain::UserId;

/// Identifier wrapper for houses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HouseId(pub u64);

impl std::fmt::Display for HouseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SectionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FloorId(pub u64);

/// Identifier wrapper for flats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlatId(pub u64);

impl std::fmt::Display for FlatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Market segment a house is sold on; saved search filters match
/// against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseMarket {
    NewBuilding,
    Secondary,
    Cottages,
}

/// What the house's units are used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseStatus {
    Flats,
    Offices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HouseClass {
    Common,
    Elite,
}

/// Construction technology advertised for the house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Technology {
    MonolithicFrame,
    MonolithicBrick,
    Panel,
    Brick,
    FoamBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Territory {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heating {
    None,
    Central,
    Individual,
}

/// How a purchase can be settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentOption {
    Mortgage,
    ParentalCapital,
    DirectPayment,
}

/// Renovation state of a flat, also usable as a saved-filter criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlatState {
    Rough,
    AfterRepair,
    EuroRepair,
    NeedsRepair,
}

/// Amenity flags advertised on a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Benefits {
    pub playground: bool,
    pub car_park: bool,
    pub shop: bool,
    pub kids_playground: bool,
    pub high_speed_elevator: bool,
    pub security: bool,
}

/// A development owned and administered by one sales-department
/// account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
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
    pub benefits: Benefits,
    pub sales_department: UserId,
}

/// Creation payload for a house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHouse {
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
    pub benefits: Benefits,
    pub sales_department: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub number: u32,
    pub house: HouseId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBuilding {
    pub number: u32,
    pub house: HouseId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub number: u32,
    pub building: BuildingId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSection {
    pub number: u32,
    pub building: BuildingId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub number: u32,
    pub section: SectionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFloor {
    pub number: u32,
    pub section: SectionId,
}

/// A saleable unit.
///
/// The reservation triple keeps two invariants: `owned` implies
/// `booked`, and a set `client` implies `booked`. Only the booking
/// workflow moves these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flat {
    pub id: FlatId,
    pub number: u32,
    pub area_m2: f64,
    pub kitchen_area_m2: f64,
    pub price_per_metre: f64,
    pub price: f64,
    pub rooms: u8,
    pub state: FlatState,
    pub balcony: bool,
    pub floor: FloorId,
    pub booked: bool,
    pub owned: bool,
    pub client: Option<UserId>,
}

/// Creation payload for a flat; reservation fields start cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFlat {
    pub number: u32,
    pub area_m2: f64,
    pub kitchen_area_m2: f64,
    pub price_per_metre: f64,
    pub price: f64,
    pub rooms: u8,
    pub state: FlatState,
    pub balcony: bool,
    pub floor: FloorId,
}
