//! The housing hierarchy: house, building, section, floor, flat.
//!
//! Every level is owned transitively by the house's sales-department
//! account, which is the only principal allowed to reshape it. Flats
//! additionally carry the reservation triple (`booked`, `owned`,
//! `client`) that the booking workflow drives.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Benefits, Building, BuildingId, Flat, FlatId, FlatState, Floor, FloorId, Heating, House,
    HouseClass, HouseId, HouseMarket, HouseStatus, NewBuilding, NewFlat, NewFloor, NewHouse,
    NewSection, PaymentOption, Section, SectionId, Technology, Territory,
};
pub use repository::HousingRepository;
pub use router::housing_router;
pub use service::{HousingError, HousingService};
