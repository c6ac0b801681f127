use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::store::StoreError;

use super::domain::{
    Building, BuildingId, Flat, FlatId, Floor, FloorId, House, HouseId, NewBuilding, NewFlat,
    NewFloor, NewHouse, NewSection, Section, SectionId,
};

/// Storage surface for the housing hierarchy.
///
/// `claim_flat` and `release_flat` are the only write paths for a
/// flat's reservation triple; both are single conditional updates so
/// concurrent booking attempts cannot lose each other's writes.
pub trait HousingRepository: Send + Sync {
    fn insert_house(&self, house: NewHouse) -> Result<House, StoreError>;

    fn fetch_house(&self, id: HouseId) -> Result<Option<House>, StoreError>;

    /// Replaces the stored house matching `house.id`.
    fn update_house(&self, house: House) -> Result<(), StoreError>;

    fn houses(&self) -> Result<Vec<House>, StoreError>;

    fn insert_building(&self, building: NewBuilding) -> Result<Building, StoreError>;

    fn fetch_building(&self, id: BuildingId) -> Result<Option<Building>, StoreError>;

    fn insert_section(&self, section: NewSection) -> Result<Section, StoreError>;

    fn fetch_section(&self, id: SectionId) -> Result<Option<Section>, StoreError>;

    fn insert_floor(&self, floor: NewFloor) -> Result<Floor, StoreError>;

    fn fetch_floor(&self, id: FloorId) -> Result<Option<Floor>, StoreError>;

    fn insert_flat(&self, flat: NewFlat) -> Result<Flat, StoreError>;

    fn fetch_flat(&self, id: FlatId) -> Result<Option<Flat>, StoreError>;

    /// Replaces the stored flat matching `flat.id`.
    fn update_flat(&self, flat: Flat) -> Result<(), StoreError>;

    /// Walks floor → section → building to the owning house.
    fn house_of_flat(&self, id: FlatId) -> Result<Option<House>, StoreError>;

    /// Reserves the flat for `client` only if no client is currently
    /// set; a set client yields `Conflict` and leaves the flat
    /// untouched.
    fn claim_flat(&self, id: FlatId, client: UserId) -> Result<Flat, StoreError>;

    /// Clears the reservation triple (`client`, `booked`, `owned`).
    fn release_flat(&self, id: FlatId) -> Result<Flat, StoreError>;
}
