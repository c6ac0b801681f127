use std::sync::Arc;

use crate::marketplace::accounts::domain::{Role, UserId};
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::store::StoreError;

use super::domain::{
    Building, Flat, FlatId, Floor, House, HouseId, NewBuilding, NewFlat, NewFloor, NewHouse,
    NewSection, Section,
};
use super::repository::HousingRepository;

/// Error raised by the housing service.
#[derive(Debug, thiserror::Error)]
pub enum HousingError {
    #[error("houses are administered by sales-department accounts")]
    NotSalesDepartment,
    #[error("only the owning sales department may change a house")]
    NotHouseOwner,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// CRUD over the housing hierarchy with ownership checks at every
/// mutation.
pub struct HousingService<R, U> {
    repository: Arc<R>,
    users: Arc<U>,
}

impl<R, U> HousingService<R, U>
where
    R: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    pub fn new(repository: Arc<R>, users: Arc<U>) -> Self {
        Self { repository, users }
    }

    /// Checks that `actor` may reshape `house`: its sales department,
    /// or staff.
    fn authorize(&self, actor: UserId, house: &House) -> Result<(), HousingError> {
        if actor == house.sales_department {
            return Ok(());
        }
        let user = self.users.fetch_user(actor)?.ok_or(StoreError::NotFound)?;
        if user.staff {
            Ok(())
        } else {
            Err(HousingError::NotHouseOwner)
        }
    }

    pub fn create_house(&self, actor: UserId, mut house: NewHouse) -> Result<House, HousingError> {
        let user = self.users.fetch_user(actor)?.ok_or(StoreError::NotFound)?;
        if user.role != Role::SalesDepartment {
            return Err(HousingError::NotSalesDepartment);
        }
        house.sales_department = actor;
        Ok(self.repository.insert_house(house)?)
    }

    pub fn update_house(&self, actor: UserId, house: House) -> Result<House, HousingError> {
        let stored = self
            .repository
            .fetch_house(house.id)?
            .ok_or(StoreError::NotFound)?;
        self.authorize(actor, &stored)?;
        let mut house = house;
        // Ownership never moves through an update.
        house.sales_department = stored.sales_department;
        self.repository.update_house(house.clone())?;
        Ok(house)
    }

    pub fn house(&self, id: HouseId) -> Result<House, HousingError> {
        Ok(self.repository.fetch_house(id)?.ok_or(StoreError::NotFound)?)
    }

    pub fn houses(&self) -> Result<Vec<House>, HousingError> {
        Ok(self.repository.houses()?)
    }

    pub fn add_building(&self, actor: UserId, building: NewBuilding) -> Result<Building, HousingError> {
        let house = self.house(building.house)?;
        self.authorize(actor, &house)?;
        Ok(self.repository.insert_building(building)?)
    }

    pub fn add_section(&self, actor: UserId, section: NewSection) -> Result<Section, HousingError> {
        let building = self
            .repository
            .fetch_building(section.building)?
            .ok_or(StoreError::NotFound)?;
        let house = self.house(building.house)?;
        self.authorize(actor, &house)?;
        Ok(self.repository.insert_section(section)?)
    }

    pub fn add_floor(&self, actor: UserId, floor: NewFloor) -> Result<Floor, HousingError> {
        let section = self
            .repository
            .fetch_section(floor.section)?
            .ok_or(StoreError::NotFound)?;
        let building = self
            .repository
            .fetch_building(section.building)?
            .ok_or(StoreError::NotFound)?;
        let house = self.house(building.house)?;
        self.authorize(actor, &house)?;
        Ok(self.repository.insert_floor(floor)?)
    }

    pub fn add_flat(&self, actor: UserId, flat: NewFlat) -> Result<Flat, HousingError> {
        let floor = self
            .repository
            .fetch_floor(flat.floor)?
            .ok_or(StoreError::NotFound)?;
        let section = self
            .repository
            .fetch_section(floor.section)?
            .ok_or(StoreError::NotFound)?;
        let building = self
            .repository
            .fetch_building(section.building)?
            .ok_or(StoreError::NotFound)?;
        let house = self.house(building.house)?;
        self.authorize(actor, &house)?;
        Ok(self.repository.insert_flat(flat)?)
    }

    /// Updates a flat's saleable attributes. The reservation triple is
    /// carried over from the stored record; only the booking workflow
    /// moves it.
    pub fn update_flat(&self, actor: UserId, flat: Flat) -> Result<Flat, HousingError> {
        let stored = self
            .repository
            .fetch_flat(flat.id)?
            .ok_or(StoreError::NotFound)?;
        let house = self
            .repository
            .house_of_flat(flat.id)?
            .ok_or(StoreError::NotFound)?;
        self.authorize(actor, &house)?;

        let mut flat = flat;
        flat.floor = stored.floor;
        flat.booked = stored.booked;
        flat.owned = stored.owned;
        flat.client = stored.client;
        self.repository.update_flat(flat.clone())?;
        Ok(flat)
    }

    pub fn flat(&self, id: FlatId) -> Result<Flat, HousingError> {
        Ok(self.repository.fetch_flat(id)?.ok_or(StoreError::NotFound)?)
    }

    pub fn house_of_flat(&self, id: FlatId) -> Result<House, HousingError> {
        Ok(self
            .repository
            .house_of_flat(id)?
            .ok_or(StoreError::NotFound)?)
    }
}
