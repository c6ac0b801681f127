use std::sync::Arc;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::booking::domain::{BookingRequest, NewBookingRequest, RequestId};
use crate::marketplace::booking::repository::BookingRepository;
use crate::marketplace::housing::domain::{Flat, FlatId, HouseId};
use crate::marketplace::housing::repository::HousingRepository;
use crate::marketplace::store::StoreError;

/// Error raised by the booking service.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("cannot book a flat that already has a client")]
    FlatTaken,
    #[error("cannot remove current client")]
    NotCurrentClient,
    #[error("only the owning sales department may review booking requests")]
    NotHouseOwner,
    #[error("banned accounts cannot book flats")]
    Banned,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives a flat's reservation triple (`booked`, `owned`, `client`)
/// through claim, release, and sales-department review.
pub struct BookingService<B, H, U> {
    requests: Arc<B>,
    housing: Arc<H>,
    users: Arc<U>,
}

impl<B, H, U> BookingService<B, H, U>
where
    B: BookingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
{
    pub fn new(requests: Arc<B>, housing: Arc<H>, users: Arc<U>) -> Self {
        Self {
            requests,
            housing,
            users,
        }
    }

    /// Books (`intent = true`) or releases (`intent = false`) a flat
    /// on behalf of `actor`, returning the updated flat.
    pub fn set_booking(
        &self,
        flat: FlatId,
        actor: UserId,
        intent: bool,
    ) -> Result<Flat, BookingError> {
        if intent {
            self.book(flat, actor)
        } else {
            self.release(flat, actor)
        }
    }

    fn book(&self, flat: FlatId, actor: UserId) -> Result<Flat, BookingError> {
        let user = self.users.fetch_user(actor)?.ok_or(StoreError::NotFound)?;
        if user.banned {
            return Err(BookingError::Banned);
        }
        let house = self
            .housing
            .house_of_flat(flat)?
            .ok_or(StoreError::NotFound)?;

        // The claim is the repository's conditional write; an occupied
        // flat surfaces as a conflict, even for the house owner.
        let claimed = match self.housing.claim_flat(flat, actor) {
            Ok(claimed) => claimed,
            Err(StoreError::Conflict) => return Err(BookingError::FlatTaken),
            Err(err) => return Err(err.into()),
        };

        match self.requests.insert_request(NewBookingRequest {
            house: house.id,
            flat,
        }) {
            Ok(_) => Ok(claimed),
            Err(err) => {
                // A stale unreviewed request blocks the booking; undo
                // the claim before surfacing it.
                self.housing.release_flat(flat)?;
                Err(match err {
                    StoreError::Conflict => BookingError::FlatTaken,
                    other => other.into(),
                })
            }
        }
    }

    fn release(&self, flat: FlatId, actor: UserId) -> Result<Flat, BookingError> {
        let current = self.housing.fetch_flat(flat)?.ok_or(StoreError::NotFound)?;
        let house = self
            .housing
            .house_of_flat(flat)?
            .ok_or(StoreError::NotFound)?;

        let permitted = current.client == Some(actor) || house.sales_department == actor;
        if !permitted {
            return Err(BookingError::NotCurrentClient);
        }

        let released = self.housing.release_flat(flat)?;
        self.requests.delete_requests_for_flat(flat)?;
        Ok(released)
    }

    /// Sales-department verdict on a request. Approval marks the flat
    /// as owned; disapproval frees the flat and drops the request.
    pub fn review_request(
        &self,
        request: RequestId,
        reviewer: UserId,
        approve: bool,
    ) -> Result<Flat, BookingError> {
        let mut record = self
            .requests
            .fetch_request(request)?
            .ok_or(StoreError::NotFound)?;
        let house = self
            .housing
            .fetch_house(record.house)?
            .ok_or(StoreError::NotFound)?;
        if house.sales_department != reviewer {
            return Err(BookingError::NotHouseOwner);
        }

        if approve {
            let mut flat = self
                .housing
                .fetch_flat(record.flat)?
                .ok_or(StoreError::NotFound)?;
            flat.owned = true;
            flat.booked = true;
            self.housing.update_flat(flat.clone())?;

            record.approved = true;
            self.requests.update_request(record)?;
            Ok(flat)
        } else {
            let released = self.housing.release_flat(record.flat)?;
            self.requests.delete_request(record.id)?;
            Ok(released)
        }
    }

    /// The house's review inbox, restricted to its sales department.
    pub fn pending_requests(
        &self,
        house: HouseId,
        viewer: UserId,
    ) -> Result<Vec<BookingRequest>, BookingError> {
        let record = self
            .housing
            .fetch_house(house)?
            .ok_or(StoreError::NotFound)?;
        if record.sales_department != viewer {
            return Err(BookingError::NotHouseOwner);
        }
        Ok(self.requests.pending_requests_for_house(house)?)
    }
}
