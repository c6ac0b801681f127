use crate::marketplace::housing::domain::{FlatId, HouseId};
use crate::marketplace::store::StoreError;

use super::domain::{BookingRequest, NewBookingRequest, RequestId};

/// Storage surface for booking requests.
pub trait BookingRepository: Send + Sync {
    /// Persists an unapproved request. A flat with an unapproved
    /// request already on file yields `Conflict`.
    fn insert_request(&self, request: NewBookingRequest) -> Result<BookingRequest, StoreError>;

    fn fetch_request(&self, id: RequestId) -> Result<Option<BookingRequest>, StoreError>;

    /// Replaces the stored request matching `request.id`.
    fn update_request(&self, request: BookingRequest) -> Result<(), StoreError>;

    fn delete_request(&self, id: RequestId) -> Result<(), StoreError>;

    /// Removes every request attached to the flat, whatever its
    /// status. Used when a reservation is released.
    fn delete_requests_for_flat(&self, flat: FlatId) -> Result<(), StoreError>;

    /// The flat's unapproved request, if one exists.
    fn pending_request_for_flat(&self, flat: FlatId) -> Result<Option<BookingRequest>, StoreError>;

    /// Unapproved requests across a house, oldest first — the sales
    /// department's review inbox.
    fn pending_requests_for_house(&self, house: HouseId)
        -> Result<Vec<BookingRequest>, StoreError>;
}
