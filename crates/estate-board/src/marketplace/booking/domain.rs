use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::marketplace::housing::domain::{FlatId, HouseId};

/// Identifier wrapper for booking requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A claim on a flat awaiting (or past) sales-department review.
///
/// An unapproved request is the unresolved one; the repository keeps
/// at most one of those per flat. Disapproval deletes the record
/// outright, so `approved` never flips back to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: RequestId,
    pub house: HouseId,
    pub flat: FlatId,
    pub approved: bool,
    pub created: NaiveDateTime,
}

/// Payload for a request about to be stored; it starts unapproved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBookingRequest {
    pub house: HouseId,
    pub flat: FlatId,
}
