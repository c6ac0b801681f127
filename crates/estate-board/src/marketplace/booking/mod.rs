//! The flat-booking workflow.
//!
//! A client claims a flat, which raises a review request for the
//! owning sales department; approval marks the flat as actually sold,
//! rejection frees it. The claim itself is a conditional write inside
//! the repository so two clients cannot reserve the same flat.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{BookingRequest, NewBookingRequest, RequestId};
pub use repository::BookingRepository;
pub use router::booking_router;
pub use service::{BookingError, BookingService};
