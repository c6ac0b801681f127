//! Marketplace domain areas.
//!
//! Each area follows the same layout: `domain.rs` for records and
//! vocabulary enums, `repository.rs` for the storage traits the service
//! consumes, `service.rs` for the business rules, and a `tests` directory
//! with in-memory fakes. Routers live next to the services that back them.

pub mod accounts;
pub mod booking;
pub mod housing;
pub mod listings;
pub mod notifications;
pub mod promotions;
pub mod quota;
pub mod store;
