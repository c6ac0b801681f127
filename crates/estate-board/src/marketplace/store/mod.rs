//! Shared failure vocabulary for the repository traits, plus the
//! reference in-memory backend.
//!
//! Every area's repository speaks the same three-way outcome so services
//! can translate storage failures uniformly: uniqueness violations become
//! state conflicts, missing rows become not-found, and anything else is an
//! availability problem surfaced verbatim.

pub mod memory;

pub use memory::MemoryStore;

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
