//! Paid visibility boosts for listings.
//!
//! A promotion references a catalog type whose `efficiency` is the
//! ranking-weight bonus the listing enjoys while the promotion is paid.
//! Every mutation keeps the bonus symmetric: whatever was added to the
//! post's weight is taken back when the paid flag drops or the
//! promotion is removed or expires.

pub mod domain;
pub mod pricing;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    NewPromotion, NewPromotionType, PromoColor, PromoPhrase, Promotion, PromotionId,
    PromotionOrder, PromotionType, PromotionTypeId,
};
pub use pricing::PromotionPricing;
pub use repository::PromotionRepository;
pub use router::promotion_router;
pub use service::{PromotionError, PromotionService};
