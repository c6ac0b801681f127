use chrono::NaiveDate;

use crate::marketplace::listings::domain::PostId;
use crate::marketplace::store::StoreError;

use super::domain::{
    NewPromotion, NewPromotionType, Promotion, PromotionId, PromotionType, PromotionTypeId,
};

/// Persistence boundary for the promotion catalog and active boosts.
pub trait PromotionRepository: Send + Sync {
    /// Adds a tier to the catalog, assigning its id and clamping
    /// efficiency into 1..=100.
    fn insert_promotion_type(&self, kind: NewPromotionType) -> Result<PromotionType, StoreError>;

    fn fetch_promotion_type(
        &self,
        id: PromotionTypeId,
    ) -> Result<Option<PromotionType>, StoreError>;

    fn promotion_types(&self) -> Result<Vec<PromotionType>, StoreError>;

    /// Stores a new promotion. A post carries at most one; a second
    /// insert for the same post yields `Conflict`.
    fn insert_promotion(&self, promotion: NewPromotion) -> Result<Promotion, StoreError>;

    fn fetch_promotion(&self, id: PromotionId) -> Result<Option<Promotion>, StoreError>;

    fn promotion_for_post(&self, post: PostId) -> Result<Option<Promotion>, StoreError>;

    fn update_promotion(&self, promotion: Promotion) -> Result<(), StoreError>;

    fn delete_promotion(&self, id: PromotionId) -> Result<(), StoreError>;

    /// Promotions whose `end_date` falls on `date`, for the expiry
    /// sweep.
    fn promotions_expiring_on(&self, date: NaiveDate) -> Result<Vec<Promotion>, StoreError>;
}
