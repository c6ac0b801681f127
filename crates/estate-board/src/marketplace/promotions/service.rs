use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::listings::domain::{Post, PostId};
use crate::marketplace::listings::repository::ListingRepository;
use crate::marketplace::notifications::dispatch::{Notifier, NotifyError};
use crate::marketplace::store::StoreError;

use super::domain::{NewPromotion, Promotion, PromotionId, PromotionOrder, PromotionType};
use super::pricing::PromotionPricing;
use super::repository::PromotionRepository;

/// Failures surfaced by the promotion workflow.
#[derive(Debug, Error)]
pub enum PromotionError {
    #[error("only the listing owner may manage its promotion")]
    NotPostOwner,
    #[error("banned users cannot promote listings")]
    Banned,
    #[error("the listing already has a promotion")]
    AlreadyPromoted,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Sells visibility boosts and keeps listing weights in step with
/// them: a post's weight carries the type's efficiency exactly while
/// its promotion exists and is paid.
pub struct PromotionService<P, L, U, N> {
    promotions: Arc<P>,
    listings: Arc<L>,
    users: Arc<U>,
    notifier: Arc<N>,
    pricing: PromotionPricing,
}

impl<P, L, U, N> PromotionService<P, L, U, N>
where
    P: PromotionRepository + 'static,
    L: ListingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        promotions: Arc<P>,
        listings: Arc<L>,
        users: Arc<U>,
        notifier: Arc<N>,
        pricing: PromotionPricing,
    ) -> Self {
        Self {
            promotions,
            listings,
            users,
            notifier,
            pricing,
        }
    }

    /// The purchasable tiers.
    pub fn catalog(&self) -> Result<Vec<PromotionType>, PromotionError> {
        Ok(self.promotions.promotion_types()?)
    }

    pub fn promotion_of(&self, post: PostId) -> Result<Option<Promotion>, PromotionError> {
        Ok(self.promotions.promotion_for_post(post)?)
    }

    fn owned_post(&self, actor: UserId, id: PostId) -> Result<Post, PromotionError> {
        let post = self.listings.fetch_post(id)?.ok_or(StoreError::NotFound)?;
        if post.owner != actor {
            return Err(PromotionError::NotPostOwner);
        }
        Ok(post)
    }

    /// Buys a boost for `post`. Price is the type's base price plus
    /// add-on fees; a paid order raises the post's weight by the
    /// type's efficiency immediately.
    pub fn promote(
        &self,
        actor: UserId,
        post: PostId,
        order: PromotionOrder,
    ) -> Result<Promotion, PromotionError> {
        let user = self.users.fetch_user(actor)?.ok_or(StoreError::NotFound)?;
        if user.banned {
            return Err(PromotionError::Banned);
        }
        let mut post = self.owned_post(actor, post)?;
        let kind = self
            .promotions
            .fetch_promotion_type(order.kind)?
            .ok_or(StoreError::NotFound)?;

        let record = NewPromotion {
            post: post.id,
            kind: kind.id,
            phrase: order.phrase,
            color: order.color,
            price: self.pricing.quote(&kind, &order),
            paid: order.paid,
            end_date: order.end_date,
        };
        let stored = match self.promotions.insert_promotion(record) {
            Ok(stored) => stored,
            Err(StoreError::Conflict) => return Err(PromotionError::AlreadyPromoted),
            Err(other) => return Err(other.into()),
        };

        if stored.paid {
            post.weight += kind.efficiency;
            self.listings.update_post(post)?;
        }
        Ok(stored)
    }

    /// Flips the paid flag, moving the weight bonus with it: false→true
    /// adds the type's efficiency, true→false takes it back.
    pub fn set_paid(
        &self,
        actor: UserId,
        id: PromotionId,
        paid: bool,
    ) -> Result<Promotion, PromotionError> {
        let mut promotion = self
            .promotions
            .fetch_promotion(id)?
            .ok_or(StoreError::NotFound)?;
        let mut post = self.owned_post(actor, promotion.post)?;
        if promotion.paid == paid {
            return Ok(promotion);
        }

        let kind = self
            .promotions
            .fetch_promotion_type(promotion.kind)?
            .ok_or(StoreError::NotFound)?;
        if paid {
            post.weight += kind.efficiency;
        } else {
            post.weight -= kind.efficiency;
        }
        self.listings.update_post(post)?;

        promotion.paid = paid;
        self.promotions.update_promotion(promotion.clone())?;
        Ok(promotion)
    }

    /// Owner-initiated removal of a boost.
    pub fn delete_promotion(&self, actor: UserId, id: PromotionId) -> Result<(), PromotionError> {
        let promotion = self
            .promotions
            .fetch_promotion(id)?
            .ok_or(StoreError::NotFound)?;
        self.owned_post(actor, promotion.post)?;
        self.retire(&promotion)
    }

    /// Shared by deletion and the expiry sweep: backs the weight bonus
    /// out when the promotion is paid, then drops the record.
    fn retire(&self, promotion: &Promotion) -> Result<(), PromotionError> {
        if promotion.paid {
            if let Some(mut post) = self.listings.fetch_post(promotion.post)? {
                let kind = self
                    .promotions
                    .fetch_promotion_type(promotion.kind)?
                    .ok_or(StoreError::NotFound)?;
                post.weight -= kind.efficiency;
                self.listings.update_post(post)?;
            }
        }
        Ok(self.promotions.delete_promotion(promotion.id)?)
    }

    /// Daily sweep: promotions ending today are retired and each post
    /// owner is told. Returns the number of promotions expired.
    pub fn expire_due(&self, today: NaiveDate) -> Result<usize, PromotionError> {
        let due = self.promotions.promotions_expiring_on(today)?;
        let mut expired = 0;
        for promotion in due {
            let owner = self
                .listings
                .fetch_post(promotion.post)?
                .map(|post| post.owner);
            self.retire(&promotion)?;
            if let Some(owner) = owner {
                let text = format!("Promotion of your listing #{} ended today.", promotion.post);
                self.notifier.notify(owner, &text)?;
            }
            expired += 1;
        }
        Ok(expired)
    }
}
