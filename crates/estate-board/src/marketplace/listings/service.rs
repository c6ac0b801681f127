use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::housing::repository::HousingRepository;
use crate::marketplace::notifications::dispatch::{Notifier, NotifyError};
use crate::marketplace::quota::{QuotaExceeded, QuotaKind, QuotaPolicy};
use crate::marketplace::store::StoreError;

use super::domain::{
    Complaint, ListingIssue, NewComplaint, NewPost, Post, PostId, PostSubmission, PostUpdate,
};
use super::filters::{FilterId, NewSavedFilter, SavedFilter};
use super::reactions::{self, Reaction, ReactionKind};
use super::repository::ListingRepository;

/// Days that must elapse before an owner may refresh a listing's
/// `created` timestamp.
pub const RELEVANCE_WINDOW_DAYS: i64 = 31;

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("banned accounts cannot publish on the marketplace")]
    Banned,
    #[error("only the owner may change a listing")]
    NotPostOwner,
    #[error("only staff may moderate listings")]
    NotStaff,
    #[error("a listing cannot be reported by its own seller")]
    OwnComplaint,
    #[error("this account already reported the listing")]
    DuplicateComplaint,
    #[error("relevance can be confirmed only {RELEVANCE_WINDOW_DAYS} days after publication")]
    RelevanceTooSoon,
    #[error(transparent)]
    Quota(#[from] QuotaExceeded),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

/// Service composing the post lifecycle, reactions, moderation,
/// complaints, saved filters, and the daily filter-match sweep.
pub struct ListingService<L, H, U, N> {
    repository: Arc<L>,
    housing: Arc<H>,
    users: Arc<U>,
    notifier: Arc<N>,
    quota: QuotaPolicy,
}

impl<L, H, U, N> ListingService<L, H, U, N>
where
    L: ListingRepository + 'static,
    H: HousingRepository + 'static,
    U: AccountRepository + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        repository: Arc<L>,
        housing: Arc<H>,
        users: Arc<U>,
        notifier: Arc<N>,
        quota: QuotaPolicy,
    ) -> Self {
        Self {
            repository,
            housing,
            users,
            notifier,
            quota,
        }
    }

    /// Publishes a listing for `actor`'s flat. Gated by the ban flag
    /// and, for unsubscribed sellers, the post quota.
    pub fn create_post(
        &self,
        actor: UserId,
        submission: PostSubmission,
        now: NaiveDateTime,
    ) -> Result<Post, ListingError> {
        let user = self.users.fetch_user(actor)?.ok_or(StoreError::NotFound)?;
        if user.banned {
            return Err(ListingError::Banned);
        }

        let house = self
            .housing
            .house_of_flat(submission.flat)?
            .ok_or(StoreError::NotFound)?;

        let current = self.repository.count_posts_for_owner(actor)?;
        self.quota
            .check(QuotaKind::Posts, user.subscribed, current)?;

        Ok(self.repository.insert_post(NewPost {
            flat: submission.flat,
            house: house.id,
            owner: actor,
            price: submission.price,
            description: submission.description,
            commission: submission.commission,
            contact_by: submission.contact_by,
            created: now,
        })?)
    }

    pub fn post(&self, id: PostId) -> Result<Post, ListingError> {
        Ok(self.repository.fetch_post(id)?.ok_or(StoreError::NotFound)?)
    }

    fn owned_post(&self, actor: UserId, id: PostId) -> Result<Post, ListingError> {
        let post = self.post(id)?;
        if post.owner != actor {
            return Err(ListingError::NotPostOwner);
        }
        Ok(post)
    }

    /// Owner edit of the saleable attributes; counters, moderation
    /// state, and the timestamps stay untouched.
    pub fn update_post(
        &self,
        actor: UserId,
        id: PostId,
        update: PostUpdate,
    ) -> Result<Post, ListingError> {
        let mut post = self.owned_post(actor, id)?;
        post.price = update.price;
        post.description = update.description;
        post.commission = update.commission;
        post.contact_by = update.contact_by;
        self.repository.update_post(post.clone())?;
        Ok(post)
    }

    pub fn delete_post(&self, actor: UserId, id: PostId) -> Result<(), ListingError> {
        self.owned_post(actor, id)?;
        Ok(self.repository.delete_post(id)?)
    }

    /// Everyone's listings, ranked: weight descending, then freshness.
    pub fn feed(&self) -> Result<Vec<Post>, ListingError> {
        let mut posts = self.repository.public_posts()?;
        posts.sort_by(|a, b| b.weight.cmp(&a.weight).then(b.created.cmp(&a.created)));
        Ok(posts)
    }

    /// Counts a view unless the owner is looking at their own listing.
    pub fn record_view(&self, viewer: UserId, id: PostId) -> Result<Post, ListingError> {
        let mut post = self.post(id)?;
        if post.owner != viewer {
            post.views += 1;
            self.repository.update_post(post.clone())?;
        }
        Ok(post)
    }

    /// Applies a like or dislike through the reaction table; the tally
    /// delta lands on both `likes` and `weight`.
    pub fn react(&self, actor: UserId, id: PostId, action: ReactionKind) -> Result<Post, ListingError> {
        let mut post = self.post(id)?;
        let step = reactions::shift(post.reaction_of(actor), action);

        post.likers.remove(&actor);
        post.dislikers.remove(&actor);
        match step.next {
            Reaction::Liked => {
                post.likers.insert(actor);
            }
            Reaction::Disliked => {
                post.dislikers.insert(actor);
            }
            Reaction::None => {}
        }
        post.likes += step.delta;
        post.weight += step.delta;

        self.repository.update_post(post.clone())?;
        Ok(post)
    }

    pub fn set_favorite(&self, actor: UserId, id: PostId, favored: bool) -> Result<Post, ListingError> {
        let mut post = self.post(id)?;
        if favored {
            post.favorited_by.insert(actor);
        } else {
            post.favorited_by.remove(&actor);
        }
        self.repository.update_post(post.clone())?;
        Ok(post)
    }

    pub fn favorites_of(&self, actor: UserId) -> Result<Vec<Post>, ListingError> {
        let posts = self.repository.public_posts()?;
        Ok(posts
            .into_iter()
            .filter(|post| post.favorited_by.contains(&actor))
            .collect())
    }

    fn staff_only(&self, actor: UserId) -> Result<(), ListingError> {
        let user = self.users.fetch_user(actor)?.ok_or(StoreError::NotFound)?;
        if user.staff {
            Ok(())
        } else {
            Err(ListingError::NotStaff)
        }
    }

    /// Staff verdict that pulls the listing off the public feed.
    pub fn reject_post(
        &self,
        actor: UserId,
        id: PostId,
        reason: ListingIssue,
    ) -> Result<Post, ListingError> {
        self.staff_only(actor)?;
        let mut post = self.post(id)?;
        post.rejected = true;
        post.reject_reason = Some(reason);
        self.repository.update_post(post.clone())?;
        Ok(post)
    }

    /// Staff reversal of a rejection.
    pub fn reinstate_post(&self, actor: UserId, id: PostId) -> Result<Post, ListingError> {
        self.staff_only(actor)?;
        let mut post = self.post(id)?;
        post.rejected = false;
        post.reject_reason = None;
        self.repository.update_post(post.clone())?;
        Ok(post)
    }

    /// Owner refresh of the `created` timestamp, allowed once the
    /// listing is at least [`RELEVANCE_WINDOW_DAYS`] old.
    pub fn confirm_relevance(
        &self,
        actor: UserId,
        id: PostId,
        now: NaiveDateTime,
    ) -> Result<Post, ListingError> {
        let mut post = self.owned_post(actor, id)?;
        let elapsed = now.signed_duration_since(post.created);
        if elapsed.num_days() < RELEVANCE_WINDOW_DAYS {
            return Err(ListingError::RelevanceTooSoon);
        }
        post.created = now;
        self.repository.update_post(post.clone())?;
        Ok(post)
    }

    /// Files a complaint; the seller cannot report their own listing
    /// and each account gets one complaint per post.
    pub fn complain(
        &self,
        actor: UserId,
        id: PostId,
        reason: ListingIssue,
    ) -> Result<Complaint, ListingError> {
        let post = self.post(id)?;
        if post.owner == actor {
            return Err(ListingError::OwnComplaint);
        }
        match self.repository.insert_complaint(NewComplaint {
            post: id,
            author: actor,
            reason,
        }) {
            Ok(complaint) => Ok(complaint),
            Err(StoreError::Conflict) => Err(ListingError::DuplicateComplaint),
            Err(err) => Err(err.into()),
        }
    }

    pub fn complaints(&self, actor: UserId, id: PostId) -> Result<Vec<Complaint>, ListingError> {
        self.staff_only(actor)?;
        Ok(self.repository.complaints_for_post(id)?)
    }

    /// Stores a saved search for `actor`. Gated like post creation.
    pub fn create_filter(
        &self,
        actor: UserId,
        mut filter: NewSavedFilter,
    ) -> Result<SavedFilter, ListingError> {
        let user = self.users.fetch_user(actor)?.ok_or(StoreError::NotFound)?;
        if user.banned {
            return Err(ListingError::Banned);
        }

        let current = self.repository.count_filters_for_owner(actor)?;
        self.quota
            .check(QuotaKind::SavedFilters, user.subscribed, current)?;

        filter.owner = actor;
        Ok(self.repository.insert_filter(filter)?)
    }

    pub fn delete_filter(&self, actor: UserId, id: FilterId) -> Result<(), ListingError> {
        let filter = self
            .repository
            .fetch_filter(id)?
            .ok_or(StoreError::NotFound)?;
        if filter.owner != actor {
            return Err(ListingError::NotPostOwner);
        }
        Ok(self.repository.delete_filter(id)?)
    }

    pub fn filters_of(&self, actor: UserId) -> Result<Vec<SavedFilter>, ListingError> {
        Ok(self.repository.filters_for_owner(actor)?)
    }

    /// Daily sweep: matches the day's new listings against every saved
    /// filter and tells each filter owner about each hit. Returns the
    /// number of notifications sent.
    pub fn notify_new_matches(&self, today: NaiveDate) -> Result<usize, ListingError> {
        let fresh = self.repository.posts_created_on(today)?;
        let filters = self.repository.all_filters()?;
        let mut notified = 0;

        for post in &fresh {
            if post.rejected {
                continue;
            }
            let Some(flat) = self.housing.fetch_flat(post.flat)? else {
                continue;
            };
            let Some(house) = self.housing.house_of_flat(post.flat)? else {
                continue;
            };
            for filter in &filters {
                if filter.owner == post.owner {
                    continue;
                }
                if filter.matches(post, &flat, &house) {
                    self.notifier.notify(
                        filter.owner,
                        &format!(
                            "New listing #{} matches your saved filter \"{}\".",
                            post.id, filter.name
                        ),
                    )?;
                    notified += 1;
                }
            }
        }
        Ok(notified)
    }
}
