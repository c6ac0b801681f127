use chrono::NaiveDate;

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::store::StoreError;

use super::domain::{Complaint, NewComplaint, NewPost, Post, PostId};
use super::filters::{FilterId, NewSavedFilter, SavedFilter};

/// Storage surface for posts, complaints, and saved filters.
pub trait ListingRepository: Send + Sync {
    fn insert_post(&self, post: NewPost) -> Result<Post, StoreError>;

    fn fetch_post(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Replaces the stored post matching `post.id`.
    fn update_post(&self, post: Post) -> Result<(), StoreError>;

    fn delete_post(&self, id: PostId) -> Result<(), StoreError>;

    fn posts_for_owner(&self, owner: UserId) -> Result<Vec<Post>, StoreError>;

    fn count_posts_for_owner(&self, owner: UserId) -> Result<u32, StoreError>;

    /// Posts visible on the public feed: everything not rejected by
    /// moderation, in no particular order.
    fn public_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Posts whose `created` timestamp falls on `date`; feeds the
    /// filter-match sweep.
    fn posts_created_on(&self, date: NaiveDate) -> Result<Vec<Post>, StoreError>;

    /// Persists a complaint. A second complaint by the same author on
    /// the same post yields `Conflict`.
    fn insert_complaint(&self, complaint: NewComplaint) -> Result<Complaint, StoreError>;

    fn complaints_for_post(&self, post: PostId) -> Result<Vec<Complaint>, StoreError>;

    fn insert_filter(&self, filter: NewSavedFilter) -> Result<SavedFilter, StoreError>;

    fn fetch_filter(&self, id: FilterId) -> Result<Option<SavedFilter>, StoreError>;

    fn delete_filter(&self, id: FilterId) -> Result<(), StoreError>;

    fn filters_for_owner(&self, owner: UserId) -> Result<Vec<SavedFilter>, StoreError>;

    fn count_filters_for_owner(&self, owner: UserId) -> Result<u32, StoreError>;

    fn all_filters(&self) -> Result<Vec<SavedFilter>, StoreError>;
}
