//! Creation caps for unsubscribed users.
//!
//! The limits are plain configuration injected at service construction;
//! subscribed users bypass them entirely. Only creation is gated — rows
//! already over the cap survive an expired subscription untouched.

/// Which capped resource a check is guarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaKind {
    Posts,
    SavedFilters,
}

impl QuotaKind {
    pub const fn label(self) -> &'static str {
        match self {
            QuotaKind::Posts => "posts",
            QuotaKind::SavedFilters => "saved filters",
        }
    }
}

/// Per-user creation limits applied while `subscribed` is false.
#[derive(Debug, Clone, Copy)]
pub struct QuotaPolicy {
    post_limit: u32,
    filter_limit: u32,
}

impl QuotaPolicy {
    pub const DEFAULT_POST_LIMIT: u32 = 5;
    pub const DEFAULT_FILTER_LIMIT: u32 = 3;

    pub fn new(post_limit: u32, filter_limit: u32) -> Self {
        Self {
            post_limit,
            filter_limit,
        }
    }

    pub fn post_limit(&self) -> u32 {
        self.post_limit
    }

    pub fn filter_limit(&self) -> u32 {
        self.filter_limit
    }

    fn limit_for(&self, kind: QuotaKind) -> u32 {
        match kind {
            QuotaKind::Posts => self.post_limit,
            QuotaKind::SavedFilters => self.filter_limit,
        }
    }

    /// Gate a creation attempt. `current` is the caller's existing row
    /// count for `kind`; subscribed callers always pass.
    pub fn check(
        &self,
        kind: QuotaKind,
        subscribed: bool,
        current: u32,
    ) -> Result<(), QuotaExceeded> {
        if subscribed || current < self.limit_for(kind) {
            return Ok(());
        }

        Err(QuotaExceeded {
            kind,
            limit: self.limit_for(kind),
        })
    }
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POST_LIMIT, Self::DEFAULT_FILTER_LIMIT)
    }
}

/// Raised when an unsubscribed user is already at the cap.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("quota exceeded: unsubscribed users may keep at most {limit} {}", .kind.label())]
pub struct QuotaExceeded {
    pub kind: QuotaKind,
    pub limit: u32,
}
