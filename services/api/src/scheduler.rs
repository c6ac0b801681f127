use crate::infra::{Accounts, Listings, Marketplace, Promotions};
use chrono::{Local, NaiveDate};
use estate_board::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// The three services the daily pass touches.
#[derive(Clone)]
pub(crate) struct Sweeps {
    accounts: Arc<Accounts>,
    listings: Arc<Listings>,
    promotions: Arc<Promotions>,
}

/// Counts reported by one daily pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepOutcome {
    pub(crate) subscriptions_expired: usize,
    pub(crate) expiry_warnings: usize,
    pub(crate) promotions_expired: usize,
    pub(crate) filter_matches: usize,
}

impl Sweeps {
    pub(crate) fn for_marketplace(market: &Marketplace) -> Self {
        Self {
            accounts: market.accounts.clone(),
            listings: market.listings.clone(),
            promotions: market.promotions.clone(),
        }
    }

    /// Runs every scheduled sweep against `today`.
    ///
    /// Order mirrors how the notices read: subscription lapses first so
    /// renewal warnings never chase an account that just expired, then
    /// promotion retirements, then saved-filter matches for the day's
    /// fresh listings.
    pub(crate) fn run_for(&self, today: NaiveDate) -> Result<SweepOutcome, AppError> {
        let subscriptions_expired = self.accounts.expire_subscriptions(today)?;
        let expiry_warnings = self.accounts.warn_expiring_subscriptions(today)?;
        let promotions_expired = self.promotions.expire_due(today)?;
        let filter_matches = self.listings.notify_new_matches(today)?;

        Ok(SweepOutcome {
            subscriptions_expired,
            expiry_warnings,
            promotions_expired,
            filter_matches,
        })
    }
}

/// Background loop driving the daily pass. The first tick fires right
/// away, so a freshly booted service catches up before settling into
/// the configured cadence.
pub(crate) async fn run(sweeps: Sweeps, interval_secs: u64) {
    // tokio panics on a zero-length interval.
    let period = Duration::from_secs(interval_secs.max(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let today = Local::now().date_naive();
        match sweeps.run_for(today) {
            Ok(outcome) => info!(
                %today,
                subscriptions_expired = outcome.subscriptions_expired,
                expiry_warnings = outcome.expiry_warnings,
                promotions_expired = outcome.promotions_expired,
                filter_matches = outcome.filter_matches,
                "daily sweeps finished"
            ),
            Err(err) => warn!(%today, error = %err, "daily sweeps failed"),
        }
    }
}
