use chrono::NaiveDate;
use estate_board::config::MarketplaceConfig;
use estate_board::error::AppError;
use estate_board::marketplace::accounts::{
    AccountError, AccountRepository, AccountService, NewUser, Role,
};
use estate_board::marketplace::booking::BookingService;
use estate_board::marketplace::housing::HousingService;
use estate_board::marketplace::listings::ListingService;
use estate_board::marketplace::notifications::{MessagingService, NotificationDispatcher};
use estate_board::marketplace::promotions::{
    NewPromotionType, PromotionError, PromotionRepository, PromotionService,
};
use estate_board::marketplace::store::MemoryStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Dispatcher = NotificationDispatcher<MemoryStore, MemoryStore>;
pub(crate) type Accounts = AccountService<MemoryStore, Dispatcher>;
pub(crate) type Housing = HousingService<MemoryStore, MemoryStore>;
pub(crate) type Booking = BookingService<MemoryStore, MemoryStore, MemoryStore>;
pub(crate) type Listings = ListingService<MemoryStore, MemoryStore, MemoryStore, Dispatcher>;
pub(crate) type Promotions = PromotionService<MemoryStore, MemoryStore, MemoryStore, Dispatcher>;
pub(crate) type Messaging = MessagingService<MemoryStore, MemoryStore>;

/// Every marketplace service, wired over one shared [`MemoryStore`].
pub(crate) struct Marketplace {
    pub(crate) store: Arc<MemoryStore>,
    pub(crate) accounts: Arc<Accounts>,
    pub(crate) housing: Arc<Housing>,
    pub(crate) booking: Arc<Booking>,
    pub(crate) listings: Arc<Listings>,
    pub(crate) promotions: Arc<Promotions>,
    pub(crate) messaging: Arc<Messaging>,
}

/// Provisions the system sender and the promotion catalog on a fresh
/// store, then wires the service layer over it.
///
/// Registration rejects the system role, so the sender is inserted at
/// the repository level before any service takes the store.
pub(crate) fn build_marketplace(config: &MarketplaceConfig) -> Result<Marketplace, AppError> {
    let store = Arc::new(MemoryStore::new());

    let system = store
        .insert_user(NewUser {
            email: "board@estate.example".to_owned(),
            first_name: "Estate".to_owned(),
            last_name: "Board".to_owned(),
            phone: String::new(),
            role: Role::System,
        })
        .map_err(AccountError::from)?;

    for kind in starter_catalog() {
        store
            .insert_promotion_type(kind)
            .map_err(PromotionError::from)?;
    }

    let dispatcher = Arc::new(NotificationDispatcher::new(
        store.clone(),
        store.clone(),
        system.id,
    ));

    let accounts = Arc::new(AccountService::new(store.clone(), dispatcher.clone()));
    let housing = Arc::new(HousingService::new(store.clone(), store.clone()));
    let booking = Arc::new(BookingService::new(
        store.clone(),
        store.clone(),
        store.clone(),
    ));
    let listings = Arc::new(ListingService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        dispatcher.clone(),
        config.quota_policy(),
    ));
    let promotions = Arc::new(PromotionService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        dispatcher,
        config.promotion_pricing(),
    ));
    let messaging = Arc::new(MessagingService::new(store.clone(), store.clone()));

    Ok(Marketplace {
        store,
        accounts,
        housing,
        booking,
        listings,
        promotions,
        messaging,
    })
}

fn starter_catalog() -> Vec<NewPromotionType> {
    vec![
        NewPromotionType {
            label: "Raise".to_owned(),
            price: 299.0,
            efficiency: 20,
        },
        NewPromotionType {
            label: "Turbo".to_owned(),
            price: 499.0,
            efficiency: 45,
        },
        NewPromotionType {
            label: "Premium".to_owned(),
            price: 899.0,
            efficiency: 75,
        },
    ]
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
