use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use estate_board::marketplace::accounts::{
    AccountRepository, AccountService, NewUser, Role, User,
};
use estate_board::marketplace::housing::{
    Benefits, Flat, FlatState, Heating, HouseClass, HouseMarket, HouseStatus, HousingService,
    NewBuilding, NewFlat, NewFloor, NewHouse, NewSection, PaymentOption, Technology, Territory,
};
use estate_board::marketplace::listings::{
    AgentCommission, ContactChannel, ListingError, ListingService, Market as SearchMarket,
    NewSavedFilter, PostSubmission,
};
use estate_board::marketplace::notifications::NotificationDispatcher;
use estate_board::marketplace::quota::QuotaPolicy;
use estate_board::marketplace::store::MemoryStore;

type Dispatcher = NotificationDispatcher<MemoryStore, MemoryStore>;

struct Market {
    accounts: AccountService<MemoryStore, Dispatcher>,
    housing: HousingService<MemoryStore, MemoryStore>,
    listings: ListingService<MemoryStore, MemoryStore, MemoryStore, Dispatcher>,
}

fn market() -> Market {
    let store = Arc::new(MemoryStore::new());
    let system = store
        .insert_user(NewUser {
            email: "board@estate.example".to_owned(),
            first_name: "Estate".to_owned(),
            last_name: "Board".to_owned(),
            phone: String::new(),
            role: Role::System,
        })
        .expect("system sender provisions");
    let dispatcher = Arc::new(NotificationDispatcher::new(
        store.clone(),
        store.clone(),
        system.id,
    ));

    Market {
        accounts: AccountService::new(store.clone(), dispatcher.clone()),
        housing: HousingService::new(store.clone(), store.clone()),
        listings: ListingService::new(
            store.clone(),
            store.clone(),
            store,
            dispatcher,
            QuotaPolicy::default(),
        ),
    }
}

fn register(market: &Market, email: &str, role: Role) -> User {
    market
        .accounts
        .register(NewUser {
            email: email.to_owned(),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
            phone: "+380501234567".to_owned(),
            role,
        })
        .expect("registration succeeds")
}

fn seed_flat(market: &Market, department: &User) -> Flat {
    let house = market
        .housing
        .create_house(
            department.id,
            NewHouse {
                name: "Riviera".to_owned(),
                address: "Fontanska Road 33".to_owned(),
                city: "Odesa".to_owned(),
                market: HouseMarket::NewBuilding,
                status: HouseStatus::Flats,
                class: HouseClass::Common,
                technology: Technology::MonolithicFrame,
                territory: Territory::Closed,
                distance_to_sea_m: 450,
                ceiling_height_m: 2.8,
                heating: Heating::Central,
                payment: PaymentOption::Mortgage,
                description: "Seafront development.".to_owned(),
                benefits: Benefits::default(),
                sales_department: department.id,
            },
        )
        .expect("house created");
    let building = market
        .housing
        .add_building(
            department.id,
            NewBuilding {
                number: 1,
                house: house.id,
            },
        )
        .expect("building added");
    let section = market
        .housing
        .add_section(
            department.id,
            NewSection {
                number: 1,
                building: building.id,
            },
        )
        .expect("section added");
    let floor = market
        .housing
        .add_floor(
            department.id,
            NewFloor {
                number: 4,
                section: section.id,
            },
        )
        .expect("floor added");
    market
        .housing
        .add_flat(
            department.id,
            NewFlat {
                number: 12,
                area_m2: 56.0,
                kitchen_area_m2: 11.5,
                price_per_metre: 1_000.0,
                price: 56_000.0,
                rooms: 2,
                state: FlatState::Rough,
                balcony: true,
                floor: floor.id,
            },
        )
        .expect("flat added")
}

fn submission(flat: &Flat) -> PostSubmission {
    PostSubmission {
        flat: flat.id,
        price: flat.price,
        description: "Two rooms with a sea view".to_owned(),
        commission: AgentCommission::Average,
        contact_by: ContactChannel::Both,
    }
}

fn open_filter(owner: &User, name: &str) -> NewSavedFilter {
    NewSavedFilter {
        owner: owner.id,
        name: name.to_owned(),
        market: SearchMarket::All,
        rooms: None,
        price_min: None,
        price_max: None,
        area_min: None,
        area_max: None,
        state: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn noon(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::from_hms_opt(12, 0, 0).expect("valid time"))
}

#[test]
fn the_free_post_cap_lifts_with_a_subscription() {
    let market = market();
    let department = register(&market, "sales@riviera.example", Role::SalesDepartment);
    let seller = register(&market, "olena@example.com", Role::Client);
    let flat = seed_flat(&market, &department);
    let published = noon(date(2026, 3, 10));

    for _ in 0..5 {
        market
            .listings
            .create_post(seller.id, submission(&flat), published)
            .expect("post within the free cap");
    }
    match market
        .listings
        .create_post(seller.id, submission(&flat), published)
    {
        Err(ListingError::Quota(_)) => {}
        other => panic!("expected the quota to close, got {other:?}"),
    }

    market
        .accounts
        .subscribe(seller.id, date(2026, 3, 15))
        .expect("subscription starts");
    market
        .listings
        .create_post(seller.id, submission(&flat), published)
        .expect("subscribers publish past the cap");

    // Lapse through the cancel-then-sweep path.
    market
        .accounts
        .cancel_subscription(seller.id, date(2026, 3, 20))
        .expect("cancellation recorded");
    let expired = market
        .accounts
        .expire_subscriptions(date(2026, 3, 20))
        .expect("sweep runs");
    assert_eq!(expired, 1);

    match market
        .listings
        .create_post(seller.id, submission(&flat), published)
    {
        Err(ListingError::Quota(_)) => {}
        other => panic!("expected the quota to close again, got {other:?}"),
    }

    // Rows created while subscribed survive the lapse.
    let feed = market.listings.feed().expect("feed readable");
    assert_eq!(feed.len(), 6);
}

#[test]
fn the_saved_filter_cap_works_the_same_way() {
    let market = market();
    let danylo = register(&market, "danylo@example.com", Role::Client);

    for name in ["By the sea", "Two rooms", "Under 60k"] {
        market
            .listings
            .create_filter(danylo.id, open_filter(&danylo, name))
            .expect("filter within the free cap");
    }
    match market
        .listings
        .create_filter(danylo.id, open_filter(&danylo, "One more"))
    {
        Err(ListingError::Quota(_)) => {}
        other => panic!("expected the quota to close, got {other:?}"),
    }

    market
        .accounts
        .subscribe(danylo.id, date(2026, 3, 15))
        .expect("subscription starts");
    market
        .listings
        .create_filter(danylo.id, open_filter(&danylo, "One more"))
        .expect("subscribers save past the cap");

    let saved = market.listings.filters_of(danylo.id).expect("filters list");
    assert_eq!(saved.len(), 4);
}
