use std::sync::Arc;

use estate_board::marketplace::accounts::{
    AccountRepository, AccountService, NewUser, Role, User,
};
use estate_board::marketplace::booking::{BookingError, BookingService};
use estate_board::marketplace::housing::{
    Benefits, Flat, FlatState, Heating, House, HouseClass, HouseMarket, HouseStatus, HousingService,
    NewBuilding, NewFlat, NewFloor, NewHouse, NewSection, PaymentOption, Technology, Territory,
};
use estate_board::marketplace::notifications::NotificationDispatcher;
use estate_board::marketplace::store::MemoryStore;

type Dispatcher = NotificationDispatcher<MemoryStore, MemoryStore>;

struct Market {
    accounts: AccountService<MemoryStore, Dispatcher>,
    housing: HousingService<MemoryStore, MemoryStore>,
    booking: BookingService<MemoryStore, MemoryStore, MemoryStore>,
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
        accounts: AccountService::new(store.clone(), dispatcher),
        housing: HousingService::new(store.clone(), store.clone()),
        booking: BookingService::new(store.clone(), store.clone(), store),
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

fn seed_flat(market: &Market, department: &User) -> (House, Flat) {
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
    let flat = market
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
        .expect("flat added");
    (house, flat)
}

#[test]
fn booking_holds_the_flat_for_review() {
    let market = market();
    let department = register(&market, "sales@riviera.example", Role::SalesDepartment);
    let maria = register(&market, "maria@example.com", Role::Client);
    let (house, flat) = seed_flat(&market, &department);

    let booked = market
        .booking
        .set_booking(flat.id, maria.id, true)
        .expect("booking succeeds");

    assert!(booked.booked);
    assert!(!booked.owned);
    assert_eq!(booked.client, Some(maria.id));

    let inbox = market
        .booking
        .pending_requests(house.id, department.id)
        .expect("inbox readable");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].flat, flat.id);
    assert!(!inbox[0].approved);
}

#[test]
fn occupied_flat_turns_away_the_next_client() {
    let market = market();
    let department = register(&market, "sales@riviera.example", Role::SalesDepartment);
    let maria = register(&market, "maria@example.com", Role::Client);
    let danylo = register(&market, "danylo@example.com", Role::Client);
    let (_, flat) = seed_flat(&market, &department);

    market
        .booking
        .set_booking(flat.id, maria.id, true)
        .expect("first booking succeeds");

    match market.booking.set_booking(flat.id, danylo.id, true) {
        Err(BookingError::FlatTaken) => {}
        other => panic!("expected FlatTaken, got {other:?}"),
    }

    // Releasing reopens the flat for anyone.
    market
        .booking
        .set_booking(flat.id, maria.id, false)
        .expect("release succeeds");
    let rebooked = market
        .booking
        .set_booking(flat.id, danylo.id, true)
        .expect("second client books the freed flat");
    assert_eq!(rebooked.client, Some(danylo.id));
}

#[test]
fn approval_makes_the_client_an_owner() {
    let market = market();
    let department = register(&market, "sales@riviera.example", Role::SalesDepartment);
    let maria = register(&market, "maria@example.com", Role::Client);
    let (house, flat) = seed_flat(&market, &department);

    market
        .booking
        .set_booking(flat.id, maria.id, true)
        .expect("booking succeeds");
    let request = market
        .booking
        .pending_requests(house.id, department.id)
        .expect("inbox readable")
        .remove(0);

    let settled = market
        .booking
        .review_request(request.id, department.id, true)
        .expect("approval succeeds");
    assert!(settled.owned);
    assert!(settled.booked);
    assert_eq!(settled.client, Some(maria.id));

    let inbox = market
        .booking
        .pending_requests(house.id, department.id)
        .expect("inbox readable");
    assert!(inbox.is_empty(), "approved requests leave the inbox");

    // The department can still unwind a settled sale.
    let released = market
        .booking
        .set_booking(flat.id, department.id, false)
        .expect("department release succeeds");
    assert!(!released.booked);
    assert!(!released.owned);
    assert_eq!(released.client, None);
}

#[test]
fn disapproval_returns_the_flat_to_the_market() {
    let market = market();
    let department = register(&market, "sales@riviera.example", Role::SalesDepartment);
    let maria = register(&market, "maria@example.com", Role::Client);
    let danylo = register(&market, "danylo@example.com", Role::Client);
    let (house, flat) = seed_flat(&market, &department);

    market
        .booking
        .set_booking(flat.id, maria.id, true)
        .expect("booking succeeds");
    let request = market
        .booking
        .pending_requests(house.id, department.id)
        .expect("inbox readable")
        .remove(0);

    let freed = market
        .booking
        .review_request(request.id, department.id, false)
        .expect("disapproval succeeds");
    assert!(!freed.booked);
    assert_eq!(freed.client, None);

    let inbox = market
        .booking
        .pending_requests(house.id, department.id)
        .expect("inbox readable");
    assert!(inbox.is_empty());

    market
        .booking
        .set_booking(flat.id, danylo.id, true)
        .expect("the freed flat takes a new booking");
}
