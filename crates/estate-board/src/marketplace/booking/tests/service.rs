use super::common::*;
use crate::marketplace::accounts::domain::Role;
use crate::marketplace::booking::domain::NewBookingRequest;
use crate::marketplace::booking::repository::BookingRepository;
use crate::marketplace::booking::service::BookingError;
use crate::marketplace::housing::repository::HousingRepository;

#[test]
fn booking_claims_the_flat_and_raises_a_request() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let (house, flat) = seed_flat(&store, department);

    let claimed = service.set_booking(flat.id, client, true).expect("booked");

    assert!(claimed.booked);
    assert!(!claimed.owned);
    assert_eq!(claimed.client, Some(client));

    let inbox = service
        .pending_requests(house.id, department)
        .expect("inbox");
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].flat, flat.id);
    assert!(!inbox[0].approved);
}

#[test]
fn a_taken_flat_cannot_be_booked_again() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let first = register(&store, "first@example.com", Role::Client);
    let second = register(&store, "second@example.com", Role::Client);
    let (_, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, first, true).expect("booked");

    match service.set_booking(flat.id, second, true) {
        Err(BookingError::FlatTaken) => {}
        other => panic!("expected taken conflict, got {other:?}"),
    }

    // The first claim stands.
    let current = store.fetch_flat(flat.id).expect("fetch").expect("present");
    assert_eq!(current.client, Some(first));
}

#[test]
fn the_house_owner_hits_the_same_conflict() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let (_, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, client, true).expect("booked");

    match service.set_booking(flat.id, department, true) {
        Err(BookingError::FlatTaken) => {}
        other => panic!("expected taken conflict, got {other:?}"),
    }
}

#[test]
fn banned_accounts_cannot_book() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "banned@example.com", Role::Client);
    let (_, flat) = seed_flat(&store, department);
    set_banned(&store, client);

    match service.set_booking(flat.id, client, true) {
        Err(BookingError::Banned) => {}
        other => panic!("expected ban check, got {other:?}"),
    }
}

#[test]
fn a_stale_request_blocks_the_claim_and_is_undone() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let (house, flat) = seed_flat(&store, department);
    // An unreviewed request left behind without a matching claim.
    store
        .insert_request(NewBookingRequest { house: house.id, flat: flat.id })
        .expect("request stored");

    match service.set_booking(flat.id, client, true) {
        Err(BookingError::FlatTaken) => {}
        other => panic!("expected taken conflict, got {other:?}"),
    }

    // The claim was rolled back, not left dangling.
    let current = store.fetch_flat(flat.id).expect("fetch").expect("present");
    assert!(!current.booked);
    assert_eq!(current.client, None);
}

#[test]
fn release_requires_the_client_or_the_department() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let stranger = register(&store, "stranger@example.com", Role::Client);
    let (_, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, client, true).expect("booked");

    match service.set_booking(flat.id, stranger, false) {
        Err(BookingError::NotCurrentClient) => {}
        other => panic!("expected client check, got {other:?}"),
    }
}

#[test]
fn release_clears_the_flat_and_its_requests() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let (house, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, client, true).expect("booked");

    let released = service.set_booking(flat.id, client, false).expect("released");

    assert!(!released.booked);
    assert!(!released.owned);
    assert_eq!(released.client, None);
    assert!(service
        .pending_requests(house.id, department)
        .expect("inbox")
        .is_empty());
}

#[test]
fn the_department_can_release_on_the_clients_behalf() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let (_, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, client, true).expect("booked");

    let released = service
        .set_booking(flat.id, department, false)
        .expect("released");
    assert_eq!(released.client, None);
}

#[test]
fn approval_marks_the_flat_owned() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let (house, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, client, true).expect("booked");
    let request = service.pending_requests(house.id, department).expect("inbox")[0];

    let sold = service
        .review_request(request.id, department, true)
        .expect("approved");

    assert!(sold.owned);
    assert!(sold.booked);
    assert_eq!(sold.client, Some(client));

    let record = store
        .fetch_request(request.id)
        .expect("fetch")
        .expect("present");
    assert!(record.approved);
    // Approved requests leave the review inbox.
    assert!(service
        .pending_requests(house.id, department)
        .expect("inbox")
        .is_empty());
}

#[test]
fn disapproval_frees_the_flat_for_the_next_client() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let next = register(&store, "next@example.com", Role::Client);
    let (house, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, client, true).expect("booked");
    let request = service.pending_requests(house.id, department).expect("inbox")[0];

    let freed = service
        .review_request(request.id, department, false)
        .expect("disapproved");

    assert!(!freed.booked);
    assert_eq!(freed.client, None);
    assert_eq!(store.fetch_request(request.id).expect("fetch"), None);

    // The flat is immediately bookable again.
    let claimed = service.set_booking(flat.id, next, true).expect("rebooked");
    assert_eq!(claimed.client, Some(next));
}

#[test]
fn review_is_restricted_to_the_owning_department() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let rival = register(&store, "sales@rival.example", Role::SalesDepartment);
    let client = register(&store, "client@example.com", Role::Client);
    let (house, flat) = seed_flat(&store, department);
    service.set_booking(flat.id, client, true).expect("booked");
    let request = service.pending_requests(house.id, department).expect("inbox")[0];

    match service.review_request(request.id, rival, true) {
        Err(BookingError::NotHouseOwner) => {}
        other => panic!("expected owner check, got {other:?}"),
    }
}

#[test]
fn the_inbox_is_restricted_to_the_owning_department() {
    let (service, store) = build_service();
    let department = register(&store, "sales@riviera.example", Role::SalesDepartment);
    let rival = register(&store, "sales@rival.example", Role::SalesDepartment);
    let (house, _) = seed_flat(&store, department);

    match service.pending_requests(house.id, rival) {
        Err(BookingError::NotHouseOwner) => {}
        other => panic!("expected owner check, got {other:?}"),
    }
}
