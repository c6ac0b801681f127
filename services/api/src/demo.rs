use crate::infra::{build_marketplace, Marketplace};
use crate::scheduler::Sweeps;
use chrono::{Days, Local, NaiveDate, NaiveTime};
use clap::Args;
use estate_board::config::AppConfig;
use estate_board::error::AppError;
use estate_board::marketplace::accounts::{NewUser, Role, UserId};
use estate_board::marketplace::housing::{
    Benefits, Flat, FlatState, FloorId, Heating, HouseClass, HouseMarket, HouseStatus, NewBuilding,
    NewFlat, NewFloor, NewHouse, NewSection, PaymentOption, Technology, Territory,
};
use estate_board::marketplace::listings::{
    AgentCommission, ContactChannel, Market, NewSavedFilter, PostSubmission, ReactionKind,
};
use estate_board::marketplace::promotions::{PromoPhrase, PromotionOrder};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reporting date for the walkthrough (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the daily-sweep portion of the walkthrough.
    #[arg(long)]
    pub(crate) skip_sweeps: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { today, skip_sweeps } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let now = today.and_time(NaiveTime::MIN);

    let config = AppConfig::load()?;
    let market = build_marketplace(&config.marketplace)?;

    println!("Estate board walkthrough ({today})");

    println!("\nCast");
    let riviera = market.accounts.register(demo_user(
        "sales@riviera.example",
        "Riviera",
        "Sales",
        Role::SalesDepartment,
    ))?;
    let maria = market.accounts.register(demo_user(
        "maria@example.com",
        "Maria",
        "Koval",
        Role::Client,
    ))?;
    let danylo = market.accounts.register(demo_user(
        "danylo@example.com",
        "Danylo",
        "Bondar",
        Role::Client,
    ))?;
    for user in [&riviera, &maria, &danylo] {
        println!("- {} ({})", user.email, user.role.label());
    }

    println!("\nDevelopment");
    let house = market.housing.create_house(riviera.id, demo_house(riviera.id))?;
    let building = market.housing.add_building(
        riviera.id,
        NewBuilding {
            number: 1,
            house: house.id,
        },
    )?;
    let section = market.housing.add_section(
        riviera.id,
        NewSection {
            number: 1,
            building: building.id,
        },
    )?;
    let floor = market.housing.add_floor(
        riviera.id,
        NewFloor {
            number: 7,
            section: section.id,
        },
    )?;
    let flat_a = market
        .housing
        .add_flat(riviera.id, demo_flat(floor.id, 12, 56.0, 2, 56_000.0))?;
    let flat_b = market
        .housing
        .add_flat(riviera.id, demo_flat(floor.id, 34, 84.5, 3, 92_950.0))?;
    println!(
        "- {} at {}, {} | flats #{} and #{} on floor {}",
        house.name, house.address, house.city, flat_a.id, flat_b.id, floor.number
    );

    println!("\nListings");
    let post_a = market.listings.create_post(
        riviera.id,
        listing_for(&flat_a, "Two rooms with a sea view"),
        now,
    )?;
    let post_b = market.listings.create_post(
        riviera.id,
        listing_for(&flat_b, "Three rooms over the promenade"),
        now,
    )?;
    market.listings.record_view(maria.id, post_a.id)?;
    market.listings.record_view(danylo.id, post_a.id)?;
    market.listings.react(maria.id, post_a.id, ReactionKind::Like)?;
    market.listings.react(danylo.id, post_a.id, ReactionKind::Like)?;
    market.listings.set_favorite(danylo.id, post_a.id, true)?;
    print_feed(&market)?;

    println!("\nBooking");
    let booked = market.booking.set_booking(flat_a.id, maria.id, true)?;
    println!(
        "- Maria booked flat #{} (booked={}, owned={})",
        booked.id, booked.booked, booked.owned
    );
    if let Err(err) = market.booking.set_booking(flat_a.id, danylo.id, true) {
        println!("- Danylo's follow-up attempt was refused: {err}");
    }

    let inbox = market.booking.pending_requests(house.id, riviera.id)?;
    let request = match inbox.first() {
        Some(request) => request,
        None => {
            println!("- The review inbox is unexpectedly empty");
            return Ok(());
        }
    };
    let approved = market
        .booking
        .review_request(request.id, riviera.id, true)?;
    println!(
        "- Sales approved request #{}: flat #{} now owned={}",
        request.id, approved.id, approved.owned
    );

    println!("\nPromotion");
    let catalog = market.promotions.catalog()?;
    for kind in &catalog {
        println!(
            "  - {}: {:.0} UAH (+{} weight)",
            kind.label, kind.price, kind.efficiency
        );
    }
    let turbo = match catalog.iter().find(|kind| kind.label == "Turbo") {
        Some(kind) => kind,
        None => {
            println!("- The catalog is missing its Turbo tier");
            return Ok(());
        }
    };
    let promotion = market.promotions.promote(
        riviera.id,
        post_b.id,
        PromotionOrder {
            kind: turbo.id,
            phrase: Some(PromoPhrase::BySea),
            color: None,
            paid: true,
            end_date: today + Days::new(30),
        },
    )?;
    println!(
        "- Promoted listing #{} for {:.0} UAH until {}",
        post_b.id, promotion.price, promotion.end_date
    );
    print_feed(&market)?;

    println!("\nSubscription and saved search");
    let subscriber = market.accounts.subscribe(danylo.id, today)?;
    if let Some(until) = subscriber.subscription_until {
        println!("- Danylo is on the paid plan until {until}");
    }
    let filter = market.listings.create_filter(
        danylo.id,
        NewSavedFilter {
            owner: danylo.id,
            name: "Two rooms by the sea".to_owned(),
            market: Market::NewBuilding,
            rooms: Some(2),
            price_min: None,
            price_max: Some(60_000.0),
            area_min: None,
            area_max: None,
            state: None,
        },
    )?;
    println!("- Saved filter \"{}\"", filter.name);

    if skip_sweeps {
        return Ok(());
    }

    println!("\nDaily sweeps");
    let outcome = Sweeps::for_marketplace(&market).run_for(today)?;
    println!(
        "- expired subscriptions: {} | renewal warnings: {} | retired promotions: {} | filter matches: {}",
        outcome.subscriptions_expired,
        outcome.expiry_warnings,
        outcome.promotions_expired,
        outcome.filter_matches
    );

    let mail = market.messaging.inbox(danylo.id)?;
    if mail.is_empty() {
        println!("- Danylo's inbox is empty");
    } else {
        println!("- Danylo's inbox:");
        for message in mail {
            println!("  - {}", message.text);
        }
    }

    Ok(())
}

fn demo_user(email: &str, first_name: &str, last_name: &str, role: Role) -> NewUser {
    NewUser {
        email: email.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        phone: "+380501234567".to_owned(),
        role,
    }
}

fn demo_house(sales_department: UserId) -> NewHouse {
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
        description: "Seafront development with closed grounds.".to_owned(),
        benefits: Benefits {
            playground: true,
            car_park: true,
            security: true,
            ..Benefits::default()
        },
        sales_department,
    }
}

fn demo_flat(floor: FloorId, number: u32, area_m2: f64, rooms: u8, price: f64) -> NewFlat {
    NewFlat {
        number,
        area_m2,
        kitchen_area_m2: 11.5,
        price_per_metre: price / area_m2,
        price,
        rooms,
        state: FlatState::Rough,
        balcony: true,
        floor,
    }
}

fn listing_for(flat: &Flat, description: &str) -> PostSubmission {
    PostSubmission {
        flat: flat.id,
        price: flat.price,
        description: description.to_owned(),
        commission: AgentCommission::Average,
        contact_by: ContactChannel::Both,
    }
}

fn print_feed(market: &Marketplace) -> Result<(), AppError> {
    println!("- Feed:");
    for post in market.listings.feed()? {
        println!(
            "  - #{} {:.0} UAH | weight {} | likes {} | views {} | {}",
            post.id, post.price, post.weight, post.likes, post.views, post.description
        );
    }
    Ok(())
}
