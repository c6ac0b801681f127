use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::marketplace::accounts::domain::{
    Contact, ContactId, NewContact, NewUser, NotifyPreference, User, UserId,
};
use crate::marketplace::accounts::repository::AccountRepository;
use crate::marketplace::booking::domain::{BookingRequest, NewBookingRequest, RequestId};
use crate::marketplace::booking::repository::BookingRepository;
use crate::marketplace::housing::domain::{
    Building, BuildingId, Flat, FlatId, Floor, FloorId, House, HouseId, NewBuilding, NewFlat,
    NewFloor, NewHouse, NewSection, Section, SectionId,
};
use crate::marketplace::housing::repository::HousingRepository;
use crate::marketplace::listings::domain::{
    Complaint, ComplaintId, NewComplaint, NewPost, Post, PostId,
};
use crate::marketplace::listings::filters::{FilterId, NewSavedFilter, SavedFilter};
use crate::marketplace::listings::repository::ListingRepository;
use crate::marketplace::notifications::domain::{Message, MessageId, NewMessage};
use crate::marketplace::notifications::repository::MessageRepository;
use crate::marketplace::promotions::domain::{
    NewPromotion, NewPromotionType, Promotion, PromotionId, PromotionType, PromotionTypeId,
};
use crate::marketplace::promotions::repository::PromotionRepository;

use super::StoreError;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    contacts: HashMap<ContactId, Contact>,
    houses: HashMap<HouseId, House>,
    buildings: HashMap<BuildingId, Building>,
    sections: HashMap<SectionId, Section>,
    floors: HashMap<FloorId, Floor>,
    flats: HashMap<FlatId, Flat>,
    requests: HashMap<RequestId, BookingRequest>,
    posts: HashMap<PostId, Post>,
    complaints: HashMap<ComplaintId, Complaint>,
    filters: HashMap<FilterId, SavedFilter>,
    promotion_types: HashMap<PromotionTypeId, PromotionType>,
    promotions: HashMap<PromotionId, Promotion>,
    messages: HashMap<MessageId, Message>,
}

/// Process-local store backing every repository trait at once.
///
/// All tables sit behind one mutex, which is what makes the booking
/// claim a genuine check-and-set: no other writer can slip between the
/// client test and the assignment.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("store mutex poisoned")
    }

    fn next_id(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl AccountRepository for MemoryStore {
    fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let record = User {
            id: UserId(self.next_id()),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
            staff: false,
            banned: false,
            subscribed: false,
            subscription_until: None,
            notify: NotifyPreference::Me,
            agent: None,
        };
        let mut guard = self.lock();
        guard.users.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let guard = self.lock();
        Ok(guard.users.get(&id).cloned())
    }

    fn update_user(&self, user: User) -> Result<(), StoreError> {
        let mut guard = self.lock();
        if guard.users.contains_key(&user.id) {
            guard.users.insert(user.id, user);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn subscriptions_ending(&self, date: NaiveDate) -> Result<Vec<User>, StoreError> {
        let guard = self.lock();
        let mut due: Vec<User> = guard
            .users
            .values()
            .filter(|user| user.subscribed && user.subscription_until == Some(date))
            .cloned()
            .collect();
        due.sort_by_key(|user| user.id);
        Ok(due)
    }

    fn insert_contact(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let record = Contact {
            id: ContactId(self.next_id()),
            owner: contact.owner,
            person: contact.person,
        };
        let mut guard = self.lock();
        guard.contacts.insert(record.id, record);
        Ok(record)
    }

    fn delete_contact(&self, id: ContactId) -> Result<(), StoreError> {
        let mut guard = self.lock();
        match guard.contacts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn fetch_contact(&self, id: ContactId) -> Result<Option<Contact>, StoreError> {
        let guard = self.lock();
        Ok(guard.contacts.get(&id).copied())
    }

    fn contacts_for(&self, owner: UserId) -> Result<Vec<Contact>, StoreError> {
        let guard = self.lock();
        let mut entries: Vec<Contact> = guard
            .contacts
            .values()
            .filter(|contact| contact.owner == owner)
            .copied()
            .collect();
        entries.sort_by_key(|contact| contact.id);
        Ok(entries)
    }
}

impl HousingRepository for MemoryStore {
    fn insert_house(&self, house: NewHouse) -> Result<House, StoreError> {
        let record = House {
            id: HouseId(self.next_id()),
            name: house.name,
            address: house.address,
            city: house.city,
            market: house.market,
            status: house.status,
            class: house.class,
            technology: house.technology,
            territory: house.territory,
            distance_to_sea_m: house.distance_to_sea_m,
            ceiling_height_m: house.ceiling_height_m,
            heating: house.heating,
            payment: house.payment,
            description: house.description,
            benefits: house.benefits,
            sales_department: house.sales_department,
        };
        let mut guard = self.lock();
        guard.houses.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_house(&self, id: HouseId) -> Result<Option<House>, StoreError> {
        let guard = self.lock();
        Ok(guard.houses.get(&id).cloned())
    }

    fn update_house(&self, house: House) -> Result<(), StoreError> {
        let mut guard = self.lock();
        if guard.houses.contains_key(&house.id) {
            guard.houses.insert(house.id, house);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn houses(&self) -> Result<Vec<House>, StoreError> {
        let guard = self.lock();
        let mut all: Vec<House> = guard.houses.values().cloned().collect();
        all.sort_by_key(|house| house.id);
        Ok(all)
    }

    fn insert_building(&self, building: NewBuilding) -> Result<Building, StoreError> {
        let record = Building {
            id: BuildingId(self.next_id()),
            number: building.number,
            house: building.house,
        };
        let mut guard = self.lock();
        guard.buildings.insert(record.id, record);
        Ok(record)
    }

    fn fetch_building(&self, id: BuildingId) -> Result<Option<Building>, StoreError> {
        let guard = self.lock();
        Ok(guard.buildings.get(&id).copied())
    }

    fn insert_section(&self, section: NewSection) -> Result<Section, StoreError> {
        let record = Section {
            id: SectionId(self.next_id()),
            number: section.number,
            building: section.building,
        };
        let mut guard = self.lock();
        guard.sections.insert(record.id, record);
        Ok(record)
    }

    fn fetch_section(&self, id: SectionId) -> Result<Option<Section>, StoreError> {
        let guard = self.lock();
        Ok(guard.sections.get(&id).copied())
    }

    fn insert_floor(&self, floor: NewFloor) -> Result<Floor, StoreError> {
        let record = Floor {
            id: FloorId(self.next_id()),
            number: floor.number,
            section: floor.section,
        };
        let mut guard = self.lock();
        guard.floors.insert(record.id, record);
        Ok(record)
    }

    fn fetch_floor(&self, id: FloorId) -> Result<Option<Floor>, StoreError> {
        let guard = self.lock();
        Ok(guard.floors.get(&id).copied())
    }

    fn insert_flat(&self, flat: NewFlat) -> Result<Flat, StoreError> {
        let record = Flat {
            id: FlatId(self.next_id()),
            number: flat.number,
            area_m2: flat.area_m2,
            kitchen_area_m2: flat.kitchen_area_m2,
            price_per_metre: flat.price_per_metre,
            price: flat.price,
            rooms: flat.rooms,
            state: flat.state,
            balcony: flat.balcony,
            floor: flat.floor,
            booked: false,
            owned: false,
            client: None,
        };
        let mut guard = self.lock();
        guard.flats.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_flat(&self, id: FlatId) -> Result<Option<Flat>, StoreError> {
        let guard = self.lock();
        Ok(guard.flats.get(&id).cloned())
    }

    fn update_flat(&self, flat: Flat) -> Result<(), StoreError> {
        let mut guard = self.lock();
        if guard.flats.contains_key(&flat.id) {
            guard.flats.insert(flat.id, flat);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn house_of_flat(&self, id: FlatId) -> Result<Option<House>, StoreError> {
        let guard = self.lock();
        let house = guard
            .flats
            .get(&id)
            .and_then(|flat| guard.floors.get(&flat.floor))
            .and_then(|floor| guard.sections.get(&floor.section))
            .and_then(|section| guard.buildings.get(&section.building))
            .and_then(|building| guard.houses.get(&building.house))
            .cloned();
        Ok(house)
    }

    fn claim_flat(&self, id: FlatId, client: UserId) -> Result<Flat, StoreError> {
        let mut guard = self.lock();
        let flat = guard.flats.get_mut(&id).ok_or(StoreError::NotFound)?;
        if flat.client.is_some() {
            return Err(StoreError::Conflict);
        }
        flat.client = Some(client);
        flat.booked = true;
        Ok(flat.clone())
    }

    fn release_flat(&self, id: FlatId) -> Result<Flat, StoreError> {
        let mut guard = self.lock();
        let flat = guard.flats.get_mut(&id).ok_or(StoreError::NotFound)?;
        flat.client = None;
        flat.booked = false;
        flat.owned = false;
        Ok(flat.clone())
    }
}

impl BookingRepository for MemoryStore {
    fn insert_request(&self, request: NewBookingRequest) -> Result<BookingRequest, StoreError> {
        let record = BookingRequest {
            id: RequestId(self.next_id()),
            house: request.house,
            flat: request.flat,
            approved: false,
            created: chrono::Local::now().naive_local(),
        };
        let mut guard = self.lock();
        let unresolved = guard
            .requests
            .values()
            .any(|existing| existing.flat == request.flat && !existing.approved);
        if unresolved {
            return Err(StoreError::Conflict);
        }
        guard.requests.insert(record.id, record);
        Ok(record)
    }

    fn fetch_request(&self, id: RequestId) -> Result<Option<BookingRequest>, StoreError> {
        let guard = self.lock();
        Ok(guard.requests.get(&id).copied())
    }

    fn update_request(&self, request: BookingRequest) -> Result<(), StoreError> {
        let mut guard = self.lock();
        if guard.requests.contains_key(&request.id) {
            guard.requests.insert(request.id, request);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn delete_request(&self, id: RequestId) -> Result<(), StoreError> {
        let mut guard = self.lock();
        match guard.requests.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn delete_requests_for_flat(&self, flat: FlatId) -> Result<(), StoreError> {
        let mut guard = self.lock();
        guard.requests.retain(|_, request| request.flat != flat);
        Ok(())
    }

    fn pending_request_for_flat(&self, flat: FlatId) -> Result<Option<BookingRequest>, StoreError> {
        let guard = self.lock();
        Ok(guard
            .requests
            .values()
            .find(|request| request.flat == flat && !request.approved)
            .copied())
    }

    fn pending_requests_for_house(
        &self,
        house: HouseId,
    ) -> Result<Vec<BookingRequest>, StoreError> {
        let guard = self.lock();
        let mut pending: Vec<BookingRequest> = guard
            .requests
            .values()
            .filter(|request| request.house == house && !request.approved)
            .copied()
            .collect();
        pending.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(pending)
    }
}

impl ListingRepository for MemoryStore {
    fn insert_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let record = Post {
            id: PostId(self.next_id()),
            flat: post.flat,
            house: post.house,
            owner: post.owner,
            price: post.price,
            description: post.description,
            commission: post.commission,
            contact_by: post.contact_by,
            weight: 0,
            likes: 0,
            views: 0,
            rejected: false,
            reject_reason: None,
            created: post.created,
            likers: BTreeSet::new(),
            dislikers: BTreeSet::new(),
            favorited_by: BTreeSet::new(),
        };
        let mut guard = self.lock();
        guard.posts.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_post(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let guard = self.lock();
        Ok(guard.posts.get(&id).cloned())
    }

    fn update_post(&self, post: Post) -> Result<(), StoreError> {
        let mut guard = self.lock();
        if guard.posts.contains_key(&post.id) {
            guard.posts.insert(post.id, post);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn delete_post(&self, id: PostId) -> Result<(), StoreError> {
        let mut guard = self.lock();
        if guard.posts.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        // Dependent rows go with the listing.
        guard.complaints.retain(|_, complaint| complaint.post != id);
        guard.promotions.retain(|_, promotion| promotion.post != id);
        Ok(())
    }

    fn posts_for_owner(&self, owner: UserId) -> Result<Vec<Post>, StoreError> {
        let guard = self.lock();
        let mut posts: Vec<Post> = guard
            .posts
            .values()
            .filter(|post| post.owner == owner)
            .cloned()
            .collect();
        posts.sort_by_key(|post| post.id);
        Ok(posts)
    }

    fn count_posts_for_owner(&self, owner: UserId) -> Result<u32, StoreError> {
        let guard = self.lock();
        Ok(guard.posts.values().filter(|post| post.owner == owner).count() as u32)
    }

    fn public_posts(&self) -> Result<Vec<Post>, StoreError> {
        let guard = self.lock();
        let mut posts: Vec<Post> = guard
            .posts
            .values()
            .filter(|post| !post.rejected)
            .cloned()
            .collect();
        posts.sort_by_key(|post| post.id);
        Ok(posts)
    }

    fn posts_created_on(&self, date: NaiveDate) -> Result<Vec<Post>, StoreError> {
        let guard = self.lock();
        let mut posts: Vec<Post> = guard
            .posts
            .values()
            .filter(|post| post.created.date() == date)
            .cloned()
            .collect();
        posts.sort_by_key(|post| post.id);
        Ok(posts)
    }

    fn insert_complaint(&self, complaint: NewComplaint) -> Result<Complaint, StoreError> {
        let record = Complaint {
            id: ComplaintId(self.next_id()),
            post: complaint.post,
            author: complaint.author,
            reason: complaint.reason,
        };
        let mut guard = self.lock();
        let duplicate = guard
            .complaints
            .values()
            .any(|existing| existing.post == complaint.post && existing.author == complaint.author);
        if duplicate {
            return Err(StoreError::Conflict);
        }
        guard.complaints.insert(record.id, record);
        Ok(record)
    }

    fn complaints_for_post(&self, post: PostId) -> Result<Vec<Complaint>, StoreError> {
        let guard = self.lock();
        let mut entries: Vec<Complaint> = guard
            .complaints
            .values()
            .filter(|complaint| complaint.post == post)
            .copied()
            .collect();
        entries.sort_by_key(|complaint| complaint.id);
        Ok(entries)
    }

    fn insert_filter(&self, filter: NewSavedFilter) -> Result<SavedFilter, StoreError> {
        let record = SavedFilter {
            id: FilterId(self.next_id()),
            owner: filter.owner,
            name: filter.name,
            market: filter.market,
            rooms: filter.rooms,
            price_min: filter.price_min,
            price_max: filter.price_max,
            area_min: filter.area_min,
            area_max: filter.area_max,
            state: filter.state,
        };
        let mut guard = self.lock();
        guard.filters.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_filter(&self, id: FilterId) -> Result<Option<SavedFilter>, StoreError> {
        let guard = self.lock();
        Ok(guard.filters.get(&id).cloned())
    }

    fn delete_filter(&self, id: FilterId) -> Result<(), StoreError> {
        let mut guard = self.lock();
        match guard.filters.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn filters_for_owner(&self, owner: UserId) -> Result<Vec<SavedFilter>, StoreError> {
        let guard = self.lock();
        let mut entries: Vec<SavedFilter> = guard
            .filters
            .values()
            .filter(|filter| filter.owner == owner)
            .cloned()
            .collect();
        entries.sort_by_key(|filter| filter.id);
        Ok(entries)
    }

    fn count_filters_for_owner(&self, owner: UserId) -> Result<u32, StoreError> {
        let guard = self.lock();
        Ok(guard
            .filters
            .values()
            .filter(|filter| filter.owner == owner)
            .count() as u32)
    }

    fn all_filters(&self) -> Result<Vec<SavedFilter>, StoreError> {
        let guard = self.lock();
        let mut entries: Vec<SavedFilter> = guard.filters.values().cloned().collect();
        entries.sort_by_key(|filter| filter.id);
        Ok(entries)
    }
}

impl PromotionRepository for MemoryStore {
    fn insert_promotion_type(&self, kind: NewPromotionType) -> Result<PromotionType, StoreError> {
        let record = PromotionType::new(
            PromotionTypeId(self.next_id()),
            kind.label,
            kind.price,
            kind.efficiency,
        );
        let mut guard = self.lock();
        guard.promotion_types.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_promotion_type(
        &self,
        id: PromotionTypeId,
    ) -> Result<Option<PromotionType>, StoreError> {
        let guard = self.lock();
        Ok(guard.promotion_types.get(&id).cloned())
    }

    fn promotion_types(&self) -> Result<Vec<PromotionType>, StoreError> {
        let guard = self.lock();
        let mut all: Vec<PromotionType> = guard.promotion_types.values().cloned().collect();
        all.sort_by_key(|kind| kind.id);
        Ok(all)
    }

    fn insert_promotion(&self, promotion: NewPromotion) -> Result<Promotion, StoreError> {
        let record = Promotion {
            id: PromotionId(self.next_id()),
            post: promotion.post,
            kind: promotion.kind,
            phrase: promotion.phrase,
            color: promotion.color,
            price: promotion.price,
            paid: promotion.paid,
            end_date: promotion.end_date,
        };
        let mut guard = self.lock();
        let taken = guard
            .promotions
            .values()
            .any(|existing| existing.post == promotion.post);
        if taken {
            return Err(StoreError::Conflict);
        }
        guard.promotions.insert(record.id, record.clone());
        Ok(record)
    }

    fn fetch_promotion(&self, id: PromotionId) -> Result<Option<Promotion>, StoreError> {
        let guard = self.lock();
        Ok(guard.promotions.get(&id).cloned())
    }

    fn promotion_for_post(&self, post: PostId) -> Result<Option<Promotion>, StoreError> {
        let guard = self.lock();
        Ok(guard
            .promotions
            .values()
            .find(|promotion| promotion.post == post)
            .cloned())
    }

    fn update_promotion(&self, promotion: Promotion) -> Result<(), StoreError> {
        let mut guard = self.lock();
        if guard.promotions.contains_key(&promotion.id) {
            guard.promotions.insert(promotion.id, promotion);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn delete_promotion(&self, id: PromotionId) -> Result<(), StoreError> {
        let mut guard = self.lock();
        match guard.promotions.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }

    fn promotions_expiring_on(&self, date: NaiveDate) -> Result<Vec<Promotion>, StoreError> {
        let guard = self.lock();
        let mut due: Vec<Promotion> = guard
            .promotions
            .values()
            .filter(|promotion| promotion.end_date == date)
            .cloned()
            .collect();
        due.sort_by_key(|promotion| promotion.id);
        Ok(due)
    }
}

impl MessageRepository for MemoryStore {
    fn insert_message(&self, message: NewMessage) -> Result<Message, StoreError> {
        let record = Message {
            id: MessageId(self.next_id()),
            sender: message.sender,
            receiver: message.receiver,
            text: message.text,
            created: chrono::Local::now().naive_local(),
        };
        let mut guard = self.lock();
        guard.messages.insert(record.id, record.clone());
        Ok(record)
    }

    fn inbox(&self, receiver: UserId) -> Result<Vec<Message>, StoreError> {
        let guard = self.lock();
        let mut mail: Vec<Message> = guard
            .messages
            .values()
            .filter(|message| message.receiver == receiver)
            .cloned()
            .collect();
        mail.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(mail)
    }

    fn conversation(&self, a: UserId, b: UserId) -> Result<Vec<Message>, StoreError> {
        let guard = self.lock();
        let mut thread: Vec<Message> = guard
            .messages
            .values()
            .filter(|message| {
                (message.sender == Some(a) && message.receiver == b)
                    || (message.sender == Some(b) && message.receiver == a)
            })
            .cloned()
            .collect();
        thread.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        Ok(thread)
    }
}
