use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::marketplace::listings::domain::PostId;

/// Identifier wrapper for promotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PromotionId(pub u64);

impl std::fmt::Display for PromotionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for catalog promotion types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PromotionTypeId(pub u64);

/// Marketing phrase printed on a promoted listing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoPhrase {
    GiftOnPurchase,
    BargainPossible,
    BySea,
    QuietDistrict,
    LuckyPrice,
    BigFamily,
    FamilyNest,
    SeparateParking,
}

impl PromoPhrase {
    pub const fn label(self) -> &'static str {
        match self {
            PromoPhrase::GiftOnPurchase => "gift on purchase",
            PromoPhrase::BargainPossible => "bargain possible",
            PromoPhrase::BySea => "flat by the sea",
            PromoPhrase::QuietDistrict => "quiet district",
            PromoPhrase::LuckyPrice => "lucky price",
            PromoPhrase::BigFamily => "for a big family",
            PromoPhrase::FamilyNest => "family nest",
            PromoPhrase::SeparateParking => "separate parking",
        }
    }
}

/// Highlight color for a promoted listing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoColor {
    Pink,
    Green,
}

impl PromoColor {
    pub const fn label(self) -> &'static str {
        match self {
            PromoColor::Pink => "pink",
            PromoColor::Green => "green",
        }
    }
}

/// A purchasable boost tier: `efficiency` is the ranking-weight bonus a
/// paid promotion of this type grants, held to 1..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionType {
    pub id: PromotionTypeId,
    pub label: String,
    pub price: f64,
    pub efficiency: i32,
}

impl PromotionType {
    pub fn new(id: PromotionTypeId, label: String, price: f64, efficiency: i32) -> Self {
        Self {
            id,
            label,
            price,
            efficiency: efficiency.clamp(1, 100),
        }
    }
}

/// Catalog entry payload; the store assigns the id and clamps
/// efficiency on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPromotionType {
    pub label: String,
    pub price: f64,
    pub efficiency: i32,
}

/// A listing's active boost. One per post; `price` is computed at
/// purchase time from the type plus add-on fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub post: PostId,
    pub kind: PromotionTypeId,
    pub phrase: Option<PromoPhrase>,
    pub color: Option<PromoColor>,
    pub price: f64,
    pub paid: bool,
    pub end_date: NaiveDate,
}

/// What a listing owner asks for when promoting a post.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionOrder {
    pub kind: PromotionTypeId,
    pub phrase: Option<PromoPhrase>,
    pub color: Option<PromoColor>,
    pub paid: bool,
    pub end_date: NaiveDate,
}

/// Fully priced promotion ready for insertion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewPromotion {
    pub post: PostId,
    pub kind: PromotionTypeId,
    pub phrase: Option<PromoPhrase>,
    pub color: Option<PromoColor>,
    pub price: f64,
    pub paid: bool,
    pub end_date: NaiveDate,
}
