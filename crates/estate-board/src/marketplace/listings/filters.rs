//! Saved search filters and their matching rules.

use serde::{Deserialize, Serialize};

use crate::marketplace::accounts::domain::UserId;
use crate::marketplace::housing::domain::{Flat, FlatState, House, HouseMarket};

use super::domain::Post;

/// Identifier wrapper for saved filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FilterId(pub u64);

/// Market segment criterion; `All` matches every house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    NewBuilding,
    Secondary,
    Cottages,
    All,
}

impl Market {
    fn admits(self, market: HouseMarket) -> bool {
        match self {
            Market::All => true,
            Market::NewBuilding => market == HouseMarket::NewBuilding,
            Market::Secondary => market == HouseMarket::Secondary,
            Market::Cottages => market == HouseMarket::Cottages,
        }
    }
}

/// A stored search. Unset criteria match anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub id: FilterId,
    pub owner: UserId,
    pub name: String,
    pub market: Market,
    pub rooms: Option<u8>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub area_min: Option<f64>,
    pub area_max: Option<f64>,
    pub state: Option<FlatState>,
}

impl SavedFilter {
    /// Whether a post (with its flat and house) satisfies every
    /// criterion.
    pub fn matches(&self, post: &Post, flat: &Flat, house: &House) -> bool {
        if !self.market.admits(house.market) {
            return false;
        }
        if let Some(rooms) = self.rooms {
            if flat.rooms != rooms {
                return false;
            }
        }
        if let Some(min) = self.price_min {
            if post.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if post.price > max {
                return false;
            }
        }
        if let Some(min) = self.area_min {
            if flat.area_m2 < min {
                return false;
            }
        }
        if let Some(max) = self.area_max {
            if flat.area_m2 > max {
                return false;
            }
        }
        if let Some(state) = self.state {
            if flat.state != state {
                return false;
            }
        }
        true
    }
}

/// Payload for a filter about to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSavedFilter {
    pub owner: UserId,
    pub name: String,
    pub market: Market,
    pub rooms: Option<u8>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub area_min: Option<f64>,
    pub area_max: Option<f64>,
    pub state: Option<FlatState>,
}
