use serde::{Deserialize, Serialize};

use super::domain::{PromotionOrder, PromotionType};

/// Flat add-on fees applied on top of a promotion type's base price.
/// Injected at service construction so deployments can re-dial them
/// without touching code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionPricing {
    phrase_fee: f64,
    color_fee: f64,
}

impl PromotionPricing {
    pub const DEFAULT_PHRASE_FEE: f64 = 199.0;
    pub const DEFAULT_COLOR_FEE: f64 = 99.0;

    pub fn new(phrase_fee: f64, color_fee: f64) -> Self {
        Self {
            phrase_fee,
            color_fee,
        }
    }

    pub fn phrase_fee(&self) -> f64 {
        self.phrase_fee
    }

    pub fn color_fee(&self) -> f64 {
        self.color_fee
    }

    /// Total price of an order: base price of the chosen type plus a
    /// fee per selected add-on.
    pub fn quote(&self, kind: &PromotionType, order: &PromotionOrder) -> f64 {
        let mut total = kind.price;
        if order.phrase.is_some() {
            total += self.phrase_fee;
        }
        if order.color.is_some() {
            total += self.color_fee;
        }
        total
    }
}

impl Default for PromotionPricing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PHRASE_FEE, Self::DEFAULT_COLOR_FEE)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::super::domain::{PromoColor, PromoPhrase, PromotionTypeId};
    use super::*;

    fn boost_type(price: f64) -> PromotionType {
        PromotionType::new(PromotionTypeId(1), "boost".to_string(), price, 50)
    }

    fn order(phrase: Option<PromoPhrase>, color: Option<PromoColor>) -> PromotionOrder {
        PromotionOrder {
            kind: PromotionTypeId(1),
            phrase,
            color,
            paid: false,
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date"),
        }
    }

    #[test]
    fn bare_order_costs_the_type_price() {
        let pricing = PromotionPricing::default();
        let total = pricing.quote(&boost_type(500.0), &order(None, None));
        assert_eq!(total, 500.0);
    }

    #[test]
    fn each_add_on_charges_its_fee() {
        let pricing = PromotionPricing::new(200.0, 100.0);
        let kind = boost_type(500.0);
        assert_eq!(
            pricing.quote(&kind, &order(Some(PromoPhrase::LuckyPrice), None)),
            700.0
        );
        assert_eq!(
            pricing.quote(&kind, &order(None, Some(PromoColor::Green))),
            600.0
        );
        assert_eq!(
            pricing.quote(
                &kind,
                &order(Some(PromoPhrase::BySea), Some(PromoColor::Pink))
            ),
            800.0
        );
    }

    #[test]
    fn efficiency_is_clamped_into_range() {
        let overdone = PromotionType::new(PromotionTypeId(2), "max".to_string(), 10.0, 400);
        assert_eq!(overdone.efficiency, 100);
        let underdone = PromotionType::new(PromotionTypeId(3), "min".to_string(), 10.0, 0);
        assert_eq!(underdone.efficiency, 1);
    }
}
