//! Buy X, Get Y
//!
//! Buying the required quantity of a buy product triggers the promotion once; every trigger
//! grants the get products' quantities free. Triggers are counted across all buy-product lines
//! of the cart and capped at the coupon's repetition limit.
//!
//! Only get products already in the cart are discounted, at their line price. The discount is
//! not capped by the quantity of the get product actually in the cart.

use rust_decimal::Decimal;

use crate::{
    cart::Cart,
    coupons::BxGyDetail,
    engine::{Allocation, DiscountError, DiscountRule, checked_add, checked_mul},
};

/// How often a BxGy promotion triggers for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triggers {
    /// Sum of `floor(line quantity / required quantity)` over every buy-product line.
    pub raw: u64,

    /// `raw` capped at the repetition limit.
    pub effective: u64,
}

/// Count how often the promotion triggers for the cart.
pub fn trigger_count(detail: &BxGyDetail, cart: &Cart) -> Triggers {
    let raw = detail
        .buy_products
        .iter()
        .filter(|buy| buy.quantity > 0)
        .flat_map(|buy| {
            cart.lines_for(&buy.product_id)
                .map(move |item| u64::from(item.quantity() / buy.quantity))
        })
        .fold(0_u64, u64::saturating_add);

    Triggers {
        raw,
        effective: raw.min(u64::from(detail.repetition_limit)),
    }
}

impl DiscountRule for BxGyDetail {
    fn applies(&self, cart: &Cart) -> Result<bool, DiscountError> {
        Ok(trigger_count(self, cart).raw > 0)
    }

    fn allocate(&self, cart: &Cart) -> Result<Allocation, DiscountError> {
        let effective = Decimal::from(trigger_count(self, cart).effective);

        let lines = cart
            .iter()
            .map(|item| {
                self.get_products
                    .iter()
                    .filter(|get| get.product_id == item.product_id())
                    .try_fold(Decimal::ZERO, |acc, get| {
                        let granted = checked_mul(Decimal::from(get.quantity), effective)?;

                        checked_add(acc, checked_mul(granted, item.unit_price())?)
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Allocation {
            lines,
            cart_level: Decimal::ZERO,
        })
    }
}
