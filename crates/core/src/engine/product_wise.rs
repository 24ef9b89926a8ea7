//! Product-wise discount: a percentage off every line of one product.

use rust_decimal::Decimal;

use crate::{
    cart::Cart,
    coupons::ProductWiseDetail,
    engine::{Allocation, DiscountError, DiscountRule, percent_of},
};

impl DiscountRule for ProductWiseDetail {
    fn applies(&self, cart: &Cart) -> Result<bool, DiscountError> {
        Ok(cart.lines_for(&self.product_id).next().is_some())
    }

    fn allocate(&self, cart: &Cart) -> Result<Allocation, DiscountError> {
        let lines = cart
            .iter()
            .map(|item| {
                if item.product_id() != self.product_id {
                    return Ok(Decimal::ZERO);
                }

                let line_total = item.line_total().ok_or(DiscountError::Overflow)?;

                percent_of(self.discount_percent, line_total)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Allocation {
            lines,
            cart_level: Decimal::ZERO,
        })
    }
}
