//! Updated cart

use rust_decimal::Decimal;

use crate::{
    cart::Cart,
    engine::{Allocation, DiscountError, subtotal},
};

/// A cart line together with the discount attributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiscount {
    /// Product id of the line.
    pub product_id: String,

    /// Quantity of the line.
    pub quantity: u32,

    /// Unit price of the line.
    pub unit_price: Decimal,

    /// Discount attributed to this line.
    pub discount: Decimal,
}

/// The result of applying a coupon to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedCart {
    /// Lines in cart order.
    pub items: Vec<LineDiscount>,

    /// Cart subtotal before discounts.
    pub total_price: Decimal,

    /// Every line discount plus any cart-level discount.
    pub total_discount: Decimal,

    /// `total_price - total_discount`.
    pub final_price: Decimal,
}

impl UpdatedCart {
    pub(crate) fn from_allocation(
        cart: &Cart,
        allocation: &Allocation,
    ) -> Result<Self, DiscountError> {
        let items = cart
            .iter()
            .zip(
                allocation
                    .lines
                    .iter()
                    .copied()
                    .chain(std::iter::repeat(Decimal::ZERO)),
            )
            .map(|(item, discount)| LineDiscount {
                product_id: item.product_id().to_string(),
                quantity: item.quantity(),
                unit_price: item.unit_price(),
                discount,
            })
            .collect();

        let total_price = subtotal(cart)?;
        let total_discount = allocation.total()?;
        let final_price = total_price
            .checked_sub(total_discount)
            .ok_or(DiscountError::Overflow)?;

        Ok(Self {
            items,
            total_price,
            total_discount,
            final_price,
        })
    }
}
