//! Cart-wise discount: a percentage off the whole subtotal once it reaches the threshold.

use crate::{
    cart::Cart,
    coupons::CartWiseDetail,
    engine::{Allocation, DiscountError, DiscountRule, percent_of, subtotal},
};

impl DiscountRule for CartWiseDetail {
    fn applies(&self, cart: &Cart) -> Result<bool, DiscountError> {
        Ok(subtotal(cart)? >= self.threshold)
    }

    fn allocate(&self, cart: &Cart) -> Result<Allocation, DiscountError> {
        // The discount belongs to the cart, not to any single line.
        let mut allocation = Allocation::zero(cart.len());

        allocation.cart_level = percent_of(self.discount_percent, subtotal(cart)?)?;

        Ok(allocation)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{coupons::CouponDetails, engine};

    use super::*;

    fn coupon(threshold: i64, percent: i64) -> CouponDetails {
        CouponDetails::CartWise(CartWiseDetail {
            threshold: Decimal::from(threshold),
            discount_percent: Decimal::from(percent),
        })
    }

    #[test]
    fn applies_at_or_above_threshold() -> TestResult {
        let at = Cart::new([("A", 2, Decimal::from(50))])?;
        let below = Cart::new([("A", 1, Decimal::new(9999, 2))])?;

        assert!(engine::is_applicable(&at, &coupon(100, 10))?);
        assert!(!engine::is_applicable(&below, &coupon(100, 10))?);

        Ok(())
    }

    #[test]
    fn below_threshold_is_never_applicable() -> TestResult {
        let details = coupon(100, 10);

        for quantity in 1..=19 {
            let cart = Cart::new([("A", quantity, Decimal::from(5))])?;

            assert_eq!(
                engine::evaluate(&cart, &details)?,
                None,
                "subtotal {} is below the threshold",
                quantity * 5
            );
        }

        Ok(())
    }

    #[test]
    fn discount_is_percentage_of_subtotal() -> TestResult {
        let cart = Cart::new([("A", 1, Decimal::from(100)), ("B", 1, Decimal::from(50))])?;

        assert_eq!(
            engine::evaluate(&cart, &coupon(100, 10))?,
            Some(Decimal::from(15))
        );

        Ok(())
    }

    #[test]
    fn discount_is_not_attributed_to_lines() -> TestResult {
        let cart = Cart::new([("A", 1, Decimal::from(100)), ("B", 1, Decimal::from(50))])?;

        let updated = engine::apply_to_cart(&cart, &coupon(100, 10))?;

        assert!(updated.items.iter().all(|line| line.discount.is_zero()));
        assert_eq!(updated.total_discount, Decimal::from(15));
        assert_eq!(updated.final_price, Decimal::from(135));

        Ok(())
    }

    #[test]
    fn zero_threshold_applies_to_an_empty_cart() -> TestResult {
        let cart = Cart::default();

        assert_eq!(
            engine::evaluate(&cart, &coupon(0, 10))?,
            Some(Decimal::ZERO)
        );

        Ok(())
    }
}
