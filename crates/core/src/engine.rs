//! Discount Engine
//!
//! Pure functions over a [`Cart`] and a coupon's [`CouponDetails`]: whether the coupon applies,
//! how much it takes off, and how that discount is spread over the cart's lines.
//!
//! Every coupon kind is evaluated the same way. A kind decides whether it applies to the cart
//! and produces an [`Allocation`] of its discount; the aggregate discount reported by
//! [`evaluate`] is the allocation's total, so [`apply_to_cart`] always agrees with it.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{cart::Cart, coupons::CouponDetails};

pub mod bxgy;
mod cart_wise;
mod product_wise;
mod updated_cart;

pub use updated_cart::{LineDiscount, UpdatedCart};

/// Errors raised by discount calculations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Decimal arithmetic exceeded the representable range.
    #[error("discount arithmetic overflowed")]
    Overflow,
}

/// How a coupon's discount is spread over a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Allocation {
    /// Discount attributed to each cart line, in cart order.
    pub(crate) lines: Vec<Decimal>,

    /// Discount attributed to the cart as a whole rather than to a line.
    pub(crate) cart_level: Decimal,
}

impl Allocation {
    pub(crate) fn zero(lines: usize) -> Self {
        Self {
            lines: vec![Decimal::ZERO; lines],
            cart_level: Decimal::ZERO,
        }
    }

    pub(crate) fn total(&self) -> Result<Decimal, DiscountError> {
        self.lines
            .iter()
            .try_fold(self.cart_level, |acc, line| checked_add(acc, *line))
    }
}

/// A coupon kind's discount rule.
pub(crate) trait DiscountRule {
    /// Whether the rule applies to the cart at all.
    fn applies(&self, cart: &Cart) -> Result<bool, DiscountError>;

    /// Spread the rule's discount over the cart, assuming it applies.
    fn allocate(&self, cart: &Cart) -> Result<Allocation, DiscountError>;
}

fn rule(details: &CouponDetails) -> &dyn DiscountRule {
    match details {
        CouponDetails::CartWise(detail) => detail,
        CouponDetails::ProductWise(detail) => detail,
        CouponDetails::BxGy(detail) => detail,
    }
}

/// Whether the coupon applies to the cart.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] when cart totals cannot be represented.
pub fn is_applicable(cart: &Cart, details: &CouponDetails) -> Result<bool, DiscountError> {
    rule(details).applies(cart)
}

/// Discount the coupon would take off the cart; zero when it does not apply.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] when the discount cannot be represented.
pub fn compute_discount(cart: &Cart, details: &CouponDetails) -> Result<Decimal, DiscountError> {
    Ok(evaluate(cart, details)?.unwrap_or(Decimal::ZERO))
}

/// The coupon's discount for the cart, or `None` when it does not apply.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] when the discount cannot be represented.
pub fn evaluate(cart: &Cart, details: &CouponDetails) -> Result<Option<Decimal>, DiscountError> {
    let rule = rule(details);

    if !rule.applies(cart)? {
        return Ok(None);
    }

    rule.allocate(cart)?.total().map(Some)
}

/// Apply the coupon to the cart, producing a per-line discount breakdown and totals.
///
/// A coupon that does not apply yields an unchanged cart with zero discounts.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] when totals cannot be represented.
pub fn apply_to_cart(cart: &Cart, details: &CouponDetails) -> Result<UpdatedCart, DiscountError> {
    let rule = rule(details);

    let allocation = if rule.applies(cart)? {
        rule.allocate(cart)?
    } else {
        Allocation::zero(cart.len())
    };

    UpdatedCart::from_allocation(cart, &allocation)
}

/// `percent` percent of `amount`.
pub(crate) fn percent_of(percent: Decimal, amount: Decimal) -> Result<Decimal, DiscountError> {
    amount
        .checked_mul(percent)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(DiscountError::Overflow)
}

pub(crate) fn checked_add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, DiscountError> {
    lhs.checked_add(rhs).ok_or(DiscountError::Overflow)
}

pub(crate) fn checked_mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal, DiscountError> {
    lhs.checked_mul(rhs).ok_or(DiscountError::Overflow)
}

pub(crate) fn subtotal(cart: &Cart) -> Result<Decimal, DiscountError> {
    cart.subtotal().ok_or(DiscountError::Overflow)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::coupons::{BxGyDetail, CartWiseDetail, ProductQuantity, ProductWiseDetail};

    use super::*;

    fn cart() -> Result<Cart, crate::cart::CartError> {
        Cart::new([
            ("A", 7, Decimal::from(5)),
            ("B", 2, Decimal::from(4)),
            ("C", 1, Decimal::new(1250, 2)),
        ])
    }

    fn all_kinds() -> [CouponDetails; 3] {
        [
            CouponDetails::CartWise(CartWiseDetail {
                threshold: Decimal::from(20),
                discount_percent: Decimal::new(125, 1),
            }),
            CouponDetails::ProductWise(ProductWiseDetail {
                product_id: "C".to_string(),
                discount_percent: Decimal::from(30),
            }),
            CouponDetails::BxGy(BxGyDetail {
                repetition_limit: 2,
                buy_products: smallvec![ProductQuantity::new("A", 2)],
                get_products: smallvec![ProductQuantity::new("B", 1)],
            }),
        ]
    }

    #[test]
    fn apply_to_cart_agrees_with_evaluate_for_every_kind() -> TestResult {
        let cart = cart()?;

        for details in all_kinds() {
            let expected = compute_discount(&cart, &details)?;
            let updated = apply_to_cart(&cart, &details)?;

            assert_eq!(
                updated.total_discount, expected,
                "aggregate mismatch for {:?}",
                details.kind()
            );
        }

        Ok(())
    }

    #[test]
    fn final_price_is_total_minus_discount() -> TestResult {
        let cart = cart()?;

        for details in all_kinds() {
            let updated = apply_to_cart(&cart, &details)?;

            assert_eq!(
                updated.final_price,
                updated.total_price - updated.total_discount,
                "final price mismatch for {:?}",
                details.kind()
            );
            assert!(updated.total_discount >= Decimal::ZERO);
        }

        Ok(())
    }

    #[test]
    fn inapplicable_coupon_leaves_cart_untouched() -> TestResult {
        let cart = cart()?;

        let details = CouponDetails::CartWise(CartWiseDetail {
            threshold: Decimal::from(1_000),
            discount_percent: Decimal::TEN,
        });

        let updated = apply_to_cart(&cart, &details)?;

        assert_eq!(evaluate(&cart, &details)?, None);
        assert!(!is_applicable(&cart, &details)?);
        assert_eq!(updated.total_discount, Decimal::ZERO);
        assert_eq!(updated.final_price, updated.total_price);

        Ok(())
    }

    #[test]
    fn percent_of_scales_by_one_hundred() -> TestResult {
        assert_eq!(
            percent_of(Decimal::TEN, Decimal::from(150))?,
            Decimal::from(15)
        );

        Ok(())
    }

    #[test]
    fn percent_of_reports_overflow() {
        assert_eq!(
            percent_of(Decimal::ONE_HUNDRED, Decimal::MAX),
            Err(DiscountError::Overflow)
        );
    }
}
