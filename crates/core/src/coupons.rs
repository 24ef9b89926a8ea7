//! Coupons
//!
//! Coupon definitions: the closed set of coupon kinds and the detail payload each kind carries.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

/// Returned when a coupon type name is outside the supported set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported coupon type: {0}")]
pub struct UnsupportedCouponType(pub String);

/// Validation failures for coupon definitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CouponError {
    /// Cart-wise threshold below zero.
    #[error("threshold must not be negative")]
    NegativeThreshold,

    /// Discount percentage outside `0..=100`.
    #[error("discount must be between 0 and 100 percent")]
    DiscountOutOfRange,

    /// A product id was blank.
    #[error("product id must not be empty")]
    EmptyProductId,

    /// BxGy repetition limit of zero.
    #[error("repetition limit must be at least 1")]
    ZeroRepetitionLimit,

    /// BxGy coupon without buy products.
    #[error("at least one buy product is required")]
    NoBuyProducts,

    /// BxGy coupon without get products.
    #[error("at least one get product is required")]
    NoGetProducts,

    /// A buy or get line with a quantity of zero.
    #[error("product quantities must be at least 1")]
    ZeroQuantity,
}

/// Coupon kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouponKind {
    /// Percentage off the whole cart once a threshold is met.
    CartWise,

    /// Percentage off the lines of one product.
    ProductWise,

    /// Buy X, get Y.
    BxGy,
}

impl CouponKind {
    /// Wire and storage name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CartWise => "cart-wise",
            Self::ProductWise => "product-wise",
            Self::BxGy => "bxgy",
        }
    }
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouponKind {
    type Err = UnsupportedCouponType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cart-wise" => Ok(Self::CartWise),
            "product-wise" => Ok(Self::ProductWise),
            "bxgy" => Ok(Self::BxGy),
            other => Err(UnsupportedCouponType(other.to_string())),
        }
    }
}

/// Cart-wise coupon details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartWiseDetail {
    /// Minimum cart subtotal for the coupon to apply.
    pub threshold: Decimal,

    /// Percentage (0-100) taken off the subtotal.
    pub discount_percent: Decimal,
}

/// Product-wise coupon details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductWiseDetail {
    /// Product the discount is restricted to.
    pub product_id: String,

    /// Percentage (0-100) taken off matching lines.
    pub discount_percent: Decimal,
}

/// A product id paired with a quantity, used for BxGy buy and get sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuantity {
    /// Product id
    pub product_id: String,

    /// Required (buy) or granted (get) quantity.
    pub quantity: u32,
}

impl ProductQuantity {
    /// Create a product quantity pair.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Product quantity lines, inline for the common one or two entry case.
pub type ProductQuantities = SmallVec<[ProductQuantity; 2]>;

/// BxGy coupon details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BxGyDetail {
    /// Maximum number of times the promotion may trigger in one cart.
    pub repetition_limit: u32,

    /// Products (and quantities) that must be bought.
    pub buy_products: ProductQuantities,

    /// Products (and quantities) granted per trigger.
    pub get_products: ProductQuantities,
}

/// The detail payload of a coupon, one variant per [`CouponKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponDetails {
    /// Cart-wise details
    CartWise(CartWiseDetail),

    /// Product-wise details
    ProductWise(ProductWiseDetail),

    /// BxGy details
    BxGy(BxGyDetail),
}

impl CouponDetails {
    /// The kind these details belong to.
    #[must_use]
    pub const fn kind(&self) -> CouponKind {
        match self {
            Self::CartWise(_) => CouponKind::CartWise,
            Self::ProductWise(_) => CouponKind::ProductWise,
            Self::BxGy(_) => CouponKind::BxGy,
        }
    }

    /// Check the definition is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns the first [`CouponError`] found.
    pub fn validate(&self) -> Result<(), CouponError> {
        match self {
            Self::CartWise(detail) => {
                if detail.threshold < Decimal::ZERO {
                    return Err(CouponError::NegativeThreshold);
                }

                validate_percent(detail.discount_percent)
            }
            Self::ProductWise(detail) => {
                validate_product_id(&detail.product_id)?;
                validate_percent(detail.discount_percent)
            }
            Self::BxGy(detail) => {
                if detail.repetition_limit == 0 {
                    return Err(CouponError::ZeroRepetitionLimit);
                }

                if detail.buy_products.is_empty() {
                    return Err(CouponError::NoBuyProducts);
                }

                if detail.get_products.is_empty() {
                    return Err(CouponError::NoGetProducts);
                }

                detail
                    .buy_products
                    .iter()
                    .chain(detail.get_products.iter())
                    .try_for_each(|line| {
                        validate_product_id(&line.product_id)?;

                        if line.quantity == 0 {
                            Err(CouponError::ZeroQuantity)
                        } else {
                            Ok(())
                        }
                    })
            }
        }
    }
}

fn validate_percent(percent: Decimal) -> Result<(), CouponError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        Err(CouponError::DiscountOutOfRange)
    } else {
        Ok(())
    }
}

fn validate_product_id(product_id: &str) -> Result<(), CouponError> {
    if product_id.trim().is_empty() {
        Err(CouponError::EmptyProductId)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn bxgy(limit: u32, buy: ProductQuantities, get: ProductQuantities) -> CouponDetails {
        CouponDetails::BxGy(BxGyDetail {
            repetition_limit: limit,
            buy_products: buy,
            get_products: get,
        })
    }

    #[test]
    fn kind_round_trips_through_its_name() -> TestResult {
        for kind in [CouponKind::CartWise, CouponKind::ProductWise, CouponKind::BxGy] {
            assert_eq!(kind.as_str().parse::<CouponKind>()?, kind);
        }

        Ok(())
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let result = "percentage-off".parse::<CouponKind>();

        assert_eq!(
            result,
            Err(UnsupportedCouponType("percentage-off".to_string()))
        );
    }

    #[test]
    fn details_report_their_kind() {
        let details = CouponDetails::ProductWise(ProductWiseDetail {
            product_id: "A".to_string(),
            discount_percent: Decimal::TEN,
        });

        assert_eq!(details.kind(), CouponKind::ProductWise);
    }

    #[test]
    fn cart_wise_rejects_negative_threshold() {
        let details = CouponDetails::CartWise(CartWiseDetail {
            threshold: Decimal::NEGATIVE_ONE,
            discount_percent: Decimal::TEN,
        });

        assert_eq!(details.validate(), Err(CouponError::NegativeThreshold));
    }

    #[test]
    fn percent_above_one_hundred_is_rejected() {
        let details = CouponDetails::CartWise(CartWiseDetail {
            threshold: Decimal::ZERO,
            discount_percent: Decimal::new(1001, 1),
        });

        assert_eq!(details.validate(), Err(CouponError::DiscountOutOfRange));
    }

    #[test]
    fn percent_bounds_are_inclusive() -> TestResult {
        for percent in [Decimal::ZERO, Decimal::ONE_HUNDRED] {
            CouponDetails::ProductWise(ProductWiseDetail {
                product_id: "A".to_string(),
                discount_percent: percent,
            })
            .validate()?;
        }

        Ok(())
    }

    #[test]
    fn bxgy_requires_positive_repetition_limit() {
        let details = bxgy(
            0,
            smallvec![ProductQuantity::new("A", 2)],
            smallvec![ProductQuantity::new("B", 1)],
        );

        assert_eq!(details.validate(), Err(CouponError::ZeroRepetitionLimit));
    }

    #[test]
    fn bxgy_requires_buy_and_get_products() {
        let no_buy = bxgy(1, smallvec![], smallvec![ProductQuantity::new("B", 1)]);
        let no_get = bxgy(1, smallvec![ProductQuantity::new("A", 1)], smallvec![]);

        assert_eq!(no_buy.validate(), Err(CouponError::NoBuyProducts));
        assert_eq!(no_get.validate(), Err(CouponError::NoGetProducts));
    }

    #[test]
    fn bxgy_rejects_zero_quantities() {
        let details = bxgy(
            1,
            smallvec![ProductQuantity::new("A", 0)],
            smallvec![ProductQuantity::new("B", 1)],
        );

        assert_eq!(details.validate(), Err(CouponError::ZeroQuantity));
    }

    #[test]
    fn bxgy_rejects_blank_product_ids() {
        let details = bxgy(
            1,
            smallvec![ProductQuantity::new("A", 1)],
            smallvec![ProductQuantity::new("", 1)],
        );

        assert_eq!(details.validate(), Err(CouponError::EmptyProductId));
    }
}
