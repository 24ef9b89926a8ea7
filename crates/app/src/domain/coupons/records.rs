//! Coupon Records

use jiff::Timestamp;
use rebate::coupons::{CouponDetails, CouponKind};
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Coupon Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRecord {
    pub uuid: CouponUuid,
    pub is_active: bool,
    pub details: CouponDetails,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CouponRecord {
    #[must_use]
    pub const fn kind(&self) -> CouponKind {
        self.details.kind()
    }
}

/// A coupon that applies to a cart, with the discount it would take off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicableCoupon {
    pub uuid: CouponUuid,
    pub kind: CouponKind,
    pub discount: Decimal,
}
