//! Rebate prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    coupons::{
        BxGyDetail, CartWiseDetail, CouponDetails, CouponError, CouponKind, ProductQuantities,
        ProductQuantity, ProductWiseDetail, UnsupportedCouponType,
    },
    engine::{
        DiscountError, LineDiscount, UpdatedCart, apply_to_cart,
        bxgy::{Triggers, trigger_count},
        compute_discount, evaluate, is_applicable,
    },
};
