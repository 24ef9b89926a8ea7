//! Rebate
//!
//! Rebate is a coupon engine: it describes cart-wise, product-wise and buy-x-get-y coupons and
//! calculates the discount each of them takes off a cart.

pub mod cart;
pub mod coupons;
pub mod engine;
pub mod prelude;
