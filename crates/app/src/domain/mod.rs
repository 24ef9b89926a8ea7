//! Rebate Domain Concerns

pub mod coupons;
