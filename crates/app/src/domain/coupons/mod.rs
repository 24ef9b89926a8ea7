//! Coupons

mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::CouponsServiceError;
pub use service::*;
