//! Coupons service errors.

use rebate::{
    coupons::{CouponError, CouponKind, UnsupportedCouponType},
    engine::DiscountError,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::coupons::records::CouponUuid;

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error("coupon already exists")]
    AlreadyExists,

    #[error("coupon not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid coupon details")]
    Validation(#[from] CouponError),

    #[error("unsupported coupon type: {0}")]
    UnsupportedCouponType(String),

    #[error("coupon {coupon} is missing its {kind} details")]
    CouponDataInconsistency { coupon: CouponUuid, kind: CouponKind },

    #[error("failed to calculate discount")]
    Discount(#[from] DiscountError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<UnsupportedCouponType> for CouponsServiceError {
    fn from(error: UnsupportedCouponType) -> Self {
        Self::UnsupportedCouponType(error.0)
    }
}

impl From<Error> for CouponsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = CouponsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, CouponsServiceError::NotFound),
            "unexpected {error:?}"
        );
    }

    #[test]
    fn unsupported_type_keeps_the_name() {
        let error = CouponsServiceError::from(UnsupportedCouponType("percentage-off".to_string()));

        assert_eq!(error.to_string(), "unsupported coupon type: percentage-off");
    }

    #[test]
    fn other_sqlx_errors_are_storage_errors() {
        let error = CouponsServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, CouponsServiceError::Sql(Error::PoolTimedOut)),
            "unexpected {error:?}"
        );
    }
}
