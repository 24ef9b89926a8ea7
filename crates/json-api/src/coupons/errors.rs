//! Coupon Errors

use salvo::http::StatusError;
use tracing::error;

use rebate_app::domain::coupons::CouponsServiceError;

use crate::coupons::requests::RequestError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Coupon already exists")
        }
        CouponsServiceError::InvalidReference
        | CouponsServiceError::MissingRequiredData
        | CouponsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid coupon payload")
        }
        CouponsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CouponsServiceError::UnsupportedCouponType(kind) => {
            StatusError::bad_request().brief(format!("Unsupported coupon type: {kind}"))
        }
        CouponsServiceError::NotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::Discount(source) => {
            error!("failed to calculate discount: {source}");

            StatusError::unprocessable_entity().brief(source.to_string())
        }
        error @ CouponsServiceError::CouponDataInconsistency { .. } => {
            error!("{error}");

            StatusError::internal_server_error()
        }
        CouponsServiceError::Sql(source) => {
            error!("coupon storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn request_status_error(error: RequestError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}
