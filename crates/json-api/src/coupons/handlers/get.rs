//! Get Coupon Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rebate_app::domain::coupons::records::CouponRecord;

use crate::{
    coupons::{errors::into_status_error, requests::CouponDetailsBody},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    /// The unique identifier of the coupon
    pub id: Uuid,

    /// The coupon type
    #[serde(rename = "type")]
    pub kind: String,

    /// Whether the coupon is active
    pub is_active: bool,

    /// The date and time the coupon was created
    pub created_at: String,

    /// The date and time the coupon was last updated
    pub updated_at: String,

    /// Type-specific coupon details
    pub details: CouponDetailsBody,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        CouponResponse {
            id: coupon.uuid.into(),
            kind: coupon.kind().to_string(),
            is_active: coupon.is_active,
            created_at: coupon.created_at.to_string(),
            updated_at: coupon.updated_at.to_string(),
            details: coupon.details.into(),
        }
    }
}

/// Get Coupon Handler
///
/// Returns a coupon with its details.
#[endpoint(
    tags("coupons"),
    summary = "Get Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon found"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CouponResponse>, StatusError> {
    let coupon = depot
        .coupons_or_500()?
        .get_coupon(coupon.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupon.into()))
}
