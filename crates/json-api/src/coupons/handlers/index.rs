//! Coupon Index Handler

use salvo::prelude::*;

use crate::{
    coupons::{errors::into_status_error, get::CouponResponse},
    extensions::*,
};

/// Coupon Index Handler
///
/// Returns every coupon, in creation order.
#[endpoint(tags("coupons"), summary = "List Coupons")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<CouponResponse>>, StatusError> {
    let coupons = depot
        .coupons_or_500()?
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(coupons.into_iter().map(Into::into).collect()))
}
