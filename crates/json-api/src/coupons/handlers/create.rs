//! Create Coupon Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rebate::coupons::CouponDetails;

use crate::{
    coupons::{
        errors::{into_status_error, request_status_error},
        requests::CreateCouponRequest,
    },
    extensions::*,
};

/// Coupon Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponCreatedResponse {
    /// Created coupon UUID
    pub id: Uuid,
}

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::CONFLICT, description = "Coupon already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponCreatedResponse>, StatusError> {
    let details = CouponDetails::try_from(json.into_inner()).map_err(request_status_error)?;

    let uuid = depot
        .coupons_or_500()?
        .create_coupon(details)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/coupons/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CouponCreatedResponse { id: uuid.into() }))
}
