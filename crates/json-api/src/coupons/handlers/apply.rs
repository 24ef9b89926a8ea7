//! Apply Coupon Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rebate::{
    cart::Cart,
    engine::{LineDiscount, UpdatedCart},
};

use crate::{
    coupons::{
        errors::{into_status_error, request_status_error},
        requests::{CartBody, to_f64},
    },
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedCartItemResponse {
    pub product_id: String,
    pub quantity: u32,

    /// Unit price
    pub price: f64,

    /// Discount attributed to this line
    pub total_discount: f64,
}

impl From<LineDiscount> for UpdatedCartItemResponse {
    fn from(line: LineDiscount) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            price: to_f64(line.unit_price),
            total_discount: to_f64(line.discount),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdatedCartResponse {
    pub items: Vec<UpdatedCartItemResponse>,
    pub total_price: f64,
    pub total_discount: f64,
    pub final_price: f64,
}

impl From<UpdatedCart> for UpdatedCartResponse {
    fn from(cart: UpdatedCart) -> Self {
        Self {
            items: cart.items.into_iter().map(Into::into).collect(),
            total_price: to_f64(cart.total_price),
            total_discount: to_f64(cart.total_discount),
            final_price: to_f64(cart.final_price),
        }
    }
}

/// Apply Coupon Handler
///
/// Returns the cart with the coupon's discount applied.
#[endpoint(
    tags("coupons"),
    summary = "Apply Coupon",
    responses(
        (status_code = StatusCode::OK, description = "Coupon applied"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Discount could not be calculated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    coupon: PathParam<Uuid>,
    json: JsonBody<CartBody>,
    depot: &mut Depot,
) -> Result<Json<UpdatedCartResponse>, StatusError> {
    let cart = Cart::try_from(json.into_inner()).map_err(request_status_error)?;

    let updated = depot
        .coupons_or_500()?
        .apply_coupon(coupon.into_inner().into(), cart)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
