//! Applicable Coupons Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rebate::cart::Cart;
use rebate_app::domain::coupons::records::ApplicableCoupon;

use crate::{
    coupons::{
        errors::{into_status_error, request_status_error},
        requests::{CartBody, to_f64},
    },
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplicableCouponResponse {
    pub coupon_id: Uuid,

    #[serde(rename = "type")]
    pub kind: String,

    /// Discount the coupon would take off the cart
    pub discount: f64,
}

impl From<ApplicableCoupon> for ApplicableCouponResponse {
    fn from(coupon: ApplicableCoupon) -> Self {
        Self {
            coupon_id: coupon.uuid.into(),
            kind: coupon.kind.to_string(),
            discount: to_f64(coupon.discount),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplicableCouponsResponse {
    pub applicable_coupons: Vec<ApplicableCouponResponse>,
}

/// Applicable Coupons Handler
///
/// Returns every coupon that applies to the cart with the discount it would give.
#[endpoint(
    tags("coupons"),
    summary = "Applicable Coupons",
    responses(
        (status_code = StatusCode::OK, description = "Applicable coupons"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Discount could not be calculated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartBody>,
    depot: &mut Depot,
) -> Result<Json<ApplicableCouponsResponse>, StatusError> {
    let cart = Cart::try_from(json.into_inner()).map_err(request_status_error)?;

    let applicable = depot
        .coupons_or_500()?
        .applicable_coupons(cart)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ApplicableCouponsResponse {
        applicable_coupons: applicable.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rebate::{coupons::CouponKind, engine::DiscountError};
    use rebate_app::domain::coupons::{
        CouponsServiceError, MockCouponsService, records::CouponUuid,
    };
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::test_helpers::coupons_service;

    use super::*;

    fn make_service(coupons: MockCouponsService) -> Service {
        coupons_service(coupons, Router::with_path("applicable-coupons").post(handler))
    }

    fn cart_json() -> Value {
        json!({
            "cart": { "items": [
                { "product_id": "A", "quantity": 7, "price": 5 },
                { "product_id": "B", "quantity": 2, "price": 4 },
            ] },
        })
    }

    #[tokio::test]
    async fn test_applicable_returns_discounts() -> TestResult {
        let cart_wise = CouponUuid::new();
        let bxgy = CouponUuid::new();

        let expected_cart = Cart::new([
            ("A", 7, Decimal::from(5)),
            ("B", 2, Decimal::from(4)),
        ])?;

        let mut coupons = MockCouponsService::new();

        coupons
            .expect_applicable_coupons()
            .once()
            .withf(move |cart| *cart == expected_cart)
            .return_once(move |_| {
                Ok(vec![
                    ApplicableCoupon {
                        uuid: cart_wise,
                        kind: CouponKind::CartWise,
                        discount: Decimal::new(43, 1),
                    },
                    ApplicableCoupon {
                        uuid: bxgy,
                        kind: CouponKind::BxGy,
                        discount: Decimal::from(12),
                    },
                ])
            });

        coupons.expect_create_coupon().never();
        coupons.expect_list_coupons().never();
        coupons.expect_get_coupon().never();
        coupons.expect_apply_coupon().never();
        coupons.expect_delete_coupon().never();

        let mut res = TestClient::post("http://example.com/applicable-coupons")
            .json(&cart_json())
            .send(&make_service(coupons))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(
            body,
            json!({
                "applicable_coupons": [
                    { "coupon_id": cart_wise.into_uuid(), "type": "cart-wise", "discount": 4.3 },
                    { "coupon_id": bxgy.into_uuid(), "type": "bxgy", "discount": 12.0 },
                ],
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_applicable_invalid_cart_returns_400() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons.expect_applicable_coupons().never();
        coupons.expect_create_coupon().never();
        coupons.expect_list_coupons().never();
        coupons.expect_get_coupon().never();
        coupons.expect_apply_coupon().never();
        coupons.expect_delete_coupon().never();

        let res = TestClient::post("http://example.com/applicable-coupons")
            .json(&json!({
                "cart": { "items": [{ "product_id": "A", "quantity": 1, "price": -5 }] },
            }))
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_applicable_overflow_returns_422() -> TestResult {
        let mut coupons = MockCouponsService::new();

        coupons
            .expect_applicable_coupons()
            .once()
            .return_once(|_| Err(CouponsServiceError::Discount(DiscountError::Overflow)));

        coupons.expect_create_coupon().never();
        coupons.expect_list_coupons().never();
        coupons.expect_get_coupon().never();
        coupons.expect_apply_coupon().never();
        coupons.expect_delete_coupon().never();

        let res = TestClient::post("http://example.com/applicable-coupons")
            .json(&cart_json())
            .send(&make_service(coupons))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
