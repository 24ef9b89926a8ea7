//! Coupon and cart request bodies.
//!
//! Amounts arrive as JSON numbers and are converted to exact decimals here, before anything
//! reaches the service.

use rebate::{
    cart::{Cart, CartError},
    coupons::{
        BxGyDetail, CartWiseDetail, CouponDetails, CouponKind, ProductQuantity,
        ProductWiseDetail, UnsupportedCouponType,
    },
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum RequestError {
    #[error(transparent)]
    UnsupportedCouponType(#[from] UnsupportedCouponType),

    #[error("coupon details are missing {0}")]
    MissingField(&'static str),

    #[error("{0} is not a valid amount")]
    InvalidAmount(&'static str),

    #[error(transparent)]
    Cart(#[from] CartError),
}

pub(crate) fn to_decimal(value: f64, field: &'static str) -> Result<Decimal, RequestError> {
    Decimal::try_from(value).map_err(|_ignored| RequestError::InvalidAmount(field))
}

pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// A product id and quantity pair in a BxGy coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductQuantityBody {
    pub product_id: String,
    pub quantity: u32,
}

impl From<ProductQuantityBody> for ProductQuantity {
    fn from(body: ProductQuantityBody) -> Self {
        ProductQuantity::new(body.product_id, body.quantity)
    }
}

impl From<ProductQuantity> for ProductQuantityBody {
    fn from(line: ProductQuantity) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
        }
    }
}

/// Coupon details. Which fields are set depends on the coupon type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponDetailsBody {
    /// Cart-wise: minimum cart subtotal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Cart-wise and product-wise: percentage taken off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,

    /// Product-wise: the discounted product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// BxGy: maximum number of triggers per cart
    #[serde(
        default,
        alias = "repitition_limit",
        skip_serializing_if = "Option::is_none"
    )]
    pub repetition_limit: Option<u32>,

    /// BxGy: products that must be bought
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_products: Option<Vec<ProductQuantityBody>>,

    /// BxGy: products granted per trigger
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get_products: Option<Vec<ProductQuantityBody>>,
}

impl From<CouponDetails> for CouponDetailsBody {
    fn from(details: CouponDetails) -> Self {
        match details {
            CouponDetails::CartWise(detail) => Self {
                threshold: Some(to_f64(detail.threshold)),
                discount: Some(to_f64(detail.discount_percent)),
                ..Self::default()
            },
            CouponDetails::ProductWise(detail) => Self {
                product_id: Some(detail.product_id),
                discount: Some(to_f64(detail.discount_percent)),
                ..Self::default()
            },
            CouponDetails::BxGy(detail) => Self {
                repetition_limit: Some(detail.repetition_limit),
                buy_products: Some(detail.buy_products.into_iter().map(Into::into).collect()),
                get_products: Some(detail.get_products.into_iter().map(Into::into).collect()),
                ..Self::default()
            },
        }
    }
}

/// Create Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCouponRequest {
    /// One of `cart-wise`, `product-wise` or `bxgy`
    #[serde(rename = "type")]
    pub kind: String,

    pub details: CouponDetailsBody,
}

impl TryFrom<CreateCouponRequest> for CouponDetails {
    type Error = RequestError;

    fn try_from(request: CreateCouponRequest) -> Result<Self, Self::Error> {
        let CouponDetailsBody {
            threshold,
            discount,
            product_id,
            repetition_limit,
            buy_products,
            get_products,
        } = request.details;

        match request.kind.parse::<CouponKind>()? {
            CouponKind::CartWise => Ok(CouponDetails::CartWise(CartWiseDetail {
                threshold: to_decimal(required(threshold, "threshold")?, "threshold")?,
                discount_percent: to_decimal(required(discount, "discount")?, "discount")?,
            })),
            CouponKind::ProductWise => Ok(CouponDetails::ProductWise(ProductWiseDetail {
                product_id: required(product_id, "product_id")?,
                discount_percent: to_decimal(required(discount, "discount")?, "discount")?,
            })),
            CouponKind::BxGy => Ok(CouponDetails::BxGy(BxGyDetail {
                repetition_limit: required(repetition_limit, "repetition_limit")?,
                buy_products: required(buy_products, "buy_products")?
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                get_products: required(get_products, "get_products")?
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            })),
        }
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, RequestError> {
    value.ok_or(RequestError::MissingField(field))
}

/// A cart line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    pub product_id: String,
    pub quantity: u32,

    /// Unit price
    pub price: f64,
}

/// A cart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartRequest {
    pub items: Vec<CartItemRequest>,
}

/// Cart Request Body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartBody {
    pub cart: CartRequest,
}

impl TryFrom<CartBody> for Cart {
    type Error = RequestError;

    fn try_from(body: CartBody) -> Result<Self, Self::Error> {
        let lines = body
            .cart
            .items
            .into_iter()
            .map(|item| Ok((item.product_id, item.quantity, to_decimal(item.price, "price")?)))
            .collect::<Result<Vec<_>, RequestError>>()?;

        Ok(Cart::new(lines)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn request(body: serde_json::Value) -> Result<CreateCouponRequest, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn cart_wise_request_converts_to_exact_decimals() -> TestResult {
        let details = CouponDetails::try_from(request(json!({
            "type": "cart-wise",
            "details": { "threshold": 100, "discount": 10 },
        }))?)?;

        assert_eq!(
            details,
            CouponDetails::CartWise(CartWiseDetail {
                threshold: Decimal::ONE_HUNDRED,
                discount_percent: Decimal::TEN,
            })
        );

        Ok(())
    }

    #[test]
    fn bxgy_request_accepts_the_misspelled_limit() -> TestResult {
        let details = CouponDetails::try_from(request(json!({
            "type": "bxgy",
            "details": {
                "repitition_limit": 2,
                "buy_products": [{ "product_id": "A", "quantity": 3 }],
                "get_products": [{ "product_id": "B", "quantity": 1 }],
            },
        }))?)?;

        assert_eq!(
            details,
            CouponDetails::BxGy(BxGyDetail {
                repetition_limit: 2,
                buy_products: smallvec![ProductQuantity::new("A", 3)],
                get_products: smallvec![ProductQuantity::new("B", 1)],
            })
        );

        Ok(())
    }

    #[test]
    fn unsupported_type_is_rejected() -> TestResult {
        let result = CouponDetails::try_from(request(json!({
            "type": "percentage-off",
            "details": { "discount": 10 },
        }))?);

        assert!(
            matches!(result, Err(RequestError::UnsupportedCouponType(_))),
            "unexpected {result:?}"
        );

        Ok(())
    }

    #[test]
    fn missing_detail_fields_are_named() -> TestResult {
        let result = CouponDetails::try_from(request(json!({
            "type": "product-wise",
            "details": { "discount": 10 },
        }))?);

        assert!(
            matches!(result, Err(RequestError::MissingField("product_id"))),
            "unexpected {result:?}"
        );

        Ok(())
    }

    #[test]
    fn details_serialize_only_their_own_fields() -> TestResult {
        let body = CouponDetailsBody::from(CouponDetails::ProductWise(ProductWiseDetail {
            product_id: "A".to_string(),
            discount_percent: Decimal::new(125, 1),
        }));

        assert_eq!(
            serde_json::to_value(body)?,
            json!({ "product_id": "A", "discount": 12.5 })
        );

        Ok(())
    }

    #[test]
    fn cart_body_rejects_invalid_lines() -> TestResult {
        let body: CartBody = serde_json::from_value(json!({
            "cart": { "items": [
                { "product_id": "A", "quantity": 1, "price": 5 },
                { "product_id": "B", "quantity": 0, "price": 5 },
            ] },
        }))?;

        let result = Cart::try_from(body);

        assert!(
            matches!(result, Err(RequestError::Cart(CartError::ZeroQuantity(1)))),
            "unexpected {result:?}"
        );

        Ok(())
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let body = CartBody {
            cart: CartRequest {
                items: vec![CartItemRequest {
                    product_id: "A".to_string(),
                    quantity: 1,
                    price: f64::NAN,
                }],
            },
        };

        let result = Cart::try_from(body);

        assert!(
            matches!(result, Err(RequestError::InvalidAmount("price"))),
            "unexpected {result:?}"
        );
    }
}
