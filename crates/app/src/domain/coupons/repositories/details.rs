//! Coupon Details Repository
//!
//! Each coupon kind keeps its details in its own table; BxGy coupons additionally keep their
//! buy and get product lines in separate tables, ordered by position.

use rebate::coupons::{
    BxGyDetail, CartWiseDetail, CouponDetails, CouponKind, ProductQuantities, ProductQuantity,
    ProductWiseDetail,
};
use rust_decimal::Decimal;
use sqlx::{Sqlite, Transaction, query, query_as, query_scalar};

use crate::domain::coupons::{records::CouponUuid, repositories::column_error};

const CREATE_CART_WISE_DETAILS_SQL: &str = include_str!("../sql/create_cart_wise_details.sql");
const GET_CART_WISE_DETAILS_SQL: &str = include_str!("../sql/get_cart_wise_details.sql");
const CREATE_PRODUCT_WISE_DETAILS_SQL: &str =
    include_str!("../sql/create_product_wise_details.sql");
const GET_PRODUCT_WISE_DETAILS_SQL: &str = include_str!("../sql/get_product_wise_details.sql");
const CREATE_BXGY_DETAILS_SQL: &str = include_str!("../sql/create_bxgy_details.sql");
const GET_BXGY_DETAILS_SQL: &str = include_str!("../sql/get_bxgy_details.sql");
const CREATE_BXGY_BUY_PRODUCT_SQL: &str = include_str!("../sql/create_bxgy_buy_product.sql");
const CREATE_BXGY_GET_PRODUCT_SQL: &str = include_str!("../sql/create_bxgy_get_product.sql");
const LIST_BXGY_BUY_PRODUCTS_SQL: &str = include_str!("../sql/list_bxgy_buy_products.sql");
const LIST_BXGY_GET_PRODUCTS_SQL: &str = include_str!("../sql/list_bxgy_get_products.sql");

/// Child rows first.
const DELETE_DETAILS_SQL: [&str; 5] = [
    include_str!("../sql/delete_bxgy_buy_products.sql"),
    include_str!("../sql/delete_bxgy_get_products.sql"),
    include_str!("../sql/delete_bxgy_coupons.sql"),
    include_str!("../sql/delete_product_wise_coupons.sql"),
    include_str!("../sql/delete_cart_wise_coupons.sql"),
];

const COLUMN_THRESHOLD: &str = "threshold";
const COLUMN_DISCOUNT: &str = "discount";
const COLUMN_REPETITION_LIMIT: &str = "repetition_limit";
const COLUMN_POSITION: &str = "position";
const COLUMN_QUANTITY: &str = "quantity";

#[derive(Debug, Clone, Copy)]
enum ProductLines {
    Buy,
    Get,
}

impl ProductLines {
    const fn create_sql(self) -> &'static str {
        match self {
            Self::Buy => CREATE_BXGY_BUY_PRODUCT_SQL,
            Self::Get => CREATE_BXGY_GET_PRODUCT_SQL,
        }
    }

    const fn list_sql(self) -> &'static str {
        match self {
            Self::Buy => LIST_BXGY_BUY_PRODUCTS_SQL,
            Self::Get => LIST_BXGY_GET_PRODUCTS_SQL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCouponDetailsRepository;

impl SqliteCouponDetailsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_details(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: CouponUuid,
        details: &CouponDetails,
    ) -> Result<(), sqlx::Error> {
        let db_uuid = coupon.to_string();

        match details {
            CouponDetails::CartWise(detail) => {
                query(CREATE_CART_WISE_DETAILS_SQL)
                    .bind(&db_uuid)
                    .bind(detail.threshold.to_string())
                    .bind(detail.discount_percent.to_string())
                    .execute(&mut **tx)
                    .await?;
            }
            CouponDetails::ProductWise(detail) => {
                query(CREATE_PRODUCT_WISE_DETAILS_SQL)
                    .bind(&db_uuid)
                    .bind(&detail.product_id)
                    .bind(detail.discount_percent.to_string())
                    .execute(&mut **tx)
                    .await?;
            }
            CouponDetails::BxGy(detail) => {
                query(CREATE_BXGY_DETAILS_SQL)
                    .bind(&db_uuid)
                    .bind(i64::from(detail.repetition_limit))
                    .execute(&mut **tx)
                    .await?;

                insert_product_lines(tx, &db_uuid, ProductLines::Buy, &detail.buy_products)
                    .await?;
                insert_product_lines(tx, &db_uuid, ProductLines::Get, &detail.get_products)
                    .await?;
            }
        }

        Ok(())
    }

    /// Load the details stored for a coupon of the given kind, or `None` when they are missing.
    pub(crate) async fn get_details(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: CouponUuid,
        kind: CouponKind,
    ) -> Result<Option<CouponDetails>, sqlx::Error> {
        let db_uuid = coupon.to_string();

        match kind {
            CouponKind::CartWise => {
                let row: Option<(String, String)> = query_as(GET_CART_WISE_DETAILS_SQL)
                    .bind(&db_uuid)
                    .fetch_optional(&mut **tx)
                    .await?;

                row.map(|(threshold, discount)| {
                    Ok(CouponDetails::CartWise(CartWiseDetail {
                        threshold: parse_decimal(&threshold, COLUMN_THRESHOLD)?,
                        discount_percent: parse_decimal(&discount, COLUMN_DISCOUNT)?,
                    }))
                })
                .transpose()
            }
            CouponKind::ProductWise => {
                let row: Option<(String, String)> = query_as(GET_PRODUCT_WISE_DETAILS_SQL)
                    .bind(&db_uuid)
                    .fetch_optional(&mut **tx)
                    .await?;

                row.map(|(product_id, discount)| {
                    Ok(CouponDetails::ProductWise(ProductWiseDetail {
                        product_id,
                        discount_percent: parse_decimal(&discount, COLUMN_DISCOUNT)?,
                    }))
                })
                .transpose()
            }
            CouponKind::BxGy => {
                let repetition_limit: Option<i64> = query_scalar(GET_BXGY_DETAILS_SQL)
                    .bind(&db_uuid)
                    .fetch_optional(&mut **tx)
                    .await?;

                let Some(repetition_limit) = repetition_limit else {
                    return Ok(None);
                };

                let buy_products = list_product_lines(tx, &db_uuid, ProductLines::Buy).await?;
                let get_products = list_product_lines(tx, &db_uuid, ProductLines::Get).await?;

                if buy_products.is_empty() || get_products.is_empty() {
                    return Ok(None);
                }

                Ok(Some(CouponDetails::BxGy(BxGyDetail {
                    repetition_limit: u32::try_from(repetition_limit)
                        .map_err(|e| column_error(COLUMN_REPETITION_LIMIT, e))?,
                    buy_products,
                    get_products,
                })))
            }
        }
    }

    pub(crate) async fn delete_details(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let db_uuid = coupon.to_string();
        let mut rows_affected = 0;

        for sql in DELETE_DETAILS_SQL {
            rows_affected += query(sql)
                .bind(&db_uuid)
                .execute(&mut **tx)
                .await?
                .rows_affected();
        }

        Ok(rows_affected)
    }
}

async fn insert_product_lines(
    tx: &mut Transaction<'_, Sqlite>,
    db_uuid: &str,
    lines: ProductLines,
    products: &[ProductQuantity],
) -> Result<(), sqlx::Error> {
    for (position, product) in products.iter().enumerate() {
        let position = i64::try_from(position).map_err(|e| column_error(COLUMN_POSITION, e))?;

        query(lines.create_sql())
            .bind(db_uuid)
            .bind(position)
            .bind(&product.product_id)
            .bind(i64::from(product.quantity))
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

async fn list_product_lines(
    tx: &mut Transaction<'_, Sqlite>,
    db_uuid: &str,
    lines: ProductLines,
) -> Result<ProductQuantities, sqlx::Error> {
    let rows: Vec<(String, i64)> = query_as(lines.list_sql())
        .bind(db_uuid)
        .fetch_all(&mut **tx)
        .await?;

    rows.into_iter()
        .map(|(product_id, quantity)| {
            let quantity =
                u32::try_from(quantity).map_err(|e| column_error(COLUMN_QUANTITY, e))?;

            Ok(ProductQuantity::new(product_id, quantity))
        })
        .collect()
}

fn parse_decimal(raw: &str, column: &'static str) -> Result<Decimal, sqlx::Error> {
    raw.parse().map_err(|e| column_error(column, e))
}
