//! Coupons Repository

use jiff::Timestamp;
use rebate::coupons::CouponKind;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::coupons::{records::CouponUuid, repositories::parse_column};

const CREATE_COUPON_SQL: &str = include_str!("../sql/create_coupon.sql");
const LIST_COUPONS_SQL: &str = include_str!("../sql/list_coupons.sql");
const GET_COUPON_SQL: &str = include_str!("../sql/get_coupon.sql");
const DELETE_COUPON_SQL: &str = include_str!("../sql/delete_coupon.sql");

/// A coupon base row, before its kind has been checked or its details loaded.
#[derive(Debug, Clone)]
pub(crate) struct CouponRow {
    pub(crate) uuid: CouponUuid,
    pub(crate) kind: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: Timestamp,
    pub(crate) updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCouponsRepository;

impl SqliteCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: CouponUuid,
        kind: CouponKind,
    ) -> Result<CouponRow, sqlx::Error> {
        query_as::<Sqlite, CouponRow>(CREATE_COUPON_SQL)
            .bind(coupon.to_string())
            .bind(kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CouponRow>, sqlx::Error> {
        query_as::<Sqlite, CouponRow>(LIST_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: CouponUuid,
    ) -> Result<CouponRow, sqlx::Error> {
        query_as::<Sqlite, CouponRow>(GET_COUPON_SQL)
            .bind(coupon.to_string())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUPON_SQL)
            .bind(coupon.to_string())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CouponRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: parse_column(row, "uuid")?,
            kind: row.try_get("kind")?,
            is_active: row.try_get("is_active")?,
            created_at: parse_column(row, "created_at")?,
            updated_at: parse_column(row, "updated_at")?,
        })
    }
}
