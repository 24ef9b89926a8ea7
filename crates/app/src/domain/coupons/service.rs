//! Coupons Service

use async_trait::async_trait;
use mockall::automock;
use rebate::{
    cart::Cart,
    coupons::{CouponDetails, CouponKind},
    engine::{self, UpdatedCart},
};
use sqlx::{Sqlite, Transaction};
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::coupons::{
        CouponsServiceError,
        records::{ApplicableCoupon, CouponRecord, CouponUuid},
        repositories::{
            coupons::{CouponRow, SqliteCouponsRepository},
            details::SqliteCouponDetailsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCouponsService {
    db: Db,
    coupons: SqliteCouponsRepository,
    details: SqliteCouponDetailsRepository,
}

impl SqliteCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            coupons: SqliteCouponsRepository::new(),
            details: SqliteCouponDetailsRepository::new(),
        }
    }

    /// Combine a base row with its details.
    async fn hydrate(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        row: CouponRow,
    ) -> Result<CouponRecord, CouponsServiceError> {
        let kind: CouponKind = row.kind.parse()?;

        let details = self
            .details
            .get_details(tx, row.uuid, kind)
            .await?
            .ok_or(CouponsServiceError::CouponDataInconsistency {
                coupon: row.uuid,
                kind,
            })?;

        Ok(CouponRecord {
            uuid: row.uuid,
            is_active: row.is_active,
            details,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn load_all(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = self.coupons.list_coupons(&mut tx).await?;
        let mut coupons = Vec::with_capacity(rows.len());

        for row in rows {
            coupons.push(self.hydrate(&mut tx, row).await?);
        }

        tx.commit().await?;

        Ok(coupons)
    }

    async fn load_one(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let row = self.coupons.get_coupon(&mut tx, coupon).await?;
        let record = self.hydrate(&mut tx, row).await?;

        tx.commit().await?;

        Ok(record)
    }
}

#[async_trait]
impl CouponsService for SqliteCouponsService {
    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, details),
        fields(
            coupon_uuid = tracing::field::Empty,
            coupon_type = %details.kind()
        ),
        err
    )]
    async fn create_coupon(
        &self,
        details: CouponDetails,
    ) -> Result<CouponRecord, CouponsServiceError> {
        details.validate()?;

        let uuid = CouponUuid::new();

        Span::current().record("coupon_uuid", tracing::field::display(uuid));

        let mut tx = self.db.begin().await?;

        let row = self
            .coupons
            .create_coupon(&mut tx, uuid, details.kind())
            .await?;

        self.details.create_details(&mut tx, uuid, &details).await?;

        tx.commit().await?;

        info!(coupon_uuid = %uuid, coupon_type = %details.kind(), "created coupon");

        Ok(CouponRecord {
            uuid: row.uuid,
            is_active: row.is_active,
            details,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    #[tracing::instrument(
        name = "coupons.service.list_coupons",
        skip(self),
        fields(coupon_count = tracing::field::Empty),
        err
    )]
    async fn list_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let coupons = self.load_all().await?;

        Span::current().record("coupon_count", coupons.len());

        Ok(coupons)
    }

    #[tracing::instrument(
        name = "coupons.service.get_coupon",
        skip(self),
        fields(coupon_uuid = %coupon),
        err
    )]
    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError> {
        self.load_one(coupon).await
    }

    #[tracing::instrument(
        name = "coupons.service.applicable_coupons",
        skip(self, cart),
        fields(
            cart_lines = cart.len(),
            coupon_count = tracing::field::Empty,
            applicable_count = tracing::field::Empty
        ),
        err
    )]
    async fn applicable_coupons(
        &self,
        cart: Cart,
    ) -> Result<Vec<ApplicableCoupon>, CouponsServiceError> {
        let coupons = self.load_all().await?;

        let span = Span::current();

        span.record("coupon_count", coupons.len());

        let mut applicable = Vec::new();

        for coupon in coupons {
            if let Some(discount) = engine::evaluate(&cart, &coupon.details)? {
                applicable.push(ApplicableCoupon {
                    uuid: coupon.uuid,
                    kind: coupon.kind(),
                    discount,
                });
            }
        }

        span.record("applicable_count", applicable.len());

        Ok(applicable)
    }

    #[tracing::instrument(
        name = "coupons.service.apply_coupon",
        skip(self, cart),
        fields(
            coupon_uuid = %coupon,
            cart_lines = cart.len(),
            total_discount = tracing::field::Empty
        ),
        err
    )]
    async fn apply_coupon(
        &self,
        coupon: CouponUuid,
        cart: Cart,
    ) -> Result<UpdatedCart, CouponsServiceError> {
        let record = self.load_one(coupon).await?;

        let updated = engine::apply_to_cart(&cart, &record.details)?;

        Span::current().record(
            "total_discount",
            tracing::field::display(updated.total_discount),
        );

        Ok(updated)
    }

    #[tracing::instrument(
        name = "coupons.service.delete_coupon",
        skip(self),
        fields(coupon_uuid = %coupon, detail_rows = tracing::field::Empty),
        err
    )]
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let detail_rows = self.details.delete_details(&mut tx, coupon).await?;

        Span::current().record("detail_rows", detail_rows);

        let rows_affected = self.coupons.delete_coupon(&mut tx, coupon).await?;

        if rows_affected == 0 {
            return Err(CouponsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(coupon_uuid = %coupon, "deleted coupon");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Validate and store a new coupon.
    async fn create_coupon(
        &self,
        details: CouponDetails,
    ) -> Result<CouponRecord, CouponsServiceError>;

    /// Retrieve every coupon, in creation order.
    async fn list_coupons(&self) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// Retrieve a single coupon.
    async fn get_coupon(&self, coupon: CouponUuid) -> Result<CouponRecord, CouponsServiceError>;

    /// Every coupon that applies to the cart, with its discount, in creation order.
    async fn applicable_coupons(
        &self,
        cart: Cart,
    ) -> Result<Vec<ApplicableCoupon>, CouponsServiceError>;

    /// Apply a coupon to the cart.
    async fn apply_coupon(
        &self,
        coupon: CouponUuid,
        cart: Cart,
    ) -> Result<UpdatedCart, CouponsServiceError>;

    /// Delete a coupon and its details.
    async fn delete_coupon(&self, coupon: CouponUuid) -> Result<(), CouponsServiceError>;
}
