//! App Router

use salvo::Router;

use crate::coupons;

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(
            Router::with_path("coupons")
                .get(coupons::index::handler)
                .post(coupons::create::handler)
                .push(
                    Router::with_path("{coupon}")
                        .get(coupons::get::handler)
                        .delete(coupons::delete::handler),
                ),
        )
        .push(Router::with_path("applicable-coupons").post(coupons::applicable::handler))
        .push(Router::with_path("apply-coupon/{coupon}").post(coupons::apply::handler))
}
