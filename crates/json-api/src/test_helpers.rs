//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use rebate::coupons::CouponDetails;
use rebate_app::{
    context::AppContext,
    domain::coupons::{
        MockCouponsService,
        records::{CouponRecord, CouponUuid},
    },
};

use crate::state::State;

pub(crate) fn make_coupon(uuid: CouponUuid, details: CouponDetails) -> CouponRecord {
    CouponRecord {
        uuid,
        is_active: true,
        details,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn state_with_coupons(coupons: MockCouponsService) -> Arc<State> {
    State::from_app_context(AppContext {
        coupons: Arc::new(coupons),
    })
}

pub(crate) fn coupons_service(coupons: MockCouponsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_coupons(coupons)))
            .push(route),
    )
}
