//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use rebate_app::domain::coupons::CouponsService;
use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The coupon service from the injected application state.
    fn coupons_or_500(&self) -> Result<&Arc<dyn CouponsService>, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>().map_err(|_ignored| {
            error!(
                "missing {} in depot; is the state injected?",
                std::any::type_name::<T>()
            );

            StatusError::internal_server_error()
        })
    }

    fn coupons_or_500(&self) -> Result<&Arc<dyn CouponsService>, StatusError> {
        Ok(&self.obtain_or_500::<Arc<State>>()?.app.coupons)
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn missing_state_is_an_internal_error() {
        let depot = Depot::new();

        let result = depot.coupons_or_500();

        assert_eq!(
            result.err().map(|error| error.code),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }
}
