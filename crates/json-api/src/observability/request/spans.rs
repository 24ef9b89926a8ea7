//! HTTP span helpers.

use uuid::Uuid;

/// Collapse id segments so requests for different coupons share one route label.
pub(super) fn request_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut route = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            route.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            route.push_str("{coupon}");
        } else {
            route.push_str(segment);
        }
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_ids_are_collapsed() {
        assert_eq!(
            request_route("/apply-coupon/01890a5d-ac96-774b-bcce-b302099a8057"),
            "/apply-coupon/{coupon}"
        );
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(request_route("/applicable-coupons"), "/applicable-coupons");
        assert_eq!(request_route("/"), "/");
    }
}
