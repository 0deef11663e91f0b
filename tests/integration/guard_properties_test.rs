//! Decoder, identity and guard properties across crate boundaries
//!
//! Tokens are minted with a real JWT encoder and pushed through the same
//! decode -> derive -> guard path the navigator uses.

use chrono::{Duration, Utc};
use lustre_auth::{decode, derive_identity, is_expired, is_expired_at, Identity, Role};
use lustre_session::{GuardContext, Location, Route, RouteGuard};
use serde_json::json;

use crate::common::{in_one_hour, mint, token_with_raw_payload, TokenFixture};

mod common;

fn all_locations() -> Vec<Location> {
    [
        "/auth/login",
        "/auth/register",
        "/(tabs)",
        "/(tabs)/index",
        "/(tabs)/cart",
        "/(tabs)/profile",
        "/(tabs)/seller-dashboard",
        "/(tabs)/seller-products",
        "/(tabs)/seller-messages",
        "/(tabs)/seller-refunds",
        "/product/17",
    ]
    .into_iter()
    .map(Location::parse)
    .collect()
}

fn signed_in(user: &Identity) -> GuardContext<'_> {
    GuardContext {
        app_ready: true,
        is_authenticated: true,
        current_user: Some(user),
    }
}

fn identities() -> Vec<Identity> {
    [TokenFixture::seller(), TokenFixture::buyer(), TokenFixture::admin()]
        .iter()
        .map(|token| derive_identity(Some(token)).expect("fixture identity"))
        .collect()
}

mod test_decoding {
    use super::*;

    #[test]
    fn test_subject_round_trips_through_real_tokens() {
        for sub in [0_u64, 1, 42, 9_007_199_254_740_991] {
            let claims = decode(&mint(&json!({ "sub": sub }))).expect("decodes");
            assert_eq!(claims.sub, Some(sub));
        }
    }

    #[test]
    fn test_wrong_segment_counts_fail() {
        let token = TokenFixture::buyer();
        let segments: Vec<&str> = token.split('.').collect();

        assert!(decode(segments[0]).is_none());
        assert!(decode(&segments[..2].join(".")).is_none());
        assert!(decode(&format!("{token}.extra")).is_none());
        assert!(decode("").is_none());
    }

    #[test]
    fn test_non_json_payload_fails() {
        assert!(decode(&token_with_raw_payload(b"definitely not json")).is_none());
        assert!(decode(&token_with_raw_payload(b"[1,2,3]")).is_none());
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        let past = mint(&json!({ "sub": 1, "exp": (now - Duration::seconds(1)).timestamp() }));
        let future = mint(&json!({ "sub": 1, "exp": (now + Duration::hours(1)).timestamp() }));
        let forever = mint(&json!({ "sub": 1 }));

        assert!(is_expired_at(&past, now));
        assert!(!is_expired_at(&future, now));
        assert!(is_expired(&forever));
        assert!(is_expired("garbage"));
    }
}

mod test_identity {
    use super::*;

    #[test]
    fn test_absent_or_empty_token_has_no_identity() {
        assert!(derive_identity(None).is_none());
        assert!(derive_identity(Some("")).is_none());
    }

    #[test]
    fn test_claims_without_subject_have_no_identity() {
        assert!(derive_identity(Some(&TokenFixture::anonymous())).is_none());
    }

    #[test]
    fn test_approved_seller() {
        let token = mint(&json!({ "sub": 42, "role": "seller", "seller_status": "approved" }));
        let identity = derive_identity(Some(&token)).unwrap();
        assert_eq!(identity.role, Role::Seller);
        assert!(identity.seller_approved);
    }

    #[test]
    fn test_bare_subject_defaults() {
        let identity = derive_identity(Some(&mint(&json!({ "sub": 7 })))).unwrap();
        assert_eq!(identity.role, Role::Buyer);
        assert!(identity.is_active);
        assert!(!identity.seller_approved);
        assert_eq!(identity.name, "");
    }

    #[test]
    fn test_unknown_role_is_buyer() {
        let token = mint(&json!({ "sub": 3, "role": "superuser", "exp": in_one_hour() }));
        assert_eq!(derive_identity(Some(&token)).unwrap().role, Role::Buyer);
    }
}

mod test_guard {
    use super::*;

    #[test]
    fn test_not_ready_never_redirects() {
        let users = identities();
        for location in all_locations() {
            for is_authenticated in [false, true] {
                for current_user in users.iter().map(Some).chain([None]) {
                    let context = GuardContext {
                        app_ready: false,
                        is_authenticated,
                        current_user,
                    };
                    assert_eq!(RouteGuard::evaluate(&context, &location), None, "{location}");
                }
            }
        }
    }

    #[test]
    fn test_documented_scenarios() {
        let seller = derive_identity(Some(&TokenFixture::seller())).unwrap();
        let buyer = derive_identity(Some(&TokenFixture::buyer())).unwrap();

        let guest = GuardContext {
            app_ready: true,
            is_authenticated: false,
            current_user: None,
        };

        assert_eq!(
            RouteGuard::evaluate(&signed_in(&seller), &Location::new(["auth", "login"])),
            Some(Route::SellerDashboard)
        );
        assert_eq!(
            RouteGuard::evaluate(&signed_in(&buyer), &Location::new(["(tabs)", "seller-products"])),
            Some(Route::Catalog)
        );
        assert_eq!(
            RouteGuard::evaluate(&guest, &Location::new(["(tabs)", "seller-refunds"])),
            Some(Route::Catalog)
        );
    }

    #[test]
    fn test_guard_settles_after_one_redirect() {
        let users = identities();
        let contexts: Vec<GuardContext<'_>> = users
            .iter()
            .map(signed_in)
            .chain([GuardContext {
                app_ready: true,
                is_authenticated: false,
                current_user: None,
            }])
            .collect();

        for context in &contexts {
            for location in all_locations() {
                if let Some(route) = RouteGuard::evaluate(context, &location) {
                    assert_eq!(
                        RouteGuard::evaluate(context, &route.location()),
                        None,
                        "redirect from {location} to {route} is not stable"
                    );
                }
            }
        }
    }

    #[test]
    fn test_non_sellers_never_land_on_seller_routes() {
        for user in identities().iter().filter(|u| !u.is_seller()) {
            let context = signed_in(user);
            for location in all_locations().iter().filter(|l| l.is_seller_route()) {
                assert_eq!(
                    RouteGuard::evaluate(&context, location),
                    Some(Route::Catalog),
                    "{} at {location}",
                    user.role
                );
            }
        }
    }
}
