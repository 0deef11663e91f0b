//! Startup and session lifecycle integration tests
//!
//! Runs the composed application through startup against real and mock
//! session backends, then through sign-in and sign-out.

use std::io::Write;

use lustre_app::{create_app, DEFAULT_LOCATION};
use lustre_auth::Role;
use lustre_common::Config;
use lustre_session::{Location, MockSessionBackend, RecordingNavigator, Route};

use crate::common::{app_restoring, test_app, TokenFixture};

mod common;

mod test_startup {
    use super::*;

    #[tokio::test]
    async fn test_file_backed_seller_session_restored() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Bearer {}", TokenFixture::seller()).unwrap();

        let config = Config {
            session_provider: "file".to_string(),
            session_file: Some(file.path().to_path_buf()),
            ..Config::default()
        };
        let recorder = RecordingNavigator::new();
        let mut app = create_app(config, recorder.clone(), Location::parse("/auth/login")).unwrap();

        let redirect = app.start().await;

        assert_eq!(redirect, Some(Route::SellerDashboard));
        let user = app.current_user().expect("seller identity");
        assert_eq!(user.id, 42);
        assert_eq!(user.name, "Ada Seller");
        assert!(user.seller_approved);
    }

    #[tokio::test]
    async fn test_file_backed_without_file_is_guest() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            session_provider: "file".to_string(),
            session_file: Some(dir.path().join("session")),
            ..Config::default()
        };
        let mut app = create_app(
            config,
            RecordingNavigator::new(),
            Location::parse(DEFAULT_LOCATION),
        )
        .unwrap();

        assert_eq!(app.start().await, None);
        assert!(app.session().is_ready());
        assert!(!app.session().is_authenticated());
        assert!(app.current_user().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_session_file_starts_signed_out() {
        // A directory in place of the file makes the read fail
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            session_provider: "file".to_string(),
            session_file: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        let recorder = RecordingNavigator::new();
        let mut app = create_app(
            config,
            recorder.clone(),
            Location::parse("/(tabs)/seller-dashboard"),
        )
        .unwrap();

        assert_eq!(app.start().await, Some(Route::Catalog));
        assert!(app.session().is_ready());
        assert_eq!(recorder.recorded_routes(), vec![Route::Catalog]);
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let (mut app, recorder) =
            app_restoring(&TokenFixture::expired_seller(), "/(tabs)/seller-products");

        assert_eq!(app.start().await, Some(Route::Catalog));
        assert!(!app.session().is_authenticated());
        assert_eq!(recorder.recorded_routes(), vec![Route::Catalog]);
    }

    #[tokio::test]
    async fn test_restored_buyer_stays_on_catalog() {
        let (mut app, recorder) = app_restoring(&TokenFixture::buyer(), DEFAULT_LOCATION);

        assert_eq!(app.start().await, None);
        let user = app.current_user().expect("buyer identity");
        assert_eq!(user.role, Role::Buyer);
        assert!(user.is_active);
        assert!(recorder.recorded_routes().is_empty());
    }

    #[tokio::test]
    async fn test_subjectless_token_waits_instead_of_redirecting() {
        let (mut app, recorder) = app_restoring(&TokenFixture::anonymous(), "/auth/login");

        assert_eq!(app.start().await, None);
        assert!(app.session().is_authenticated());
        assert!(app.current_user().is_none());
        assert!(recorder.recorded_routes().is_empty());
    }
}

mod test_session_lifecycle {
    use super::*;

    #[tokio::test]
    async fn test_guest_signs_in_as_seller_and_out_again() {
        let (mut app, recorder) = test_app(
            Box::new(MockSessionBackend::signed_out()),
            "http://127.0.0.1:9",
            "/(tabs)/seller-refunds",
        );

        // Guests are sent away from seller routes
        assert_eq!(app.start().await, Some(Route::Catalog));

        app.navigate(Location::parse("/auth/login"));
        assert_eq!(app.login(TokenFixture::seller()), Some(Route::SellerDashboard));

        // Seller routes are open now
        assert_eq!(app.navigate(Location::parse("/(tabs)/seller-refunds")), None);
        // The buyer catalog is not the seller's home
        assert_eq!(
            app.navigate(Location::parse("/(tabs)/index")),
            Some(Route::SellerDashboard)
        );

        assert_eq!(app.logout(), Some(Route::Catalog));
        assert_eq!(
            recorder.recorded_routes(),
            vec![
                Route::Catalog,
                Route::SellerDashboard,
                Route::SellerDashboard,
                Route::Catalog,
            ]
        );
    }

    #[tokio::test]
    async fn test_switching_accounts_rederives_identity() {
        let (mut app, _) = app_restoring(&TokenFixture::seller(), "/(tabs)/profile");
        app.start().await;
        assert_eq!(app.current_user().map(|u| u.role), Some(Role::Seller));

        assert_eq!(app.login(TokenFixture::admin()), None);
        assert_eq!(app.current_user().map(|u| u.role), Some(Role::Admin));

        assert_eq!(
            app.navigate(Location::parse("/(tabs)/seller-messages")),
            Some(Route::Catalog)
        );
    }

    #[tokio::test]
    async fn test_pending_seller_still_routed_as_seller() {
        let (mut app, _) = app_restoring(&TokenFixture::pending_seller(), "/auth/login");

        assert_eq!(app.start().await, Some(Route::SellerDashboard));
        let user = app.current_user().unwrap();
        assert!(!user.seller_approved);
        assert_eq!(user.seller_status.as_deref(), Some("pending"));
    }

    #[tokio::test]
    async fn test_blank_login_is_logout() {
        let (mut app, _) = app_restoring(&TokenFixture::buyer(), DEFAULT_LOCATION);
        app.start().await;

        app.login("   ");
        assert!(!app.session().is_authenticated());
        assert!(app.current_user().is_none());
    }
}
