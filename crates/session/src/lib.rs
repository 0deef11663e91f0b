//! Session state and navigation guarding for the Lustre storefront
//!
//! - [`SessionStore`]: observable token + readiness state with a single writer path
//! - [`SessionBackend`]: the startup auth check (file-backed restore or mock)
//! - [`RouteGuard`]: pure redirect decision for a role and a location
//! - [`RootNavigator`]: drives the guard from session and location changes

pub mod backend;
mod error;
mod guard;
mod navigator;
mod store;

pub use backend::{
    file::FileSessionBackend, mock::MockSessionBackend, SessionBackend, SessionBackendFactory,
};
pub use error::SessionError;
pub use guard::{GuardContext, Location, Route, RouteGuard};
pub use navigator::{Navigator, RecordingNavigator, RootNavigator};
pub use store::{SessionSnapshot, SessionStore};
