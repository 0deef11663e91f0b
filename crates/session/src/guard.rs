//! Role-based route guard
//!
//! Decides whether the current location must be replaced, given the session
//! state and the signed-in identity. The decision is level-triggered: it
//! looks only at the current state, so re-running it on a location it
//! already approved is a no-op.
//!
//! Routes:
//! - `auth/...` is the sign-in area
//! - `(tabs)/...` is the main app; `(tabs)` itself (or `(tabs)/index`) is the
//!   buyer catalog
//! - any segment starting with `seller-` is restricted to sellers

use lustre_auth::Identity;

pub const AUTH_SEGMENT: &str = "auth";
pub const TABS_SEGMENT: &str = "(tabs)";
pub const SELLER_PREFIX: &str = "seller-";
pub const SELLER_DASHBOARD_SEGMENT: &str = "seller-dashboard";
const INDEX_SEGMENT: &str = "index";

// ============================================================================
// Locations
// ============================================================================

/// Ordered path segments reported by the routing framework
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    segments: Vec<String>,
}

impl Location {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a path such as `/(tabs)/seller-products`
    pub fn parse(path: &str) -> Self {
        Self::new(path.split('/').filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    fn root(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn in_auth_area(&self) -> bool {
        self.root() == Some(AUTH_SEGMENT)
    }

    pub fn in_tabs_area(&self) -> bool {
        self.root() == Some(TABS_SEGMENT)
    }

    pub fn is_seller_route(&self) -> bool {
        self.segments.iter().any(|s| s.starts_with(SELLER_PREFIX))
    }

    /// The buyer catalog: `(tabs)` or `(tabs)/index`
    pub fn is_buyer_dashboard(&self) -> bool {
        match self.segments.as_slice() {
            [root] => root == TABS_SEGMENT,
            [root, leaf] => root == TABS_SEGMENT && leaf == INDEX_SEGMENT,
            _ => false,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

/// Redirect targets issued by the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Default location for guests, buyers and admins
    Catalog,
    SellerDashboard,
}

impl Route {
    pub fn location(&self) -> Location {
        match self {
            Route::Catalog => Location::new([TABS_SEGMENT]),
            Route::SellerDashboard => Location::new([TABS_SEGMENT, SELLER_DASHBOARD_SEGMENT]),
        }
    }

    /// Home location for a signed-in user
    pub fn home_for(identity: &Identity) -> Self {
        if identity.is_seller() {
            Route::SellerDashboard
        } else {
            Route::Catalog
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.location().fmt(f)
    }
}

// ============================================================================
// Guard
// ============================================================================

/// Session state the guard reads
#[derive(Debug, Clone, Copy)]
pub struct GuardContext<'a> {
    /// Whether the startup auth check has settled
    pub app_ready: bool,
    /// Whether a token is present (presence, not validity)
    pub is_authenticated: bool,
    /// Identity derived from the token; may lag behind `is_authenticated`
    pub current_user: Option<&'a Identity>,
}

/// Route guard
pub struct RouteGuard;

impl RouteGuard {
    /// Decide whether `location` must be replaced
    pub fn evaluate(context: &GuardContext<'_>, location: &Location) -> Option<Route> {
        if !context.app_ready {
            return None;
        }

        match (context.is_authenticated, context.current_user) {
            (true, Some(user)) if location.in_auth_area() => Some(Route::home_for(user)),
            (true, Some(user)) if location.in_tabs_area() => {
                if !user.is_seller() && location.is_seller_route() {
                    Some(Route::Catalog)
                } else if user.is_seller() && location.is_buyer_dashboard() {
                    Some(Route::SellerDashboard)
                } else {
                    None
                }
            }
            (false, _) if location.in_tabs_area() && location.is_seller_route() => {
                Some(Route::Catalog)
            }
            // Guests browse freely; a token whose identity is still resolving waits
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
