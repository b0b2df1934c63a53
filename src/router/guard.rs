//! Global navigation guard

use super::Location;
use super::table::ResolvedRoute;
use crate::session::SessionStore;

/// Route authenticated users land on when they open a hide-for-auth route
pub const AUTHENTICATED_HOME: &str = "DashboardHome";
pub const UNAUTHORIZED_PATH: &str = "/error/401";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(Location),
}

/// Decides, per navigation, whether the session may enter a route.
///
/// Checks run in order: hide-for-auth, then required role. The decision
/// is pure and synchronous.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    authenticated_home: Location,
    unauthorized: Location,
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self {
            authenticated_home: Location::Named(AUTHENTICATED_HOME.to_string()),
            unauthorized: Location::Path(UNAUTHORIZED_PATH.to_string()),
        }
    }
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authenticated_home(mut self, location: Location) -> Self {
        self.authenticated_home = location;
        self
    }

    pub fn check(&self, to: &ResolvedRoute, store: &SessionStore) -> NavigationDecision {
        if to.meta.hide_for_auth && store.is_authenticated() {
            return NavigationDecision::Redirect(self.authenticated_home.clone());
        }

        match &to.meta.requires_role {
            Some(role) if !store.has_role(role) => {
                NavigationDecision::Redirect(self.unauthorized.clone())
            }
            _ => NavigationDecision::Proceed,
        }
    }
}
