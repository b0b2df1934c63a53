//! Navigation
//!
//! A [`RouteTable`] of declarative routes, a [`NavigationGuard`] that
//! consults the [`SessionStore`], and a [`Router`] that resolves a path,
//! follows redirects and returns the route the session ends up on.

mod guard;
mod table;

use std::fmt;

use tracing::debug;

use crate::session::SessionStore;

pub use guard::{AUTHENTICATED_HOME, NavigationDecision, NavigationGuard, UNAUTHORIZED_PATH};
pub use table::{ResolvedRoute, Route, RouteMeta, RouteTable};

/// Maximum number of redirects followed by a single navigation
pub const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("Invalid route pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("Unknown route name: {0}")]
    UnknownRoute(String),
    #[error("No route matches {0}")]
    NoMatch(String),
    #[error("Navigation to {path} exceeded {hops} redirects")]
    RedirectLoop { path: String, hops: usize },
}

/// Navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Path(String),
    Named(String),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => f.write_str(path),
            Location::Named(name) => write!(f, "{{name: {}}}", name),
        }
    }
}

/// Route table plus guard, bound to a session store
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
    store: SessionStore,
}

impl Router {
    pub fn new(table: RouteTable, guard: NavigationGuard, store: SessionStore) -> Self {
        Self {
            table,
            guard,
            store,
        }
    }

    /// Router over the marketplace route table with the default guard
    pub fn marketplace(store: SessionStore) -> Result<Self, RouterError> {
        Ok(Self::new(
            RouteTable::marketplace()?,
            NavigationGuard::default(),
            store,
        ))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a location to a concrete path
    pub fn location_path(&self, location: &Location) -> Result<String, RouterError> {
        match location {
            Location::Path(path) => Ok(path.clone()),
            Location::Named(name) => self.table.path_for(name).map(str::to_string),
        }
    }

    /// Guard decision for a path, without following redirects
    pub fn check(&self, path: &str) -> Result<(ResolvedRoute, NavigationDecision), RouterError> {
        let resolved = self
            .table
            .resolve(path)
            .ok_or_else(|| RouterError::NoMatch(path.to_string()))?;
        let decision = self.guard.check(&resolved, &self.store);
        Ok((resolved, decision))
    }

    /// Navigate to a path, following table and guard redirects
    pub fn navigate(&self, path: &str) -> Result<ResolvedRoute, RouterError> {
        let mut target = path.to_string();

        for _ in 0..=MAX_REDIRECTS {
            let (resolved, decision) = self.check(&target)?;

            if let Some(redirect) = &resolved.redirect {
                debug!("Route {} redirects to {}", resolved.path, redirect);
                target = redirect.clone();
                continue;
            }

            match decision {
                NavigationDecision::Proceed => return Ok(resolved),
                NavigationDecision::Redirect(location) => {
                    debug!("Guard redirected {} to {}", resolved.path, location);
                    target = self.location_path(&location)?;
                }
            }
        }

        Err(RouterError::RedirectLoop {
            path: path.to_string(),
            hops: MAX_REDIRECTS,
        })
    }
}
