//! Route table and path matching

use std::collections::HashMap;

use regex::Regex;

use super::RouterError;
use crate::models::EnumRole;

/// Per-route metadata consulted by the navigation guard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_role: Option<EnumRole>,
    /// Authenticated users are sent elsewhere
    pub hide_for_auth: bool,
    pub layout: Option<String>,
}

/// Declarative route definition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    /// Path pattern. `:name` captures a segment, `*` matches anything.
    /// Child paths are relative to the parent.
    pub path: String,
    pub name: Option<String>,
    pub meta: RouteMeta,
    pub children: Vec<Route>,
    /// Path to redirect to when matched
    pub redirect: Option<String>,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn requires_role(mut self, role: EnumRole) -> Self {
        self.meta.requires_role = Some(role);
        self
    }

    pub fn hide_for_auth(mut self) -> Self {
        self.meta.hide_for_auth = true;
        self
    }

    pub fn layout(mut self, layout: impl Into<String>) -> Self {
        self.meta.layout = Some(layout.into());
        self
    }

    pub fn child(mut self, route: Route) -> Self {
        self.children.push(route);
        self
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect = Some(path.into());
        self
    }
}

/// A route matched against a concrete path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// The path that was matched, without query or fragment
    pub path: String,
    /// Full pattern of the matched route
    pub pattern: String,
    pub name: Option<String>,
    pub params: HashMap<String, String>,
    pub meta: RouteMeta,
    pub redirect: Option<String>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    pattern: String,
    regex: Regex,
    params: Vec<String>,
    name: Option<String>,
    meta: RouteMeta,
    redirect: Option<String>,
}

fn join_paths(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        return child.to_string();
    }
    if child.is_empty() {
        return parent.to_string();
    }
    format!("{}/{}", parent.trim_end_matches('/'), child)
}

/// Compile a path pattern into an anchored, case-insensitive regex.
/// A trailing slash is optional.
fn compile_pattern(pattern: &str) -> Result<(Regex, Vec<String>), RouterError> {
    let mut params = Vec::new();
    let mut expr = String::from("(?i)^");

    if pattern == "*" {
        expr.push_str(".*");
    } else {
        for segment in pattern.trim_end_matches('/').split('/').skip(1) {
            expr.push('/');
            if let Some(param) = segment.strip_prefix(':') {
                params.push(param.to_string());
                expr.push_str("([^/]+)");
            } else if segment == "*" {
                expr.push_str(".*");
            } else {
                expr.push_str(&regex::escape(segment));
            }
        }
        expr.push_str("/?");
    }
    expr.push('$');

    let regex = Regex::new(&expr).map_err(|e| RouterError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;
    Ok((regex, params))
}

/// Ordered route table. The first matching route wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self, RouterError> {
        let mut compiled = Vec::new();
        for route in &routes {
            flatten_route(route, "", &mut compiled)?;
        }
        Ok(Self { routes: compiled })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Match a path, ignoring any query string or fragment
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        self.routes.iter().find_map(|route| {
            let captures = route.regex.captures(path)?;
            let params = route
                .params
                .iter()
                .zip(captures.iter().skip(1))
                .filter_map(|(name, value)| {
                    value.map(|v| (name.clone(), v.as_str().to_string()))
                })
                .collect();

            Some(ResolvedRoute {
                path: path.to_string(),
                pattern: route.pattern.clone(),
                name: route.name.clone(),
                params,
                meta: route.meta.clone(),
                redirect: route.redirect.clone(),
            })
        })
    }

    /// Path of a named route
    pub fn path_for(&self, name: &str) -> Result<&str, RouterError> {
        self.routes
            .iter()
            .find(|r| r.name.as_deref() == Some(name))
            .map(|r| r.pattern.as_str())
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))
    }

    /// Route table of the marketplace application
    pub fn marketplace() -> Result<Self, RouterError> {
        let dashboard_page = |path: &str, name: &str| {
            Route::new(path)
                .named(name)
                .requires_role(EnumRole::User)
                .layout("dashboard")
        };

        Self::new(vec![
            Route::new("/").named("Home"),
            Route::new("/catalogue/").named("Catalogue"),
            Route::new("/catalogue/:id").named("CatalogueSingle"),
            Route::new("/terms").named("Terms"),
            Route::new("/privacy").named("Privacy"),
            Route::new("/faq").named("Faq"),
            Route::new("/dashboard")
                .requires_role(EnumRole::User)
                .layout("dashboard")
                .child(dashboard_page("", "DashboardHome"))
                .child(dashboard_page("assets", "Assets"))
                .child(dashboard_page("assets/create", "CreateAsset"))
                .child(dashboard_page("profile", "Profile"))
                .child(dashboard_page("favorites", "Favorites"))
                .child(dashboard_page("messages", "Messages"))
                .child(dashboard_page("settings", "Settings"))
                .child(dashboard_page("messages/create", "MessageNew"))
                .child(dashboard_page("messages/:id", "MessagesThread")),
            Route::new("/order-thankyou").named("OrderThankYou"),
            Route::new("/signin").named("Login").hide_for_auth(),
            Route::new("/error/:error").named("Error"),
            Route::new("/about").named("About"),
            Route::new("/vendor-benefits").named("VendorBenefits"),
            Route::new("/user-benefits").named("UserBenefits"),
            Route::new("/admin")
                .named("Admin")
                .requires_role(EnumRole::Admin),
            Route::new("*").redirect_to("/error/404"),
        ])
    }
}

/// Children are registered before their parent so a child with an empty
/// path takes precedence over the parent record.
fn flatten_route(
    route: &Route,
    parent: &str,
    out: &mut Vec<CompiledRoute>,
) -> Result<(), RouterError> {
    let pattern = if parent.is_empty() {
        route.path.clone()
    } else {
        join_paths(parent, &route.path)
    };

    for child in &route.children {
        flatten_route(child, &pattern, out)?;
    }

    let (regex, params) = compile_pattern(&pattern)?;
    out.push(CompiledRoute {
        pattern,
        regex,
        params,
        name: route.name.clone(),
        meta: route.meta.clone(),
        redirect: route.redirect.clone(),
    });
    Ok(())
}
