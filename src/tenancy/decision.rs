// src/tenancy/decision.rs
use crate::tenancy::hostname::HostClass;
use crate::tenancy::rewrite::rewrite_path;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The single outbound action the middleware takes for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    PassThrough,
    Redirect(String),
    Rewrite(String),
}

/// Decide how to route a classified request.
///
/// Root-domain policy: the bare root always redirects away (to login),
/// an authenticated hit on the login page goes to the dashboard, and
/// an unauthenticated dashboard hit goes back to login carrying the
/// original path. Tenant hosts are rewritten under their slug;
/// unrecognized hosts fall through untouched.
pub fn decide(class: &HostClass, path: &str, query: &str, session_present: bool) -> RouteDecision {
    match class {
        HostClass::Root => {
            if session_present && path == LOGIN_PATH {
                return RouteDecision::Redirect(DASHBOARD_PATH.to_string());
            }
            if session_present && path == "/" {
                return RouteDecision::Redirect(LOGIN_PATH.to_string());
            }
            if !session_present
                && (path == DASHBOARD_PATH || path.starts_with("/dashboard/"))
            {
                return RouteDecision::Redirect(format!("{}?redirect={}", LOGIN_PATH, path));
            }
            RouteDecision::PassThrough
        }
        HostClass::Legacy(slug) | HostClass::Wildcard(slug) => {
            RouteDecision::Rewrite(rewrite_path(slug, path, query))
        }
        HostClass::Unrecognized => RouteDecision::PassThrough,
    }
}
