// src/tenancy/middleware.rs
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    cookie::Cookie,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{
        header,
        uri::{PathAndQuery, Uri},
    },
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;

use crate::auth::session::{RefreshedSession, SessionService, REFRESH_COOKIE, SESSION_COOKIE};
use crate::config::tenancy::TenancySettings;
use crate::tenancy::decision::{decide, RouteDecision};
use crate::tenancy::hostname::{classify, HostClass};
use crate::tenancy::rewrite::is_excluded_path;

/// Per-request tenant resolution: classify the host, refresh the
/// session cookies, then pass through, redirect or rewrite onto the
/// tenant-scoped route. Exactly one of those per request.
pub struct TenantRouting {
    production: bool,
}

/// The tenant a request was rewritten onto. Only present when the
/// middleware performed a rewrite, so tenant-scoped handlers can
/// reject direct hits on root-domain paths that merely look like a
/// slug.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTenant {
    pub slug: String,
}

impl TenantRouting {
    pub fn new(production: bool) -> Self {
        Self { production }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TenantRouting
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TenantRoutingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TenantRoutingService {
            service: Rc::new(service),
            production: self.production,
        }))
    }
}

pub struct TenantRoutingService<S> {
    service: Rc<S>,
    production: bool,
}

/// The effective request host, preferring the trusted forwarded-host
/// header over the socket host for reverse-proxy deployments.
fn effective_host(req: &ServiceRequest) -> String {
    req.headers()
        .get("x-forwarded-host")
        .or_else(|| req.headers().get(header::HOST))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default()
}

fn session_cookie_pair(session: &RefreshedSession) -> (Cookie<'static>, Cookie<'static>) {
    let access = Cookie::build(SESSION_COOKIE, session.access_token.clone())
        .path("/")
        .http_only(true)
        .finish();
    let refresh = Cookie::build(REFRESH_COOKIE, session.refresh_token.clone())
        .path("/")
        .http_only(true)
        .finish();
    (access, refresh)
}

impl<S, B> Service<ServiceRequest> for TenantRoutingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let production = self.production;

        Box::pin(async move {
            let path = req.path().to_string();

            // Asset and API requests skip tenant handling entirely,
            // including the session refresh I/O.
            if is_excluded_path(&path) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let host = effective_host(&req);
            let mut class = match req.app_data::<web::Data<TenancySettings>>() {
                Some(settings) => classify(&host, settings),
                None => HostClass::Unrecognized,
            };

            // In production a host we cannot place is served the root
            // site; locally it passes through untouched so malformed
            // dev hostnames stay debuggable.
            if class == HostClass::Unrecognized && production {
                tracing::warn!("Unrecognized host {:?}, falling back to root", host);
                class = HostClass::Root;
            }

            let mut session: Option<RefreshedSession> = None;
            if let Some(sessions) = req.app_data::<web::Data<SessionService>>() {
                let access = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());
                let refresh = req.cookie(REFRESH_COOKIE).map(|c| c.value().to_string());
                match sessions.refresh(access.as_deref(), refresh.as_deref()).await {
                    Ok(refreshed) => session = refreshed,
                    Err(e) => {
                        // An auth outage must not take down routing;
                        // the request continues unauthenticated.
                        tracing::error!("Session refresh failed: {}", e);
                    }
                }
            }

            // Mirror the refreshed session onto the inbound request so
            // downstream reads within this request see fresh values.
            if let Some(refreshed) = &session {
                req.extensions_mut().insert(refreshed.clone());
            }

            let query = req.query_string().to_string();
            match decide(&class, &path, &query, session.is_some()) {
                RouteDecision::PassThrough => {
                    let mut res = service.call(req).await?;
                    attach_session_cookies(res.response_mut(), session.as_ref());
                    Ok(res.map_into_left_body())
                }
                RouteDecision::Redirect(target) => {
                    let mut response = HttpResponse::TemporaryRedirect()
                        .insert_header((header::LOCATION, target))
                        .finish();
                    attach_session_cookies(&mut response, session.as_ref());
                    Ok(req.into_response(response).map_into_right_body())
                }
                RouteDecision::Rewrite(internal) => {
                    if let Some(slug) = class.slug() {
                        req.extensions_mut().insert(ResolvedTenant {
                            slug: slug.to_string(),
                        });
                    }
                    match internal_uri(req.head().uri.clone(), &internal) {
                        Some(new_uri) => {
                            req.head_mut().uri = new_uri.clone();
                            req.match_info_mut().get_mut().update(&new_uri);
                        }
                        None => {
                            // A slug that cannot form a URI is treated
                            // like an unrecognized host.
                            tracing::warn!("Could not build internal path {:?}", internal);
                        }
                    }
                    let mut res = service.call(req).await?;
                    attach_session_cookies(res.response_mut(), session.as_ref());
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

fn internal_uri(original: Uri, internal: &str) -> Option<Uri> {
    let mut parts = original.into_parts();
    parts.path_and_query = PathAndQuery::from_maybe_shared(internal.as_bytes().to_vec()).ok();
    Uri::from_parts(parts).ok()
}

fn attach_session_cookies<T>(
    response: &mut HttpResponse<T>,
    session: Option<&RefreshedSession>,
) {
    if let Some(session) = session.filter(|s| s.rotated) {
        let (access, refresh) = session_cookie_pair(session);
        if response.add_cookie(&access).is_err() || response.add_cookie(&refresh).is_err() {
            tracing::error!("Failed to attach refreshed session cookies");
        }
    }
}
