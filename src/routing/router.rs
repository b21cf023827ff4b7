//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store routes in registration order
//! - Compose middleware into each handler at registration time
//! - Find the first route matching method and path
//! - Inject path and query params, or fall back to the not-found handler
//!
//! # Design Decisions
//! - Two phases: BUILD (`&mut self` registration) then SERVE (`&self` dispatch)
//! - O(n) linear scan; first match wins, no priorities beyond order
//! - Method mismatch keeps scanning rather than short-circuiting
//! - Middleware added later never reaches routes registered earlier

use std::fmt;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use futures_util::future::BoxFuture;
use percent_encoding::percent_decode_str;

use crate::config::RouterConfig;
use crate::http::handler::{boxed, BoxHandler, Handler, NotFound};
use crate::http::middleware::{compose, AccessLog, BoxMiddleware, Middleware};
use crate::http::request::{PathParams, QueryParams};
use crate::routing::matcher::{PatternError, RoutePattern};
use crate::routing::Params;

/// One registered binding. Immutable once created.
pub struct Route {
    method: Method,
    pattern: RoutePattern,
    handler: BoxHandler,
}

impl Route {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Outcome of [`Router::dispatch`].
///
/// `path_params` is `Some` exactly when a route matched; `query_params` is
/// `Some` when a route matched and the raw query was non-empty.
pub struct Resolved {
    pub path_params: Option<Params>,
    pub query_params: Option<Params>,
    pub handler: BoxHandler,
}

impl Resolved {
    pub fn is_match(&self) -> bool {
        self.path_params.is_some()
    }
}

/// Method + path request router.
///
/// Register routes and middleware first, then share the router (for
/// example via [`Router::into_service`]) for serving. Nothing stops
/// registration after serving has begun, but `&mut self` registration
/// makes that impossible once the router sits behind an `Arc`.
pub struct Router {
    routes: Vec<Route>,
    middlewares: Vec<BoxMiddleware>,
    strict_patterns: bool,
    /// Invoked when no route matches. Replaceable at any time before serving.
    pub not_found_handler: BoxHandler,
}

impl Router {
    /// Create an empty router whose not-found handler answers
    /// `404 Not Found` through the access log.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            middlewares: Vec::new(),
            strict_patterns: false,
            not_found_handler: AccessLog::new().wrap(boxed(NotFound::default())),
        }
    }

    /// Create a router from configuration.
    ///
    /// With access logging enabled, the access log is installed as the
    /// first middleware so every later route is logged.
    pub fn from_config(config: &RouterConfig) -> Self {
        let status = match StatusCode::from_u16(config.not_found.status) {
            Ok(s) if s.is_client_error() || s.is_server_error() => s,
            _ => {
                tracing::warn!(
                    status = config.not_found.status,
                    "not_found.status is not a 4xx or 5xx code, using 404"
                );
                StatusCode::NOT_FOUND
            }
        };
        let not_found = boxed(NotFound::new(status, config.not_found.body.clone()));

        let mut router = Self {
            routes: Vec::new(),
            middlewares: Vec::new(),
            strict_patterns: config.strict_patterns,
            not_found_handler: not_found.clone(),
        };

        if config.access_log.enabled {
            let access_log = AccessLog::new();
            router.not_found_handler = access_log.wrap(not_found);
            router.use_middleware(access_log);
        }
        router
    }

    /// Toggle validation of patterns in the verb registration methods.
    pub fn set_strict_patterns(&mut self, strict: bool) -> &mut Self {
        self.strict_patterns = strict;
        self
    }

    /// Append a middleware. Only routes registered afterwards receive it.
    pub fn use_middleware<M: Middleware>(&mut self, middleware: M) -> &mut Self {
        self.middlewares.push(std::sync::Arc::new(middleware));
        self
    }

    pub fn get<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.route(Method::GET, path, handler)
    }

    pub fn post<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.route(Method::POST, path, handler)
    }

    pub fn put<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.route(Method::PUT, path, handler)
    }

    pub fn delete<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.route(Method::DELETE, path, handler)
    }

    pub fn patch<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.route(Method::PATCH, path, handler)
    }

    /// Register a route for any method.
    ///
    /// Patterns are not validated unless strict mode is on, in which case
    /// an invalid pattern is logged and skipped.
    pub fn route<H: Handler>(&mut self, method: Method, path: &str, handler: H) -> &mut Self {
        let pattern = RoutePattern::new(path);
        if self.strict_patterns {
            if let Err(e) = pattern.validate() {
                tracing::warn!(method = %method, pattern = %pattern, error = %e, "Skipping invalid route");
                return self;
            }
        }
        self.push(method, pattern, boxed(handler));
        self
    }

    /// Register a route, rejecting malformed patterns regardless of mode.
    pub fn try_route<H: Handler>(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, PatternError> {
        let pattern = RoutePattern::new(path);
        pattern.validate()?;
        self.push(method, pattern, boxed(handler));
        Ok(self)
    }

    fn push(&mut self, method: Method, pattern: RoutePattern, handler: BoxHandler) {
        let handler = compose(&self.middlewares, handler);
        tracing::debug!(
            method = %method,
            pattern = %pattern,
            middlewares = self.middlewares.len(),
            "Route registered"
        );
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
    }

    /// Registered routes in match order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Select the handler for a request without invoking it.
    ///
    /// `path` is matched as given; [`Handler::call`] percent-decodes the
    /// request path before calling this. `raw_query` is the text after `?`
    /// and is never decoded; `None` and `Some("")` both mean no query
    /// parameters.
    pub fn dispatch(&self, method: &Method, path: &str, raw_query: Option<&str>) -> Resolved {
        for route in &self.routes {
            if route.method != *method {
                continue;
            }
            let Some(path_params) = route.pattern.matches(path) else {
                continue;
            };

            tracing::trace!(method = %method, path = %path, pattern = %route.pattern, "Route matched");
            let query_params = raw_query.filter(|q| !q.is_empty()).map(Params::from_query);
            return Resolved {
                path_params: Some(path_params),
                query_params,
                handler: route.handler.clone(),
            };
        }

        tracing::debug!(method = %method, path = %path, "No route matched");
        Resolved {
            path_params: None,
            query_params: None,
            handler: self.not_found_handler.clone(),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("middlewares", &self.middlewares.len())
            .field("strict_patterns", &self.strict_patterns)
            .finish_non_exhaustive()
    }
}

/// Matching runs on the percent-decoded path, so captures hold decoded
/// values. An encoded `%2F` decodes to `/` and therefore adds a segment.
/// Invalid UTF-8 after decoding is replaced, not rejected.
impl Handler for Router {
    fn call(&self, mut req: Request<Body>) -> BoxFuture<'static, Response> {
        let resolved = {
            let path = percent_decode_str(req.uri().path()).decode_utf8_lossy();
            self.dispatch(req.method(), &path, req.uri().query())
        };

        if let Some(params) = resolved.path_params {
            req.extensions_mut().insert(PathParams(params));
        }
        if let Some(params) = resolved.query_params {
            req.extensions_mut().insert(QueryParams(params));
        }
        resolved.handler.call(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    use crate::http::middleware::access_log::capture::capturing_dispatch;
    use crate::http::middleware::from_fn;
    use crate::http::request::RequestParamsExt;

    fn request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn labelled(label: &'static str) -> impl Handler {
        move |_req: Request<Body>| async move { label }
    }

    #[tokio::test]
    async fn test_path_params_injected() {
        let mut router = Router::new();
        router.get("/hello/:name", |req: Request<Body>| async move {
            assert!(req.query_params().is_none());
            format!("Hello {}!", req.path_param("name").unwrap_or_default())
        });

        let response = router.call(request(Method::GET, "/hello/John")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Hello John!");
    }

    #[tokio::test]
    async fn test_path_and_query_params() {
        let mut router = Router::new();
        router.get("/category/:category/:product", |req: Request<Body>| async move {
            let path = req.path_params().unwrap();
            let query = req.query_params().unwrap();
            format!("{} {} {}", &path["category"], &path["product"], &query["color"])
        });

        let response = router
            .call(request(Method::GET, "/category/shoes/sneaker-42?color=red"))
            .await;
        assert_eq!(body_string(response).await, "shoes sneaker-42 red");
    }

    #[tokio::test]
    async fn test_literal_route_gets_empty_path_params() {
        let mut router = Router::new();
        router.get("/hello", |req: Request<Body>| async move {
            match req.path_params() {
                Some(p) if p.is_empty() => "empty",
                Some(_) => "filled",
                None => "absent",
            }
        });

        let response = router.call(request(Method::GET, "/hello?")).await;
        assert_eq!(body_string(response).await, "empty");
    }

    #[test]
    fn test_dispatch_query_slot_presence() {
        let mut router = Router::new();
        router.get("/x", labelled("x"));

        let resolved = router.dispatch(&Method::GET, "/x", None);
        assert!(resolved.is_match());
        assert!(resolved.query_params.is_none());

        let resolved = router.dispatch(&Method::GET, "/x", Some(""));
        assert!(resolved.query_params.is_none());

        let resolved = router.dispatch(&Method::GET, "/x", Some("a=1&a=2"));
        assert_eq!(resolved.query_params.unwrap().get("a"), Some("2"));
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let mut router = Router::new();
        router.get("/dup", labelled("first"));
        router.get("/dup", labelled("second"));

        let response = router.call(request(Method::GET, "/dup")).await;
        assert_eq!(body_string(response).await, "first");
    }

    #[tokio::test]
    async fn test_broader_pattern_shadows_later_literal() {
        let mut router = Router::new();
        router.get("/users/:id", labelled("capture"));
        router.get("/users/me", labelled("literal"));

        let response = router.call(request(Method::GET, "/users/me")).await;
        assert_eq!(body_string(response).await, "capture");
    }

    #[tokio::test]
    async fn test_method_mismatch_continues_scan() {
        let mut router = Router::new();
        router.get("/x", labelled("get"));
        router.post("/x", labelled("post"));

        let response = router.call(request(Method::POST, "/x")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "post");

        let response = router.call(request(Method::PUT, "/x")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_all_verbs() {
        let mut router = Router::new();
        router
            .get("/v", labelled("GET"))
            .post("/v", labelled("POST"))
            .put("/v", labelled("PUT"))
            .delete("/v", labelled("DELETE"))
            .patch("/v", labelled("PATCH"))
            .route(Method::OPTIONS, "/v", labelled("OPTIONS"));

        for method in ["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"] {
            let method = Method::from_bytes(method.as_bytes()).unwrap();
            let response = router.call(request(method.clone(), "/v")).await;
            assert_eq!(body_string(response).await, method.as_str());
        }
    }

    #[tokio::test]
    async fn test_no_routes_falls_back() {
        let router = Router::new();
        let resolved = router.dispatch(&Method::DELETE, "/anything", Some("a=1"));
        assert!(!resolved.is_match());
        assert!(resolved.query_params.is_none());

        let response = router.call(request(Method::DELETE, "/anything")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "404 Not Found");
    }

    #[tokio::test]
    async fn test_replace_not_found_handler() {
        let mut router = Router::new();
        router.not_found_handler = boxed(|req: Request<Body>| async move {
            assert!(req.path_params().is_none());
            (StatusCode::GONE, "gone")
        });

        let response = router.call(request(Method::GET, "/missing")).await;
        assert_eq!(response.status(), StatusCode::GONE);
        assert_eq!(body_string(response).await, "gone");
    }

    #[tokio::test]
    async fn test_middleware_snapshot_at_registration() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let mut router = Router::new();

        router.get("/before", labelled("before"));
        let log = seen.clone();
        router.use_middleware(from_fn(move |req: Request<Body>, next: BoxHandler| {
            log.lock().unwrap().push(req.uri().path().to_string());
            next.call(req)
        }));
        router.get("/after", labelled("after"));

        router.call(request(Method::GET, "/before")).await;
        router.call(request(Method::GET, "/after")).await;

        assert_eq!(*seen.lock().unwrap(), vec!["/after".to_string()]);
    }

    #[tokio::test]
    async fn test_middleware_sees_injected_params() {
        let mut router = Router::new();
        router.use_middleware(from_fn(|req: Request<Body>, next: BoxHandler| async move {
            if req.query_param("token") == Some("secret") {
                next.call(req).await
            } else {
                (StatusCode::UNAUTHORIZED, "denied").into_response()
            }
        }));
        router.get("/private/:id", labelled("private"));

        let response = router.call(request(Method::GET, "/private/1")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = router
            .call(request(Method::GET, "/private/1?token=secret"))
            .await;
        assert_eq!(body_string(response).await, "private");
    }

    #[test]
    fn test_strict_mode_skips_invalid_patterns() {
        let mut router = Router::new();
        router.set_strict_patterns(true);
        router.get("/items/:", labelled("bad"));
        router.get("/items/:id", labelled("good"));

        let patterns: Vec<_> = router.routes().map(|r| r.pattern().as_str()).collect();
        assert_eq!(patterns, vec!["/items/:id"]);
    }

    #[test]
    fn test_permissive_mode_keeps_invalid_patterns() {
        let mut router = Router::new();
        router.get("/items/:", labelled("bad"));

        let resolved = router.dispatch(&Method::GET, "/items/9", None);
        assert_eq!(resolved.path_params.unwrap().get(""), Some("9"));
    }

    #[test]
    fn test_try_route_rejects() {
        let mut router = Router::new();
        let err = router
            .try_route(Method::GET, "/:a/:a", labelled("dup"))
            .unwrap_err();
        assert!(matches!(err, PatternError::DuplicateCapture { .. }));
        assert_eq!(router.routes().count(), 0);

        router
            .try_route(Method::GET, "/:a/:b", labelled("ok"))
            .unwrap();
        assert_eq!(*router.routes().next().unwrap().method(), Method::GET);
    }

    #[tokio::test]
    async fn test_from_config_not_found() {
        let mut config = RouterConfig::default();
        config.not_found.status = 410;
        config.not_found.body = "gone".into();
        config.access_log.enabled = false;

        let router = Router::from_config(&config);
        let response = router.call(request(Method::GET, "/")).await;
        assert_eq!(response.status(), StatusCode::GONE);
        assert_eq!(body_string(response).await, "gone");
    }

    #[tokio::test]
    async fn test_path_is_percent_decoded_before_matching() {
        let mut router = Router::new();
        router.get("/hello/:name", |req: Request<Body>| async move {
            req.path_param("name").unwrap_or_default().to_string()
        });
        router.get("/a/b", labelled("split"));

        let response = router.call(request(Method::GET, "/hello/John%20Doe")).await;
        assert_eq!(body_string(response).await, "John Doe");

        let response = router.call(request(Method::GET, "/a%2Fb")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "split");

        let response = router.call(request(Method::GET, "/hello/a%2Fb")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_query_is_not_decoded() {
        let mut router = Router::new();
        router.get("/search", |req: Request<Body>| async move {
            req.query_param("q").unwrap_or_default().to_string()
        });

        let response = router.call(request(Method::GET, "/search?q=a%20b")).await;
        assert_eq!(body_string(response).await, "a%20b");
    }

    #[tokio::test]
    async fn test_not_found_logs_through_subscriber_installed_later() {
        let router = Router::new();

        let (dispatch, captured) = capturing_dispatch();
        let _guard = tracing::dispatcher::set_default(&dispatch);
        let response = router.call(request(Method::GET, "/missing")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let logs = captured.contents();
        assert!(logs.contains("status=404"), "{logs}");
        assert!(logs.contains("path=/missing"), "{logs}");
    }

    #[tokio::test]
    async fn test_from_config_rejects_non_error_status() {
        let mut config = RouterConfig::default();
        config.not_found.status = 200;
        config.access_log.enabled = false;

        let (dispatch, captured) = capturing_dispatch();
        let _guard = tracing::dispatcher::set_default(&dispatch);
        let router = Router::from_config(&config);

        let response = router.call(request(Method::GET, "/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(captured.contents().contains("using 404"), "{}", captured.contents());
    }
}
