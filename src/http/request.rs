//! Per-request parameter slots.
//!
//! # Responsibilities
//! - Carry path and query params from dispatch to the handler
//! - Keep the two sets in separate, collision-free slots
//! - Distinguish an absent slot from an empty one
//!
//! # Design Decisions
//! - Slots live in the request's typed extensions, keyed by newtype
//! - Nothing is shared between requests; each dispatch inserts fresh values

use std::ops::Deref;

use axum::http::Request;

use crate::routing::Params;

/// Captured path segments of the matched route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(pub Params);

/// Key/value pairs from the raw query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(pub Params);

impl Deref for PathParams {
    type Target = Params;

    fn deref(&self) -> &Params {
        &self.0
    }
}

impl Deref for QueryParams {
    type Target = Params;

    fn deref(&self) -> &Params {
        &self.0
    }
}

/// Read the parameter slots written by the router.
pub trait RequestParamsExt {
    /// `None` when the request was not dispatched through a matching route.
    fn path_params(&self) -> Option<&Params>;

    /// `None` when the request carried no (or an empty) query string.
    fn query_params(&self) -> Option<&Params>;

    fn path_param(&self, name: &str) -> Option<&str> {
        self.path_params().and_then(|p| p.get(name))
    }

    fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params().and_then(|p| p.get(name))
    }
}

impl<B> RequestParamsExt for Request<B> {
    fn path_params(&self) -> Option<&Params> {
        self.extensions().get::<PathParams>().map(|p| &p.0)
    }

    fn query_params(&self) -> Option<&Params> {
        self.extensions().get::<QueryParams>().map(|p| &p.0)
    }
}
