//! HTTP request handlers for the mock server.
//!
//! Resource paths such as `/system:reboot` carry a colon mid-segment, so
//! requests are matched here on `(method, segments)` instead of through
//! the axum router.

mod config;
mod data;
mod files;
mod system;

use std::collections::HashMap;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use super::state::MockState;

/// A request with the `/api/{version}` prefix removed.
#[derive(Debug)]
pub struct MockRequest {
    pub method: Method,
    /// Percent-decoded path segments after the version.
    pub segments: Vec<String>,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

impl MockRequest {
    fn query_u64(&self, key: &str, default: u64) -> Result<u64, Response> {
        match self.query.get(key) {
            None => Ok(default),
            Some(v) => v
                .parse()
                .map_err(|_| error(StatusCode::BAD_REQUEST, &format!("'{key}' must be a number"))),
        }
    }

    fn body_str(&self, key: &str) -> Option<&str> {
        self.body.as_ref()?.get(key)?.as_str()
    }

    /// `(offset, limit)` with the page-index semantics of the real API.
    fn page(&self) -> Result<(usize, usize), Response> {
        let offset = self.query_u64("offset", 0)?;
        let limit = self.query_u64("limit", 5)?;
        if !(1..=10_000).contains(&limit) {
            return Err(error(StatusCode::BAD_REQUEST, "limit must be within 1..10000"));
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok((offset.saturating_mul(limit), limit))
    }
}

/// Dispatch a request against the state.
pub fn route(state: &mut MockState, req: &MockRequest) -> Response {
    let segments: Vec<&str> = req.segments.iter().map(String::as_str).collect();

    match (req.method.as_str(), segments.as_slice()) {
        ("POST", ["system:reboot"]) => system::reboot(state),
        ("POST", ["system:shutdown"]) => system::shut_down(state),
        ("GET", ["system", "time"]) => system::get_time(state),
        ("PUT", ["system", "time"]) => system::set_time(state, req),
        ("GET", ["system", "uptime"]) => system::get_uptime(state),
        ("GET", ["system", "versions", "current"]) => system::current_version(state),
        ("GET", ["system", "versions", "latest"]) => system::latest_versions(state),
        ("GET", ["system", "update"]) => system::update_status(state),
        ("DELETE", ["system", "update"]) => system::cancel_update(state),
        ("POST", ["system", "update:download"]) => system::start_update(state, req, "downloading"),
        ("POST", ["system", "update:install"]) => system::start_update(state, req, "installing"),
        ("DELETE", ["system", "dns", "cache"]) => system::clear_dns_cache(state, req),

        ("GET", ["system", "files"]) => files::read(state, req),
        ("PUT", ["system", "files"]) => files::write(state, req),
        ("DELETE", ["system", "files"]) => files::clear(state, req),
        ("POST", ["system", "files:size"]) => files::size(state, req),

        ("GET", ["config", "revisions"]) => config::list_revisions(state, req),
        ("GET", ["config", "revisions", id]) => config::get_revision(state, req, id),
        ("POST", ["config", "revisions", id]) => config::create_revision(state, req, id),

        ("GET", ["email", "history"]) => data::list_emails(state, req),
        ("GET", ["email", "history", id]) => data::get_email(state, id),

        ("GET", ["license"]) => data::get_license(state),
        ("POST", ["license:refresh"]) => no_content(),
        ("PUT", ["license", "key"]) => data::import_license_key(state, req),

        ("GET", ["stats"]) => data::list_stats(state, req),
        ("DELETE", ["stats"]) => data::clear_stats(state, req),

        ("GET", ["graphs"]) => data::list_graphs(state, req),
        ("GET", ["graphs", id]) => data::export_graph(state, id),
        ("DELETE", ["graphs", id]) => data::clear_graph(state, id),

        _ => error(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn ok(value: Value) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Error body in the appliance's `{"message": ...}` shape.
pub fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn paged<T: Clone>(items: &[T], offset: usize, limit: usize) -> Vec<T> {
    items.iter().skip(offset).take(limit).cloned().collect()
}
