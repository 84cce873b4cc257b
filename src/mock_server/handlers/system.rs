//! System endpoint handlers: power, clock, versions, updates, DNS cache.

use axum::{http::StatusCode, response::Response};
use chrono::NaiveDateTime;
use serde_json::{json, Value};

use super::{error, no_content, ok, MockRequest};
use crate::mock_server::state::MockState;

/// POST /system:reboot
pub fn reboot(state: &mut MockState) -> Response {
    state.reboots += 1;
    state.uptime = 0;
    no_content()
}

/// POST /system:shutdown
pub fn shut_down(state: &mut MockState) -> Response {
    state.shut_down = true;
    no_content()
}

/// GET /system/time
pub fn get_time(state: &MockState) -> Response {
    ok(json!({ "time": state.time }))
}

/// PUT /system/time
pub fn set_time(state: &mut MockState, req: &MockRequest) -> Response {
    let Some(time) = req.body_str("time") else {
        return error(StatusCode::BAD_REQUEST, "Missing 'time'");
    };
    if NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%SZ").is_err() {
        return error(StatusCode::BAD_REQUEST, "Invalid time format");
    }
    state.time = time.to_string();
    no_content()
}

/// GET /system/uptime
pub fn get_uptime(state: &MockState) -> Response {
    ok(json!({ "uptime": state.uptime }))
}

/// GET /system/versions/current
pub fn current_version(state: &MockState) -> Response {
    ok(json!({ "version": state.version }))
}

/// GET /system/versions/latest
pub fn latest_versions(state: &MockState) -> Response {
    ok(Value::Array(state.latest_versions.clone()))
}

/// GET /system/update
///
/// The real appliance answers 500 when nothing is in progress.
pub fn update_status(state: &MockState) -> Response {
    match &state.update {
        Some(status) => ok(status.clone()),
        None => error(StatusCode::INTERNAL_SERVER_ERROR, "No update in progress"),
    }
}

/// DELETE /system/update
pub fn cancel_update(state: &mut MockState) -> Response {
    match state.update.take() {
        Some(_) => no_content(),
        None => error(StatusCode::INTERNAL_SERVER_ERROR, "No update in progress"),
    }
}

/// POST /system/update:download and /system/update:install
pub fn start_update(state: &mut MockState, req: &MockRequest, phase: &str) -> Response {
    let Some(version) = req.body_str("version") else {
        return error(StatusCode::BAD_REQUEST, "Missing 'version'");
    };
    let known = state
        .latest_versions
        .iter()
        .any(|v| v.get("version").and_then(Value::as_str) == Some(version));
    if !known {
        return error(StatusCode::NOT_FOUND, &format!("Unknown version {version}"));
    }
    state.update = Some(json!({ "version": version, "status": phase }));
    no_content()
}

/// DELETE /system/dns/cache
pub fn clear_dns_cache(state: &mut MockState, req: &MockRequest) -> Response {
    match req.query.get("filter[name]") {
        Some(name) => state.dns_cache.retain(|cached| cached != name),
        None => state.dns_cache.clear(),
    }
    no_content()
}
