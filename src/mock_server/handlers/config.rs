//! Configuration revision handlers.

use axum::{http::StatusCode, response::Response};
use serde_json::{json, Value};

use super::{error, ok, paged, MockRequest};
use crate::mock_server::state::MockState;
use crate::{ConfigParameter, ConfigRevision, RevisionId};

/// Resolve `HEAD` or a number to a stored id.
fn resolve(state: &MockState, raw: &str) -> Result<i64, Response> {
    let id: RevisionId = raw
        .parse()
        .map_err(|_| error(StatusCode::BAD_REQUEST, &format!("Invalid revision id {raw}")))?;
    let id = match id {
        RevisionId::Head => state.head_revision(),
        RevisionId::Number(n) => Some(n).filter(|n| state.revisions.contains_key(n)),
    };
    id.ok_or_else(|| error(StatusCode::NOT_FOUND, &format!("No such revision: {raw}")))
}

/// GET /config/revisions
///
/// Newest first.
pub fn list_revisions(state: &MockState, req: &MockRequest) -> Response {
    let (offset, limit) = match req.page() {
        Ok(page) => page,
        Err(resp) => return resp,
    };
    let newest_first: Vec<&ConfigRevision> = state.revisions.values().rev().collect();
    ok(json!(paged(&newest_first, offset, limit)))
}

/// GET /config/revisions/{id}?type=
pub fn get_revision(state: &MockState, req: &MockRequest, raw_id: &str) -> Response {
    if req.query.contains_key("type") && raw_id != "HEAD" && !raw_id.starts_with('-') {
        return error(
            StatusCode::BAD_REQUEST,
            "type can only be used with HEAD or a test configuration",
        );
    }
    match resolve(state, raw_id) {
        Ok(id) => match state.revisions.get(&id) {
            Some(revision) => {
                let mut revision = revision.clone();
                if let Some(t) = req.query.get("type").and_then(|t| t.parse::<i64>().ok()) {
                    revision.config_type = t.try_into().ok();
                }
                ok(json!(revision))
            }
            None => error(StatusCode::NOT_FOUND, &format!("No such revision: {raw_id}")),
        },
        Err(resp) => resp,
    }
}

/// POST /config/revisions/{id}
///
/// Stores the body as a new revision derived from `id`.
pub fn create_revision(state: &mut MockState, req: &MockRequest, raw_id: &str) -> Response {
    if state.head_revision().is_some() {
        if let Err(resp) = resolve(state, raw_id) {
            return resp;
        }
    }
    let config: Vec<ConfigParameter> = match req.body.as_ref().and_then(|b| b.get("config")) {
        Some(Value::Array(params)) => match serde_json::from_value(Value::Array(params.clone())) {
            Ok(config) => config,
            Err(_) => return error(StatusCode::BAD_REQUEST, "config entries must be objects"),
        },
        _ => return error(StatusCode::BAD_REQUEST, "Missing 'config'"),
    };
    let message = req.body_str("message").unwrap_or_default().to_string();

    let id = state.push_revision(config, message);
    ok(json!({ "id": id }))
}
