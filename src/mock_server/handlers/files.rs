//! File endpoint handlers.

use axum::{http::StatusCode, response::Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;

use super::{error, no_content, ok, MockRequest};
use crate::mock_server::state::MockState;

fn path(req: &MockRequest) -> Result<&str, Response> {
    req.query
        .get("path")
        .map(String::as_str)
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Missing 'path'"))
}

fn missing(path: &str) -> Response {
    error(StatusCode::NOT_FOUND, &format!("No such file: {path}"))
}

/// GET /system/files?path=&offset=&limit=
///
/// `offset` and `limit` are byte positions here, not pages.
pub fn read(state: &MockState, req: &MockRequest) -> Response {
    let path = match path(req) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let (offset, limit) = match (req.query_u64("offset", 0), req.query_u64("limit", 1024)) {
        (Ok(o), Ok(l)) => (o, l),
        (Err(resp), _) | (_, Err(resp)) => return resp,
    };
    let Some(contents) = state.files.get(path) else {
        return missing(path);
    };

    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(contents.len());
    let len = usize::try_from(limit).unwrap_or(usize::MAX);
    let end = start.saturating_add(len).min(contents.len());
    let window = contents.get(start..end).unwrap_or_default();

    ok(json!({ "data": STANDARD.encode(window) }))
}

/// PUT /system/files?path=
pub fn write(state: &mut MockState, req: &MockRequest) -> Response {
    let path = match path(req) {
        Ok(p) => p.to_string(),
        Err(resp) => return resp,
    };
    let Some(encoded) = req.body_str("data") else {
        return error(StatusCode::BAD_REQUEST, "Missing 'data'");
    };
    match STANDARD.decode(encoded) {
        Ok(bytes) => {
            state.files.insert(path, bytes);
            no_content()
        }
        Err(_) => error(StatusCode::BAD_REQUEST, "'data' is not base64"),
    }
}

/// DELETE /system/files?path=
pub fn clear(state: &mut MockState, req: &MockRequest) -> Response {
    let path = match path(req) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match state.files.remove(path) {
        Some(_) => no_content(),
        None => missing(path),
    }
}

/// POST /system/files:size?path=
pub fn size(state: &MockState, req: &MockRequest) -> Response {
    let path = match path(req) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match state.files.get(path) {
        Some(contents) => ok(json!({ "size": contents.len() })),
        None => missing(path),
    }
}
