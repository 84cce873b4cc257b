//! Email history, license, stats and graph handlers.

use axum::{http::StatusCode, response::Response};
use serde_json::{json, Value};

use super::{error, no_content, ok, paged, MockRequest};
use crate::mock_server::state::MockState;

const STAT_FILTERS: [&str; 3] = ["name", "namespace", "legend"];

/// GET /email/history
///
/// Returns `{"items": [...]}`, plus `total` when `total=true`.
pub fn list_emails(state: &MockState, req: &MockRequest) -> Response {
    let (offset, limit) = match req.page() {
        Ok(page) => page,
        Err(resp) => return resp,
    };
    let records: Vec<&Value> = state
        .emails
        .values()
        .filter(|record| match req.query.get("filter") {
            Some(needle) => record.to_string().contains(needle.as_str()),
            None => true,
        })
        .collect();

    let mut body = json!({ "items": paged(&records, offset, limit) });
    if req.query.get("total").map(String::as_str) == Some("true") {
        body["total"] = json!(records.len());
    }
    ok(body)
}

/// GET /email/history/{id}
pub fn get_email(state: &MockState, raw_id: &str) -> Response {
    let record = raw_id.parse::<u64>().ok().and_then(|id| state.emails.get(&id));
    match record {
        Some(record) => ok(json!({ "email": record })),
        None => error(StatusCode::NOT_FOUND, &format!("No such email: {raw_id}")),
    }
}

/// GET /license
pub fn get_license(state: &MockState) -> Response {
    ok(state.license.clone())
}

/// PUT /license/key
pub fn import_license_key(state: &mut MockState, req: &MockRequest) -> Response {
    match req.body_str("key") {
        Some(key) if !key.is_empty() => {
            state.license_key = Some(key.to_string());
            no_content()
        }
        _ => error(StatusCode::BAD_REQUEST, "Missing 'key'"),
    }
}

fn stat_filters(req: &MockRequest) -> Vec<(&'static str, Option<&String>)> {
    STAT_FILTERS
        .iter()
        .map(|field| (*field, req.query.get(&format!("filter[{field}]"))))
        .collect()
}

/// GET /stats
pub fn list_stats(state: &MockState, req: &MockRequest) -> Response {
    let (offset, limit) = match req.page() {
        Ok(page) => page,
        Err(resp) => return resp,
    };
    let matching: Vec<&Value> = state
        .matching_stats(&stat_filters(req))
        .into_iter()
        .filter_map(|i| state.stats.get(i))
        .collect();
    ok(json!(paged(&matching, offset, limit)))
}

/// DELETE /stats
pub fn clear_stats(state: &mut MockState, req: &MockRequest) -> Response {
    let matching = state.matching_stats(&stat_filters(req));
    let affected = matching.len();
    let mut index = 0;
    state.stats.retain(|_| {
        let keep = !matching.contains(&index);
        index += 1;
        keep
    });
    ok(json!({ "affected": affected }))
}

/// GET /graphs
pub fn list_graphs(state: &MockState, req: &MockRequest) -> Response {
    let (offset, limit) = match req.page() {
        Ok(page) => page,
        Err(resp) => return resp,
    };
    let graphs: Vec<Value> = state.graphs.keys().map(|id| json!({ "id": id })).collect();
    ok(json!(paged(&graphs, offset, limit)))
}

/// GET /graphs/{id}
pub fn export_graph(state: &MockState, id: &str) -> Response {
    match state.graphs.get(id) {
        Some(data) => ok(json!({ "data": data })),
        None => error(StatusCode::NOT_FOUND, &format!("No such graph: {id}")),
    }
}

/// DELETE /graphs/{id}
pub fn clear_graph(state: &mut MockState, id: &str) -> Response {
    match state.graphs.get_mut(id) {
        Some(data) => {
            data.clear();
            no_content()
        }
        None => error(StatusCode::NOT_FOUND, &format!("No such graph: {id}")),
    }
}
