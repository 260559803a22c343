use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppContext;

pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let uptime = ctx.started_at.elapsed().as_secs();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime,
        "actions_total": ctx.metrics.actions(),
        "upstream_failures": ctx.metrics.failures(),
        "services": {
            "gateway": if ctx.gateway.configured() { "configured" } else { "unconfigured" },
            "ocr": if ctx.ocr.available() { "available" } else { "unavailable" },
        },
    }))
}
