// rest/routes/dashboard.rs - analytics snapshot and admin resets.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppContext;

pub async fn dashboard_data(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let dash = ctx.usage.dashboard().await;
    Json(json!({
        "labels": dash.labels,
        "data": dash.data,
    }))
}

pub async fn reset_plagiarism(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    ctx.plagiarism.reset().await;
    Json(json!({ "message": "Database reset successful." }))
}
