// rest/routes/history.rs - per-user version history.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppContext;

pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    Path(user): Path<String>,
) -> Json<Value> {
    let entries = ctx.history.list(&user).await;
    Json(json!({ "history": entries }))
}
