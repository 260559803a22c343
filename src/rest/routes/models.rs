// rest/routes/models.rs - selectable model catalog.

use axum::Json;
use serde_json::{json, Value};

use crate::gateway::CompletionModel;

pub async fn list_models() -> Json<Value> {
    Json(json!({ "models": CompletionModel::catalog() }))
}
