// rest/routes/snippets.rs - snippet library endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppContext;

#[derive(Deserialize)]
pub struct SaveSnippetRequest {
    #[serde(default = "default_username")]
    pub username: String,
    pub title: String,
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_username() -> String {
    "anonymous".to_string()
}

fn default_language() -> String {
    "python".to_string()
}

pub async fn save(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<SaveSnippetRequest>,
) -> Result<Json<Value>, ApiError> {
    if body.code.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Code cannot be empty".to_string()));
    }
    let snippet = ctx
        .snippets
        .save(&body.username, &body.title, &body.code, &body.language)
        .await;
    Ok(Json(json!({
        "message": "Snippet saved",
        "snippet": snippet,
    })))
}

pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    Path(user): Path<String>,
) -> Json<Value> {
    let snippets = ctx.snippets.list(&user).await;
    Json(json!({ "snippets": snippets }))
}
