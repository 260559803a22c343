// rest/routes/policy.rs - policy document ingestion for enterprise reviews.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppContext;

pub async fn upload(
    State(ctx): State<Arc<AppContext>>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let bytes = super::ocr::read_file_field(multipart).await?;
    let text = String::from_utf8(bytes)
        .map_err(|_| ApiError::InvalidRequest("policy document must be UTF-8 text".to_string()))?;

    let count = ctx.policies.ingest(&text).await;
    Ok(Json(json!({
        "message": format!("Successfully indexed {count} policy segments."),
    })))
}
