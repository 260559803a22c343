// rest/routes/generate.rs - code generation from a natural-language prompt.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::review::{self, GenerateRequest};
use crate::AppContext;

pub async fn generate(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let code = review::run_generate(&ctx, body).await?;
    Ok(Json(json!({ "generated_code": code })))
}
