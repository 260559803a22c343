// rest/routes/ocr.rs - image-to-code extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppContext;

pub async fn extract(
    State(ctx): State<Arc<AppContext>>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let image = read_file_field(multipart).await?;
    let text = ctx.ocr.extract(&image).await?;
    Ok(Json(json!({ "extracted_code": text })))
}

/// Pull the uploaded file out of the multipart body: the field named
/// "file" if present, otherwise the first field carrying data.
pub(super) async fn read_file_field(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    let mut first: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {e}")))?
    {
        let is_file = field.name() == Some("file");
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::InvalidRequest(format!("malformed multipart body: {e}")))?;
        if is_file {
            return Ok(bytes.to_vec());
        }
        if first.is_none() && !bytes.is_empty() {
            first = Some(bytes.to_vec());
        }
    }
    first.ok_or_else(|| ApiError::InvalidRequest("no file uploaded".to_string()))
}
