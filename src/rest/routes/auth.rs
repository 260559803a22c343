// rest/routes/auth.rs - login and logout.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::AppContext;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = ctx.sessions.login(&body.username, &body.password).await?;
    Ok(Json(json!({
        "token": session.token,
        "username": session.username,
        "role": session.role.as_str(),
        "message": "Login successful",
    })))
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub token: String,
}

pub async fn logout(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LogoutRequest>,
) -> Json<Value> {
    // Unknown tokens fall through silently so a repeated logout returns
    // the same success message.
    ctx.sessions.logout(&body.token).await;
    Json(json!({ "message": "Logout successful" }))
}
