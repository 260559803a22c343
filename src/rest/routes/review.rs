// rest/routes/review.rs - code-bearing pipeline endpoints.
//
// One thin handler per action; everything funnels through `review::run`.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::prompt::ReviewAction;
use crate::review::{self, ReviewOutcome, ReviewRequest};
use crate::AppContext;

async fn run_action(
    ctx: Arc<AppContext>,
    action: ReviewAction,
    body: ReviewRequest,
) -> Result<Json<ReviewOutcome>, ApiError> {
    review::run(&ctx, action, body).await.map(Json)
}

pub async fn review(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    run_action(ctx, ReviewAction::Review, body).await
}

pub async fn rewrite(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    run_action(ctx, ReviewAction::Rewrite, body).await
}

pub async fn tests(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    run_action(ctx, ReviewAction::Tests, body).await
}

pub async fn docs(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    run_action(ctx, ReviewAction::Docs, body).await
}

pub async fn security_scan(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    run_action(ctx, ReviewAction::SecurityScan, body).await
}

pub async fn refactor(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ReviewRequest>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    run_action(ctx, ReviewAction::Refactor, body).await
}
