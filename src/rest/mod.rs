// rest/mod.rs - public REST API server.
//
// Axum HTTP server bridging the JSON surface to the request pipeline.
// All state rides in `Arc<AppContext>`; CORS is wide open because the
// SPA may be served from anywhere during development.

pub mod routes;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("REST API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        // Health (no auth)
        .route("/api/health", get(routes::health::health))
        // Auth
        .route("/api/login", post(routes::auth::login))
        .route("/api/logout", post(routes::auth::logout))
        // Review pipeline
        .route("/api/review", post(routes::review::review))
        .route("/api/rewrite", post(routes::review::rewrite))
        .route("/api/tests", post(routes::review::tests))
        .route("/api/docs", post(routes::review::docs))
        .route("/api/security-scan", post(routes::review::security_scan))
        .route("/api/refactor", post(routes::review::refactor))
        .route("/api/generate", post(routes::generate::generate))
        // Collections
        .route("/api/snippets/save", post(routes::snippets::save))
        .route("/api/snippets/{user}", get(routes::snippets::list))
        .route("/api/history/{user}", get(routes::history::list))
        .route("/api/dashboard-data", get(routes::dashboard::dashboard_data))
        .route(
            "/api/reset-plagiarism",
            post(routes::dashboard::reset_plagiarism),
        )
        // Models
        .route("/api/models", get(routes::models::list_models))
        // Uploads
        .route("/api/ocr", post(routes::ocr::extract))
        .route("/api/upload-policy", post(routes::policy::upload))
        // Downloads
        .route("/api/download/summary", post(routes::download::summary))
        .route("/api/download/report", post(routes::download::report))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}
