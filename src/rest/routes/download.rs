// rest/routes/download.rs - binary document exports.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::export::{self, Document, ExportFormat};
use crate::shaper::ReviewStats;
use crate::AppContext;

#[derive(Deserialize)]
pub struct SummaryRequest {
    pub format: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub stats: Option<ReviewStats>,
    #[serde(default)]
    pub student_name: Option<String>,
}

#[derive(Deserialize)]
pub struct ReportRequest {
    pub format: String,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub rewritten_code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stats: Option<ReviewStats>,
    #[serde(default)]
    pub plagiarism: Option<String>,
}

pub async fn summary(
    State(_ctx): State<Arc<AppContext>>,
    Json(body): Json<SummaryRequest>,
) -> Result<Response, ApiError> {
    let format = ExportFormat::parse(&body.format)?;

    let mut doc = Document::new("Review Summary");
    if let Some(name) = &body.student_name {
        doc = doc.section("Student", name.clone());
    }
    if let Some(stats) = &body.stats {
        doc = doc.section("Severity Counts", render_stats(stats));
    }
    doc = doc.section("Review", body.review);

    let file = export::render(format, "review-summary", &doc)?;
    Ok(attachment(file))
}

pub async fn report(
    State(_ctx): State<Arc<AppContext>>,
    Json(body): Json<ReportRequest>,
) -> Result<Response, ApiError> {
    let format = ExportFormat::parse(&body.format)?;
    let language = body.language.unwrap_or_else(|| "unknown".to_string());

    let mut doc = Document::new("Code Review Report")
        .section("Language", language)
        .section("Review", body.review);
    if let Some(stats) = &body.stats {
        doc = doc.section("Severity Counts", render_stats(stats));
    }
    if !body.code.is_empty() {
        doc = doc.section("Original Code", body.code);
    }
    if let Some(code) = body.rewritten_code {
        doc = doc.section("Rewritten Code", code);
    }
    if let Some(score) = body.plagiarism {
        doc = doc.section("Plagiarism", score);
    }

    let file = export::render(format, "review-report", &doc)?;
    Ok(attachment(file))
}

fn render_stats(stats: &ReviewStats) -> String {
    format!(
        "critical: {}\nhigh: {}\nmedium: {}\nlow: {}",
        stats.critical, stats.high, stats.medium, stats.low
    )
}

fn attachment(file: export::ExportFile) -> Response {
    (
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}
