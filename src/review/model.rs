// SPDX-License-Identifier: MIT
//! Wire types for the review pipeline.

use serde::{Deserialize, Serialize};

use crate::shaper::ReviewStats;

/// Request body shared by review, rewrite, tests, docs, security-scan and
/// refactor endpoints. The original frontend sent several shapes; fields
/// the client omits simply default.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub user_type: String,
    #[serde(default = "default_student_name")]
    pub student_name: String,
    /// Account name used for history attribution; falls back to
    /// `student_name` when absent.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    /// Remote model id; None selects the default model.
    #[serde(default)]
    pub model: Option<String>,
}

fn default_language() -> String {
    "python".to_string()
}

fn default_student_name() -> String {
    "Anonymous".to_string()
}

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// The fixed-shape result every pipeline action produces. Derived per
/// request; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub review: String,
    pub stats: ReviewStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewritten_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_original: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_rewritten: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plagiarism: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_stats: Option<u64>,
}
