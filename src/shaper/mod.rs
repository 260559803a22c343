// SPDX-License-Identifier: MIT
//! Response shaper.
//!
//! Converts the model's free-text markdown into the fixed JSON fields the
//! UI consumes. There is no structural parsing: severity counts come from
//! case-insensitive header matches, and the rewritten code is the first
//! fenced block after `## Rewritten Code`. A response that ignores the
//! header contract yields all-zero stats rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CRITICAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^###\s*Critical").unwrap());
static HIGH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^###\s*High Priority").unwrap());
static MEDIUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^###\s*Medium Priority").unwrap());
static LOW_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^###\s*Low Priority").unwrap());
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[a-zA-Z0-9_+#.-]*\s*\n([\s\S]+?)\n?\s*```").unwrap());

/// Marker for the code section of a rewrite response.
const REWRITE_HEADER: &str = "## Rewritten Code";

/// Placeholder returned when a rewrite response has no fenced block.
pub const NO_CODE_EXTRACTED: &str = "Could not extract rewritten code.";

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Severity counts extracted from the review markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

/// Count the four fixed severity headers in `review_text`.
pub fn extract_stats(review_text: &str) -> ReviewStats {
    ReviewStats {
        critical: CRITICAL_RE.find_iter(review_text).count() as u32,
        high: HIGH_RE.find_iter(review_text).count() as u32,
        medium: MEDIUM_RE.find_iter(review_text).count() as u32,
        low: LOW_RE.find_iter(review_text).count() as u32,
    }
}

// ─── Rewrite splitting ───────────────────────────────────────────────────────

/// A rewrite response split into its review prose and extracted code.
#[derive(Debug, Clone)]
pub struct RewriteParts {
    /// Everything before the `## Rewritten Code` header.
    pub review: String,
    /// Content of the first fenced block after the header, or
    /// [`NO_CODE_EXTRACTED`] when the model produced no fence.
    pub code: String,
}

/// Split a rewrite-style response into prose and code.
pub fn split_rewrite(response_text: &str) -> RewriteParts {
    let (review, tail) = match response_text.find(REWRITE_HEADER) {
        Some(idx) => (&response_text[..idx], &response_text[idx..]),
        // Header missing: treat the whole response as prose but still try
        // to salvage any fenced block in it.
        None => (response_text, response_text),
    };

    let code = FENCE_RE
        .captures(tail)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| NO_CODE_EXTRACTED.to_string());

    RewriteParts {
        review: review.trim_end().to_string(),
        code,
    }
}

/// Extract the first fenced code block from a generation response, falling
/// back to the trimmed full text when the model answered without a fence.
pub fn extract_generated_code(response_text: &str) -> String {
    FENCE_RE
        .captures(response_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| response_text.trim().to_string())
}
