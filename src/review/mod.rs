// SPDX-License-Identifier: MIT
//! Request orchestration: the pipeline a user action flows through.
//!
//! validate -> analytics -> plagiarism / policy context -> prompt ->
//! gateway -> shape -> history. Validation runs before anything touches
//! the gateway, so an empty submission never costs an upstream call.

pub mod complexity;
pub mod model;
pub mod plagiarism;

pub use model::{GenerateRequest, ReviewOutcome, ReviewRequest};

use tracing::{debug, info};

use crate::error::ApiError;
use crate::gateway::{CompletionModel, CompletionRequest};
use crate::prompt::{Persona, PromptBuilder, ReviewAction};
use crate::shaper;
use crate::AppContext;

/// Run a code-bearing action (everything except Generate).
pub async fn run(
    ctx: &AppContext,
    action: ReviewAction,
    req: ReviewRequest,
) -> Result<ReviewOutcome, ApiError> {
    if req.code.trim().is_empty() {
        return Err(ApiError::InvalidRequest("Code cannot be empty".to_string()));
    }
    let model = CompletionModel::parse(req.model.as_deref())?;
    let persona = Persona::parse(&req.user_type);

    ctx.metrics.inc_actions();

    // Student accounting and plagiarism only apply to the student persona.
    let (student_stats, plagiarism) = if persona == Persona::Student {
        let count = ctx.usage.increment(&req.student_name).await;
        let score = ctx.plagiarism.check(&req.code).await;
        (Some(count), Some(score))
    } else {
        (None, None)
    };

    // Enterprise and organisation reviews audit against uploaded policies.
    let policy_context = match persona {
        Persona::Enterprise | Persona::Organisation => ctx.policies.context_for(&req.code).await,
        _ => String::new(),
    };

    let prompt = PromptBuilder {
        action,
        persona,
        language: &req.language,
        input: &req.code,
        focus_areas: &req.focus_areas,
        policy_context: &policy_context,
    }
    .build();

    debug!(
        action = action.as_str(),
        persona = persona.as_str(),
        model = model.id(),
        "dispatching completion"
    );

    let request = if action.produces_code() {
        CompletionRequest::new(model, prompt)
            .with_temperature(0.4)
            .with_max_tokens(3000)
    } else {
        CompletionRequest::new(model, prompt)
    };

    let response_text = match ctx.gateway.complete(request).await {
        Ok(text) => text,
        Err(e) => {
            ctx.metrics.inc_upstream_failures();
            return Err(e);
        }
    };

    let outcome = shape_outcome(action, &req.code, &response_text, plagiarism, student_stats);

    let history_user = req.username.as_deref().unwrap_or(&req.student_name);
    let version = ctx.history.record(history_user, action.as_str()).await;
    info!(
        action = action.as_str(),
        user = history_user,
        version,
        critical = outcome.stats.critical,
        "action completed"
    );

    Ok(outcome)
}

/// Run a Generate action: natural-language prompt in, code out.
pub async fn run_generate(ctx: &AppContext, req: GenerateRequest) -> Result<String, ApiError> {
    if req.prompt.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "Prompt cannot be empty".to_string(),
        ));
    }
    let model = CompletionModel::parse(req.model.as_deref())?;
    let persona = Persona::parse(&req.user_type);

    ctx.metrics.inc_actions();

    let prompt = PromptBuilder {
        action: ReviewAction::Generate,
        persona,
        language: &req.language,
        input: &req.prompt,
        focus_areas: &[],
        policy_context: "",
    }
    .build();

    let request = CompletionRequest::new(model, prompt)
        .with_temperature(0.4)
        .with_max_tokens(3000);

    let response_text = match ctx.gateway.complete(request).await {
        Ok(text) => text,
        Err(e) => {
            ctx.metrics.inc_upstream_failures();
            return Err(e);
        }
    };

    Ok(shaper::extract_generated_code(&response_text))
}

/// Assemble the fixed-shape outcome from the raw completion text.
fn shape_outcome(
    action: ReviewAction,
    original_code: &str,
    response_text: &str,
    plagiarism: Option<String>,
    student_stats: Option<u64>,
) -> ReviewOutcome {
    if action.produces_code() {
        let parts = shaper::split_rewrite(response_text);
        let stats = shaper::extract_stats(&parts.review);
        let complexity_rewritten = (parts.code != shaper::NO_CODE_EXTRACTED)
            .then(|| complexity::estimate(&parts.code));
        ReviewOutcome {
            review: parts.review,
            stats,
            rewritten_code: Some(parts.code),
            complexity_original: Some(complexity::estimate(original_code)),
            complexity_rewritten,
            plagiarism,
            student_stats,
        }
    } else {
        let stats = shaper::extract_stats(response_text);
        let complexity_original = matches!(
            action,
            ReviewAction::Review | ReviewAction::SecurityScan
        )
        .then(|| complexity::estimate(original_code));
        ReviewOutcome {
            review: response_text.to_string(),
            stats,
            rewritten_code: None,
            complexity_original,
            complexity_rewritten: None,
            plagiarism,
            student_stats,
        }
    }
}
