//! Integration tests for the review pipeline endpoints.
//! The gateway is scripted so every assertion is deterministic, and its
//! call counter proves validation happens before anything goes upstream.

use async_trait::async_trait;
use refiner::config::ServerConfig;
use refiner::error::ApiError;
use refiner::gateway::{CompletionRequest, LlmGateway};
use refiner::ocr::OcrEngine;
use refiner::AppContext;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Scripted gateway: canned response (or failure) plus a call counter.
struct ScriptedGateway {
    response: Result<String, String>,
    calls: AtomicU32,
}

impl ScriptedGateway {
    fn ok(response: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response.to_string()),
            calls: AtomicU32::new(0),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            calls: AtomicU32::new(0),
        })
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(msg) => Err(ApiError::Upstream(msg.clone())),
        }
    }

    fn configured(&self) -> bool {
        true
    }
}

async fn spawn_server(gateway: Arc<ScriptedGateway>) -> String {
    let dir = tempfile::TempDir::new().unwrap();
    let config = ServerConfig::new(
        Some(0),
        Some(dir.path().to_path_buf()),
        Some("error".to_string()),
        None,
    );
    let ctx = Arc::new(AppContext::new(
        config,
        gateway,
        OcrEngine::with_availability(false),
    ));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = refiner::rest::build_router(ctx);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

const REVIEW_MARKDOWN: &str = "## Overall Assessment\nDecent.\n\n\
### Critical Issues\nSQL injection in query builder.\n\n\
### Critical Issues\nSecrets committed to source.\n\n\
### High Priority\nNo input validation.\n";

#[tokio::test]
async fn review_counts_severity_headers() {
    let gateway = ScriptedGateway::ok(REVIEW_MARKDOWN);
    let base = spawn_server(gateway.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/review"))
        .json(&serde_json::json!({
            "code": "print(1)",
            "language": "python",
            "user_type": "developer",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["stats"]["critical"], 2);
    assert_eq!(body["stats"]["high"], 1);
    assert_eq!(body["stats"]["medium"], 0);
    assert_eq!(body["stats"]["low"], 0);
    assert!(body["review"].as_str().unwrap().contains("SQL injection"));
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn review_with_empty_code_never_reaches_the_gateway() {
    let gateway = ScriptedGateway::ok(REVIEW_MARKDOWN);
    let base = spawn_server(gateway.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/review"))
        .json(&serde_json::json!({ "code": "   \n", "user_type": "developer" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Code cannot be empty");
    assert_eq!(gateway.calls(), 0, "gateway must not be called");
}

#[tokio::test]
async fn student_review_includes_plagiarism_and_stats() {
    let gateway = ScriptedGateway::ok("## Overall Assessment\nfine\n");
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{base}/api/review"))
        .json(&serde_json::json!({
            "code": "print(1)",
            "user_type": "student",
            "student_name": "ada",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // All four stat keys are present even when the model reported nothing.
    for key in ["critical", "high", "medium", "low"] {
        assert_eq!(body["stats"][key], 0, "stat key {key}");
    }
    assert_eq!(body["plagiarism"], "0% (first submission)");
    assert_eq!(body["student_stats"], 1);
}

#[tokio::test]
async fn developer_review_omits_student_fields() {
    let gateway = ScriptedGateway::ok("## Overall Assessment\nfine\n");
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{base}/api/review"))
        .json(&serde_json::json!({ "code": "print(1)", "user_type": "developer" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body.get("plagiarism").is_none());
    assert!(body.get("student_stats").is_none());
}

#[tokio::test]
async fn rewrite_extracts_code_and_complexities() {
    let gateway = ScriptedGateway::ok(
        "## Review of Changes\nUnrolled the nested scan.\n\n\
         ### Issues Addressed\n- removed quadratic loop\n\n\
         ## Rewritten Code\n```python\nresult = lookup[key]\n```\n",
    );
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{base}/api/rewrite"))
        .json(&serde_json::json!({
            "code": "for a in xs:\n    for b in ys:\n        pass\n",
            "language": "python",
            "user_type": "developer",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["rewritten_code"], "result = lookup[key]");
    assert_eq!(body["complexity_original"], "O(n^2)");
    assert_eq!(body["complexity_rewritten"], "O(1)");
    assert!(!body["review"]
        .as_str()
        .unwrap()
        .contains("result = lookup[key]"));
}

#[tokio::test]
async fn generate_returns_extracted_code() {
    let gateway = ScriptedGateway::ok("```python\ndef add(a, b):\n    return a + b\n```");
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .post(format!("{base}/api/generate"))
        .json(&serde_json::json!({
            "prompt": "an add function",
            "language": "python",
            "user_type": "developer",
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["generated_code"], "def add(a, b):\n    return a + b");
}

#[tokio::test]
async fn generate_with_empty_prompt_is_400() {
    let gateway = ScriptedGateway::ok("irrelevant");
    let base = spawn_server(gateway.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/generate"))
        .json(&serde_json::json!({ "prompt": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn unknown_model_is_rejected_before_the_gateway() {
    let gateway = ScriptedGateway::ok("irrelevant");
    let base = spawn_server(gateway.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/review"))
        .json(&serde_json::json!({ "code": "print(1)", "model": "gpt-17" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn upstream_failure_surfaces_as_502() {
    let gateway = ScriptedGateway::failing("completion API returned 500");
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/review"))
        .json(&serde_json::json!({ "code": "print(1)" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 502);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("completion API returned 500"));
}

#[tokio::test]
async fn history_versions_increment_across_actions() {
    let gateway = ScriptedGateway::ok("## Overall Assessment\nfine\n");
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        client
            .post(format!("{base}/api/review"))
            .json(&serde_json::json!({
                "code": "print(1)",
                "username": "ada",
            }))
            .send()
            .await
            .unwrap();
    }

    let body: serde_json::Value = reqwest::get(format!("{base}/api/history/ada"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = body["history"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["version"], 1);
    assert_eq!(entries[1]["version"], 2);
    assert_eq!(entries[0]["action"], "review");
}

#[tokio::test]
async fn dashboard_tracks_student_activity() {
    let gateway = ScriptedGateway::ok("## Overall Assessment\nfine\n");
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    for name in ["ada", "ada", "grace"] {
        client
            .post(format!("{base}/api/review"))
            .json(&serde_json::json!({
                "code": "print(1)",
                "user_type": "student",
                "student_name": name,
            }))
            .send()
            .await
            .unwrap();
    }

    let body: serde_json::Value = reqwest::get(format!("{base}/api/dashboard-data"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["labels"], serde_json::json!(["ada", "grace"]));
    assert_eq!(body["data"], serde_json::json!([2, 1]));
}

#[tokio::test]
async fn plagiarism_reset_restores_first_submission_state() {
    let gateway = ScriptedGateway::ok("## Overall Assessment\nfine\n");
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    let submit = |code: &str| {
        let client = client.clone();
        let url = format!("{base}/api/review");
        let body = serde_json::json!({
            "code": code,
            "user_type": "student",
            "student_name": "ada",
        });
        async move {
            client
                .post(url)
                .json(&body)
                .send()
                .await
                .unwrap()
                .json::<serde_json::Value>()
                .await
                .unwrap()
        }
    };

    submit("print(1)").await;
    let second = submit("print(1)").await;
    assert_eq!(second["plagiarism"], "100.00%");

    client
        .post(format!("{base}/api/reset-plagiarism"))
        .send()
        .await
        .unwrap();

    let after_reset = submit("print(1)").await;
    assert_eq!(after_reset["plagiarism"], "0% (first submission)");
}

#[tokio::test]
async fn security_scan_and_refactor_share_the_pipeline() {
    let gateway = ScriptedGateway::ok(REVIEW_MARKDOWN);
    let base = spawn_server(gateway).await;
    let client = reqwest::Client::new();

    for endpoint in ["security-scan", "docs", "tests", "refactor"] {
        let resp = client
            .post(format!("{base}/api/{endpoint}"))
            .json(&serde_json::json!({ "code": "print(1)" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "endpoint {endpoint}");
    }
}
