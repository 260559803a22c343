pub mod analytics;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod gateway;
pub mod history;
pub mod ocr;
pub mod policy;
pub mod prompt;
pub mod rest;
pub mod review;
pub mod shaper;
pub mod snippets;
pub mod store;

use std::sync::Arc;
use std::time::Instant;

use analytics::{ServerMetrics, UsageCounters};
use auth::SessionStore;
use config::ServerConfig;
use gateway::LlmGateway;
use history::VersionHistory;
use ocr::OcrEngine;
use policy::PolicyStore;
use review::plagiarism::PlagiarismArchive;
use snippets::SnippetLibrary;
use store::MemoryStore;

/// Shared application state passed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ServerConfig>,
    /// Bearer-token session registry.
    pub sessions: Arc<SessionStore>,
    /// Seam to the external completion API. Tests swap in a scripted
    /// implementation here.
    pub gateway: Arc<dyn LlmGateway>,
    pub snippets: Arc<SnippetLibrary>,
    pub history: Arc<VersionHistory>,
    /// Per-user action counters feeding the dashboard.
    pub usage: Arc<UsageCounters>,
    /// Process-lifetime counters for the health endpoint.
    pub metrics: Arc<ServerMetrics>,
    pub plagiarism: Arc<PlagiarismArchive>,
    pub policies: Arc<PolicyStore>,
    pub ocr: Arc<OcrEngine>,
    pub started_at: Instant,
}

impl AppContext {
    /// Wire up the context with in-memory stores behind the store seam.
    pub fn new(config: ServerConfig, gateway: Arc<dyn LlmGateway>, ocr: OcrEngine) -> Self {
        let sessions = Arc::new(SessionStore::new(&config.admin_password));
        Self {
            config: Arc::new(config),
            sessions,
            gateway,
            snippets: Arc::new(SnippetLibrary::new(Arc::new(MemoryStore::new()))),
            history: Arc::new(VersionHistory::new(Arc::new(MemoryStore::new()))),
            usage: Arc::new(UsageCounters::new()),
            metrics: Arc::new(ServerMetrics::new()),
            plagiarism: Arc::new(PlagiarismArchive::new()),
            policies: Arc::new(PolicyStore::new()),
            ocr: Arc::new(ocr),
            started_at: Instant::now(),
        }
    }
}
