//! Server configuration.
//!
//! Priority (highest to lowest): CLI / env var > TOML file > built-in default.
//! The TOML layer lives at `{data_dir}/refiner.toml`; a malformed file is
//! logged and ignored rather than aborting startup.
//!
//! The upstream API key is a soft dependency: it is read here but its absence
//! only surfaces when a completion request is actually made.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_UPSTREAM_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_DELAY_MS: u64 = 500;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

// ─── UpstreamConfig ──────────────────────────────────────────────────────────

/// Completion API connection settings (`[upstream]` in refiner.toml).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the OpenAI-compatible completion API.
    pub base_url: String,
    /// Per-request timeout in seconds (default: 60).
    pub timeout_secs: u64,
    /// Maximum attempts per completion call, including the first (default: 3).
    pub max_retries: u32,
    /// Delay before the second attempt; doubles each retry (default: 500 ms).
    pub retry_delay_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

// ─── TOML config file ────────────────────────────────────────────────────────

/// `{data_dir}/refiner.toml` — all fields are optional overrides.
#[derive(Deserialize, Default)]
struct TomlConfig {
    /// HTTP server port (default: 8000).
    port: Option<u16>,
    /// Bind address (default: "127.0.0.1"; use "0.0.0.0" for LAN access).
    bind_address: Option<String>,
    /// Log level filter string, e.g. "debug", "info,refiner=trace".
    log: Option<String>,
    /// Log output format: "pretty" (default) | "json".
    log_format: Option<String>,
    /// Upstream completion API settings (`[upstream]`).
    upstream: Option<UpstreamConfig>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("refiner.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse refiner.toml — using defaults");
            None
        }
    }
}

// ─── ServerConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub log: String,
    /// Log output format: "pretty" (default) | "json".
    pub log_format: String,
    /// Upstream completion API key (REFINER_API_KEY env var).
    /// None means completion calls fail at request time with a clear error.
    pub api_key: Option<String>,
    /// Password accepted for the demo `admin` account
    /// (REFINER_ADMIN_PASSWORD env var, default: "password").
    pub admin_password: String,
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    /// Build config from CLI/env args + optional TOML file.
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log: Option<String>,
        bind_address: Option<String>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        let toml = load_toml(&data_dir).unwrap_or_default();

        let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let bind_address = bind_address
            .or(std::env::var("REFINER_BIND").ok().filter(|s| !s.is_empty()))
            .or(toml.bind_address)
            .unwrap_or_else(default_bind_address);

        let log_format = std::env::var("REFINER_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let api_key = std::env::var("REFINER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let admin_password = std::env::var("REFINER_ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "password".to_string());

        let mut upstream = toml.upstream.unwrap_or_default();
        if let Ok(url) = std::env::var("REFINER_UPSTREAM_URL") {
            if !url.is_empty() {
                upstream.base_url = url;
            }
        }

        Self {
            port,
            bind_address,
            data_dir,
            log,
            log_format,
            api_key,
            admin_password,
            upstream,
        }
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("refiner");
        }
    }
    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("refiner");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("refiner");
        }
    }
    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("refiner");
        }
    }
    // Fallback
    PathBuf::from(".refiner")
}
