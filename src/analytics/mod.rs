// SPDX-License-Identifier: MIT
//! Usage analytics.
//!
//! Two layers: per-user action counters feeding the dashboard, and
//! process-lifetime atomic counters for the health/ops view. No
//! aggregation windows; counters reset on restart.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

// ─── Per-user counters ───────────────────────────────────────────────────────

/// Dashboard payload: parallel label/count arrays, one slot per user.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

/// Per-user action counter map.
pub struct UsageCounters {
    counts: RwLock<HashMap<String, u64>>,
}

impl UsageCounters {
    pub fn new() -> Self {
        Self {
            counts: RwLock::new(HashMap::new()),
        }
    }

    /// Increment the action count for `user` and return the new value.
    pub async fn increment(&self, user: &str) -> u64 {
        let mut counts = self.counts.write().await;
        let entry = counts.entry(user.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    pub async fn get(&self, user: &str) -> u64 {
        *self.counts.read().await.get(user).unwrap_or(&0)
    }

    /// Snapshot for the dashboard, sorted by label for stable output.
    pub async fn dashboard(&self) -> DashboardData {
        let counts = self.counts.read().await;
        let mut pairs: Vec<(&String, &u64)> = counts.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        DashboardData {
            labels: pairs.iter().map(|(k, _)| (*k).clone()).collect(),
            data: pairs.iter().map(|(_, v)| **v).collect(),
        }
    }
}

impl Default for UsageCounters {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Process counters ────────────────────────────────────────────────────────

/// In-process counters shared across all requests.
#[derive(Debug, Default)]
pub struct ServerMetrics {
    /// Total pipeline actions served since start.
    pub actions_total: AtomicU64,
    /// Total upstream completion failures since start.
    pub upstream_failures: AtomicU64,
}

impl ServerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_actions(&self) {
        self.actions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_upstream_failures(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn actions(&self) -> u64 {
        self.actions_total.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.upstream_failures.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn increments_accumulate_per_user() {
        let counters = UsageCounters::new();
        assert_eq!(counters.increment("alice").await, 1);
        assert_eq!(counters.increment("alice").await, 2);
        assert_eq!(counters.get("alice").await, 2);
        assert_eq!(counters.get("bob").await, 0);
    }

    #[tokio::test]
    async fn dashboard_arrays_stay_parallel() {
        let counters = UsageCounters::new();
        counters.increment("bob").await;
        counters.increment("alice").await;
        counters.increment("alice").await;

        let dash = counters.dashboard().await;
        assert_eq!(dash.labels, vec!["alice".to_string(), "bob".to_string()]);
        assert_eq!(dash.data, vec![2, 1]);
    }

    #[test]
    fn server_metrics_count() {
        let m = ServerMetrics::new();
        m.inc_actions();
        m.inc_actions();
        m.inc_upstream_failures();
        assert_eq!(m.actions(), 2);
        assert_eq!(m.failures(), 1);
    }
}
