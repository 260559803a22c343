// SPDX-License-Identifier: MIT
//! Plagiarism placeholder: character-match ratio against every previously
//! archived submission. Not a real similarity engine; the archive is an
//! unbounded in-memory list reset only by the admin endpoint.

use tokio::sync::RwLock;

/// Append-only archive of past submissions.
pub struct PlagiarismArchive {
    submissions: RwLock<Vec<String>>,
}

impl PlagiarismArchive {
    pub fn new() -> Self {
        Self {
            submissions: RwLock::new(Vec::new()),
        }
    }

    /// Score `code` against the archive, then archive it.
    ///
    /// The first submission ever seen reports "0% (first submission)".
    pub async fn check(&self, code: &str) -> String {
        let mut archive = self.submissions.write().await;
        if archive.is_empty() {
            archive.push(code.to_string());
            return "0% (first submission)".to_string();
        }

        let max_sim = archive
            .iter()
            .map(|old| similarity(code, old))
            .fold(0.0f64, f64::max);

        archive.push(code.to_string());
        format!("{:.2}%", max_sim * 100.0)
    }

    /// Clear the archive (admin reset endpoint).
    pub async fn reset(&self) {
        self.submissions.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }
}

impl Default for PlagiarismArchive {
    fn default() -> Self {
        Self::new()
    }
}

/// Ratio of position-matching characters over the longer length.
fn similarity(a: &str, b: &str) -> f64 {
    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 0.0;
    }
    let matches = a.chars().zip(b.chars()).filter(|(x, y)| x == y).count();
    matches as f64 / longer as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_submission_is_labelled() {
        let archive = PlagiarismArchive::new();
        assert_eq!(archive.check("print(1)").await, "0% (first submission)");
        assert_eq!(archive.len().await, 1);
    }

    #[tokio::test]
    async fn identical_resubmission_scores_100() {
        let archive = PlagiarismArchive::new();
        archive.check("print(1)").await;
        assert_eq!(archive.check("print(1)").await, "100.00%");
    }

    #[tokio::test]
    async fn unrelated_code_scores_low() {
        let archive = PlagiarismArchive::new();
        archive.check("aaaa").await;
        let score = archive.check("bbbb").await;
        assert_eq!(score, "0.00%");
    }

    #[tokio::test]
    async fn reset_restores_first_submission_state() {
        let archive = PlagiarismArchive::new();
        archive.check("x").await;
        archive.reset().await;
        assert_eq!(archive.check("x").await, "0% (first submission)");
    }

    #[test]
    fn similarity_handles_unequal_lengths() {
        // 4 matching positions out of the longer length 8.
        assert!((similarity("abcd", "abcdabcd") - 0.5).abs() < 1e-9);
        assert_eq!(similarity("", ""), 0.0);
    }
}
