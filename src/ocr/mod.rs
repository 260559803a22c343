// SPDX-License-Identifier: MIT
//! OCR extraction via the `tesseract` CLI.
//!
//! OCR is an optional capability: availability is probed once at startup,
//! and when the binary is missing every request gets a clean 400 instead
//! of a crash. The uploaded image is written to a temp file and handed to
//! a subprocess with a hard timeout.

use std::io::Write as _;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::ApiError;

/// Per-extraction subprocess timeout.
const OCR_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OcrEngine {
    available: bool,
}

impl OcrEngine {
    /// Probe `tesseract --version` once; the result is fixed for the
    /// process lifetime.
    pub async fn detect() -> Self {
        let available = Command::new("tesseract")
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false);
        if available {
            info!("tesseract found — OCR enabled");
        } else {
            warn!("tesseract not found — OCR requests will be rejected");
        }
        Self { available }
    }

    /// Construct with a known availability, for tests.
    pub fn with_availability(available: bool) -> Self {
        Self { available }
    }

    pub fn available(&self) -> bool {
        self.available
    }

    /// Extract text from an uploaded image.
    pub async fn extract(&self, image: &[u8]) -> Result<String, ApiError> {
        if !self.available {
            return Err(ApiError::FeatureUnavailable(
                "OCR support not available on this host. Install tesseract-ocr.".to_string(),
            ));
        }
        if image.is_empty() {
            return Err(ApiError::InvalidRequest("Uploaded file is empty".to_string()));
        }

        // tesseract reads from a path, so stage the upload on disk.
        let mut file = tempfile::NamedTempFile::new()
            .map_err(|e| ApiError::InvalidRequest(format!("could not stage upload: {e}")))?;
        file.write_all(image)
            .map_err(|e| ApiError::InvalidRequest(format!("could not stage upload: {e}")))?;

        let run = tokio::time::timeout(
            OCR_TIMEOUT,
            Command::new("tesseract")
                .arg(file.path())
                .arg("stdout")
                .output(),
        )
        .await;

        let output = match run {
            Ok(Ok(o)) => o,
            Ok(Err(e)) => {
                warn!(err = %e, "tesseract spawn failed");
                return Err(ApiError::FeatureUnavailable(format!(
                    "OCR engine failed to start: {e}"
                )));
            }
            Err(_) => {
                warn!("tesseract timed out");
                return Err(ApiError::InvalidRequest(
                    "OCR timed out processing the image".to_string(),
                ));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApiError::InvalidRequest(format!(
                "could not extract text from image: {}",
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = image.len(), chars = text.len(), "ocr extraction done");
        Ok(text)
    }
}
