// SPDX-License-Identifier: MIT
//! Downloadable review documents.
//!
//! Reviews leave the app as binary attachments in one of two formats:
//! a minimal WordprocessingML package (`.docx`, a zip of XML parts) or a
//! minimal PDF 1.4. Both writers emit just enough structure for stock
//! viewers; styling is not a goal.

pub mod docx;
pub mod pdf;

use serde::Deserialize;

use crate::error::ApiError;

// ─── Format ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s.to_lowercase().as_str() {
            "docx" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ApiError::InvalidRequest(format!(
                "unknown export format '{other}' (expected docx or pdf)"
            ))),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

// ─── Document model ──────────────────────────────────────────────────────────

/// A flat document: a title followed by (heading, body) sections.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub heading: String,
    pub body: String,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        self.sections.push(Section {
            heading: heading.into(),
            body: body.into(),
        });
        self
    }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

/// A rendered attachment ready to be served.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render `document` in the requested format.
pub fn render(
    format: ExportFormat,
    basename: &str,
    document: &Document,
) -> Result<ExportFile, ApiError> {
    let bytes = match format {
        ExportFormat::Docx => docx::write_docx(document)
            .map_err(|e| ApiError::InvalidRequest(format!("docx rendering failed: {e}")))?,
        ExportFormat::Pdf => pdf::write_pdf(document),
    };
    Ok(ExportFile {
        filename: format!("{basename}.{}", format.extension()),
        content_type: format.content_type(),
        bytes,
    })
}
