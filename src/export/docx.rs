// SPDX-License-Identifier: MIT
//! Minimal WordprocessingML writer.
//!
//! A .docx file is a zip archive with three required parts:
//! `[Content_Types].xml`, `_rels/.rels`, and `word/document.xml`.
//! Every heading and body line becomes one paragraph; headings get a bold
//! run so the document is readable without a styles part.

use std::io::{Cursor, Write as _};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::Document;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

/// Render `document` as a .docx byte buffer.
pub fn write_docx(document: &Document) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file("[Content_Types].xml", options)?;
    writer.write_all(CONTENT_TYPES.as_bytes())?;

    writer.start_file("_rels/.rels", options)?;
    writer.write_all(RELS.as_bytes())?;

    writer.start_file("word/document.xml", options)?;
    writer.write_all(document_xml(document).as_bytes())?;

    Ok(writer.finish()?.into_inner())
}

fn document_xml(document: &Document) -> String {
    let mut body = String::new();
    body.push_str(&paragraph(&document.title, true));
    for section in &document.sections {
        body.push_str(&paragraph(&section.heading, true));
        for line in section.body.lines() {
            body.push_str(&paragraph(line, false));
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body}</w:body>
</w:document>"#
    )
}

fn paragraph(text: &str, bold: bool) -> String {
    let props = if bold { "<w:rPr><w:b/></w:rPr>" } else { "" };
    format!(
        "<w:p><w:r>{props}<w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
