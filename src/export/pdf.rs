// SPDX-License-Identifier: MIT
//! Minimal PDF 1.4 writer.
//!
//! No crate in our stack covers PDF, so this hand-assembles the smallest
//! valid document: one Helvetica font, one content stream per page, and a
//! correct xref table. Text outside printable ASCII is replaced rather
//! than embedded, which is acceptable for code review text.

use super::Document;

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const FONT_SIZE: u32 = 10;
const LEADING: u32 = 12;
const MARGIN: u32 = 50;
const LINES_PER_PAGE: usize = 58;
const WRAP_COLUMNS: usize = 95;

/// Render `document` as a PDF byte buffer.
pub fn write_pdf(document: &Document) -> Vec<u8> {
    let lines = layout_lines(document);
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![&[]]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    // Object numbering: 1 catalog, 2 page tree, 3 font, then a
    // (page, contents) object pair per page.
    let page_obj = |i: usize| 4 + 2 * i;
    let contents_obj = |i: usize| 5 + 2 * i;
    let total_objects = 3 + 2 * pages.len();

    let mut buf: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::with_capacity(total_objects);
    buf.extend_from_slice(b"%PDF-1.4\n");

    let push_object = |buf: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize, body: String| {
        offsets.push(buf.len());
        buf.extend_from_slice(format!("{id} 0 obj\n{body}\nendobj\n").as_bytes());
    };

    push_object(
        &mut buf,
        &mut offsets,
        1,
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
    );

    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", page_obj(i))).collect();
    push_object(
        &mut buf,
        &mut offsets,
        2,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
    );

    push_object(
        &mut buf,
        &mut offsets,
        3,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    );

    for (i, page_lines) in pages.iter().enumerate() {
        push_object(
            &mut buf,
            &mut offsets,
            page_obj(i),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                contents_obj(i)
            ),
        );

        let stream = content_stream(page_lines);
        push_object(
            &mut buf,
            &mut offsets,
            contents_obj(i),
            format!("<< /Length {} >>\nstream\n{stream}endstream", stream.len()),
        );
    }

    // Cross-reference table and trailer.
    let xref_offset = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        buf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            total_objects + 1
        )
        .as_bytes(),
    );

    buf
}

/// Flatten the document into wrapped text lines.
fn layout_lines(document: &Document) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(wrap(&document.title));
    lines.push(String::new());
    for section in &document.sections {
        lines.extend(wrap(&section.heading));
        for raw in section.body.lines() {
            lines.extend(wrap(raw));
        }
        lines.push(String::new());
    }
    lines
}

fn wrap(line: &str) -> Vec<String> {
    if line.is_empty() {
        return vec![String::new()];
    }
    line.chars()
        .collect::<Vec<_>>()
        .chunks(WRAP_COLUMNS)
        .map(|c| c.iter().collect())
        .collect()
}

fn content_stream(lines: &[String]) -> String {
    let start_y = PAGE_HEIGHT - MARGIN + LEADING;
    let mut stream = format!("BT\n/F1 {FONT_SIZE} Tf\n{LEADING} TL\n{MARGIN} {start_y} Td\n");
    for line in lines {
        stream.push_str("T*\n");
        stream.push('(');
        stream.push_str(&escape_pdf_text(line));
        stream.push_str(") Tj\n");
    }
    stream.push_str("ET\n");
    stream
}

/// Escape the PDF string delimiters and drop non-ASCII glyphs.
fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if (' '..='~').contains(&c) => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}
