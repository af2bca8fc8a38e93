//! Minimal text-only PDF writer used by the report exporter.
//!
//! Produces PDF 1.4 with the built-in Helvetica font on A4 pages. Characters
//! outside printable ASCII are replaced with `?` since the base-14 fonts do
//! not cover them.

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 50;
const TITLE_SIZE: u32 = 16;
const BODY_SIZE: u32 = 10;
const LEADING: u32 = 14;

/// Body lines that fit below the title on the first page; later pages use
/// the same count for simplicity.
pub const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN - 2 * LEADING) / LEADING) as usize;

pub fn render_text_document(title: &str, lines: &[String]) -> Vec<u8> {
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    let mut objects: Vec<String> = Vec::new();
    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, page_lines) in pages.iter().enumerate() {
        let content_id = 5 + 2 * i;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH, PAGE_HEIGHT, content_id
        ));

        let stream = page_stream(if i == 0 { Some(title) } else { None }, page_lines);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}

fn page_stream(title: Option<&str>, lines: &[String]) -> String {
    let mut y = PAGE_HEIGHT - MARGIN;
    let mut ops = Vec::new();

    if let Some(title) = title {
        ops.push(text_op(TITLE_SIZE, y, title));
        y -= 2 * LEADING;
    }
    for line in lines {
        ops.push(text_op(BODY_SIZE, y, line));
        y = y.saturating_sub(LEADING);
    }

    ops.join("\n")
}

fn text_op(size: u32, y: u32, text: &str) -> String {
    format!(
        "BT /F1 {} Tf {} {} Td ({}) Tj ET",
        size,
        MARGIN,
        y,
        escape(text)
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            '\t' => escaped.push_str("    "),
            _ => escaped.push('?'),
        }
    }
    escaped
}
