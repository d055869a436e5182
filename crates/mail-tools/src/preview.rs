//! HTML-to-text conversion for message body previews.

use crate::error::ToolError;

/// Wrap width for converted HTML bodies.
const TEXT_WIDTH: usize = 80;

/// Convert an HTML body to plain text.
pub fn html_to_text(html: &str) -> Result<String, ToolError> {
    html2text::from_read(html.as_bytes(), TEXT_WIDTH)
        .map_err(|e| ToolError::ExecutionFailed(format!("HTML parsing error: {}", e)))
}

/// Build a bounded plain-text preview from a message body.
///
/// HTML input is converted to text first; the result is truncated on a
/// char boundary and whitespace-trimmed.
pub fn text_preview(body: &str, is_html: bool, max_bytes: usize) -> Result<String, ToolError> {
    let text = if is_html {
        html_to_text(body)?
    } else {
        body.to_string()
    };

    Ok(truncate_utf8(text.trim(), max_bytes))
}

fn truncate_utf8(input: &str, max_bytes: usize) -> String {
    if input.len() <= max_bytes {
        return input.to_string();
    }
    if max_bytes == 0 {
        return String::new();
    }

    let mut idx = max_bytes.min(input.len());
    while idx > 0 && !input.is_char_boundary(idx) {
        idx -= 1;
    }

    input[..idx].to_string()
}
