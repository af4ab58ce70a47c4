/// Styled rendering of transformation failures
///
/// Engine diagnostics arrive as terminal text, possibly with ANSI color codes.
/// They are turned into a self-contained HTML snippet that can be shown as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::format::ModuleFormat;
use crate::result::TransformResult;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("valid ANSI regex"));

/// Wrap an engine failure for `format` into a single styled error.
pub fn format_engine_error(message: &str, format: ModuleFormat) -> TransformResult {
    let html = ansi_to_markup(message).replace('\n', "<br/>");
    let body = format!(r#"<div style="background: #333; color: white;">{html}</div>"#);
    TransformResult::failure(format!("Error transforming to {format} module: <br/><br/>{body}"))
}

/// Convert ANSI color runs into inline spans, escaping HTML along the way.
fn ansi_to_markup(message: &str) -> String {
    match ansi_to_html::convert(message) {
        Ok(html) => html,
        Err(err) => {
            tracing::warn!("ANSI conversion failed, stripping escapes: {}", err);
            escape_html(&ANSI_ESCAPE.replace_all(message, ""))
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            // Stray escape bytes from sequences the regex did not match
            '\x1b' => {}
            c => out.push(c),
        }
    }
    out
}
