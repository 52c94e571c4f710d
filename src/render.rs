//! HTML fragments for the `result` and `suggestions` regions.

use crate::models::{PredictionResult, Rendered};

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Insert score and suggestion text without escaping markup.
    pub raw_html: bool,
}

impl RenderOptions {
    pub fn raw() -> Self {
        Self { raw_html: true }
    }

    fn text(&self, value: &str) -> String {
        if self.raw_html {
            value.to_string()
        } else {
            escape_html(value)
        }
    }
}

/// `<h2>Credit Score: {score}</h2>`
///
/// A text score is escaped like suggestion text; numbers have nothing to escape.
pub fn render_score(result: &PredictionResult, options: RenderOptions) -> String {
    format!(
        "<h2>Credit Score: {}</h2>",
        options.text(&result.credit_score.to_string())
    )
}

/// `<h3>Suggestions:</h3><ul>` followed by one `<li>` per suggestion, in order.
pub fn render_suggestions(result: &PredictionResult, options: RenderOptions) -> String {
    let items: String = result
        .suggestions
        .iter()
        .map(|s| format!("<li>{}</li>", options.text(s)))
        .collect();
    format!("<h3>Suggestions:</h3><ul>{}</ul>", items)
}

pub fn render(result: &PredictionResult, options: RenderOptions) -> Rendered {
    Rendered {
        result_html: render_score(result, options),
        suggestions_html: render_suggestions(result, options),
    }
}

/// Escapes text for use as element content or a double-quoted attribute value.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
