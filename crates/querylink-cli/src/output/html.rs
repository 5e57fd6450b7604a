//! HTML fragments for embedding results in a web page.
//!
//! Tables use the Bootstrap classes of the web front end; messages are wrapped
//! in `result-success` or `result-error` blocks. All text is escaped.

use crate::presenter::{Payload, Presentation};

pub(super) fn render(presentation: &Presentation) -> String {
    match &presentation.payload {
        Payload::Table { columns, rows } => render_table(columns, rows),
        Payload::Message { text } => {
            let class = if presentation.success {
                "result-success"
            } else {
                "result-error"
            };
            format!("<div class=\"{class}\"><pre>{}</pre></div>\n", escape_html(text))
        }
    }
}

fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut output = String::from(
        "<div class=\"table-responsive\"><table class=\"table table-striped mt-3\"><thead><tr>",
    );
    for column in columns {
        output.push_str(&format!("<th scope=\"col\">{}</th>", escape_html(column)));
    }
    output.push_str("</tr></thead><tbody>");
    for row in rows {
        output.push_str("<tr>");
        for cell in row {
            output.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        output.push_str("</tr>");
    }
    output.push_str("</tbody></table></div>\n");
    output
}

/// Escapes text for use inside HTML element content or quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
