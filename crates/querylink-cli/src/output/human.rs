//! Aligned plain-text tables.

use unicode_width::UnicodeWidthStr;

use crate::presenter::{ErrorCategory, Payload, Presentation};

const SEPARATOR: &str = " | ";

pub(super) fn render(presentation: &Presentation) -> String {
    match &presentation.payload {
        Payload::Table { columns, rows } => render_table(columns, rows),
        Payload::Message { text } => match presentation.category {
            // Node text stays bare and transport text already reads
            // "Connection error: ...".
            Some(ErrorCategory::Protocol) => format!("Protocol error: {text}\n"),
            _ => format!("{text}\n"),
        },
    }
}

fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|column| column.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = String::new();
    if !columns.is_empty() {
        push_line(&mut output, columns, &widths);
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        output.push_str(&rule.join("-+-"));
        output.push('\n');
    }
    for row in rows {
        push_line(&mut output, row, &widths);
    }
    output.push_str(&row_count(rows.len()));
    output
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    output.push_str(padded.join(SEPARATOR).trim_end());
    output.push('\n');
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

fn row_count(count: usize) -> String {
    if count == 1 {
        String::from("(1 row)\n")
    } else {
        format!("({count} rows)\n")
    }
}
