use colored::Colorize;
use jopl::columns::Column;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const GUTTER: &str = "  ";

pub(crate) fn print_table<T>(title: &str, columns: &[&Column<T>], rows: &[T], no_header: bool) {
    if !no_header {
        println!("{}", title.bold());
        let header = columns
            .iter()
            .map(|c| pad_cell(c.label, c.width))
            .collect::<Vec<_>>()
            .join(GUTTER);
        println!("{}", header.dimmed());
        let rule = columns
            .iter()
            .map(|c| "-".repeat(c.width))
            .collect::<Vec<_>>()
            .join(GUTTER);
        println!("{}", rule.dimmed());
    }

    if rows.is_empty() {
        println!("No entries found.");
        return;
    }

    for row in rows {
        let line = columns
            .iter()
            .map(|c| pad_cell(&(c.get)(row), c.width))
            .collect::<Vec<_>>()
            .join(GUTTER);
        println!("{}", line.trim_end());
    }
}

/// One line per failed ID in a batch, so the remaining IDs still print.
pub(crate) fn print_id_error(id: &str, err: &jopl::error::JoplError) {
    println!("{}{}{}", pad_cell(id, 32), GUTTER, format!("<= ERROR: {err}").red());
}

fn pad_cell(content: &str, width: usize) -> String {
    let truncated = truncate_to_width(content, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.replace('\n', " ");
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
