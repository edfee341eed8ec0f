//! Report formatting utilities for terminal output
//!
//! Bars and rules shared by the report renderers, plus a generic chart for
//! any [`Series`].

use crate::reports::Series;

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

/// Horizontal bar chart of a series with a total line
pub fn format_series_chart(title: &str, series: &Series, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(title);
    output.push('\n');
    output.push_str(&separator(50));
    output.push('\n');

    if series.is_empty() {
        output.push_str("No data.\n");
        return output;
    }

    let label_width = series
        .labels
        .iter()
        .map(|l| l.chars().count().min(16))
        .max()
        .unwrap_or(0);
    let max = series.max_value().as_f64();
    for (label, value) in series.points() {
        output.push_str(&format!(
            "{:<width$} {} {:>12}\n",
            truncate(label, 16),
            format_bar(value.as_f64(), max, 25),
            value.format_with_symbol(symbol),
            width = label_width
        ));
    }

    output.push_str(&separator(50));
    output.push('\n');
    output.push_str(&format!(
        "Total: {}\n",
        series.total().format_with_symbol(symbol)
    ));
    output
}
