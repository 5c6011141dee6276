//! Table row helpers shared by both segmenters.
//!
//! Markdown rows look like `| a | b |`; Consense rows are written under a
//! `table:` header as ` a | b`.

use crate::code_fence::REGION_MARKER;
use crate::line::Line;

/// Header token opening a Consense table.
pub const TABLE_HEADER: &str = "table:";

/// Cell separator used when rows are rewritten.
const CELL_SEPARATOR: &str = " | ";

/// Cell text used for every synthesized delimiter cell.
const DELIMITER_CELL: &str = "---";

/// Whether a Markdown line is a pipe-delimited table row.
pub fn is_markdown_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Cells of a Markdown row with the outer pipes removed.
pub fn markdown_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let inner = trimmed
        .strip_prefix('|')
        .and_then(|rest| rest.strip_suffix('|'))
        .unwrap_or(trimmed);
    inner.split('|').map(str::trim).collect()
}

/// Cells of a Consense row body (marker already removed).
pub fn consense_cells(row: &str) -> Vec<&str> {
    row.trim().split('|').map(str::trim).collect()
}

/// A Markdown delimiter row such as `|---|:---:|`.
pub fn is_delimiter_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-') && is_separator_only(trimmed)
}

/// A row made only of `-`, `:`, `|` and spaces.
pub fn is_separator_only(row: &str) -> bool {
    !row.is_empty()
        && row
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|' | ' '))
}

/// Render cells as an indented Consense row.
pub fn consense_row(cells: &[&str]) -> Line {
    let mut line = Line::markup(REGION_MARKER.to_string());
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line = line.push_markup(CELL_SEPARATOR);
        }
        line = line.push_text(*cell);
    }
    line
}

/// Render cells as a Markdown row.
pub fn markdown_row(cells: &[&str]) -> Line {
    let mut line = Line::markup("| ");
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line = line.push_markup(CELL_SEPARATOR);
        }
        line = line.push_text(*cell);
    }
    line.push_markup(" |")
}

/// Synthesized Markdown delimiter row with one cell per column.
pub fn markdown_delimiter(columns: usize) -> Line {
    let cells = vec![DELIMITER_CELL; columns.max(1)];
    Line::markup(format!("| {} |", cells.join(CELL_SEPARATOR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_markdown_rows() {
        assert!(is_markdown_row("| a | b |"));
        assert!(is_markdown_row("  |a|  "));
        assert!(!is_markdown_row("|"));
        assert!(!is_markdown_row("a | b"));
    }

    #[test]
    fn splits_and_trims_cells() {
        assert_eq!(markdown_cells("|  a | b  |"), vec!["a", "b"]);
        assert_eq!(consense_cells(" a |  | c "), vec!["a", "", "c"]);
    }

    #[test]
    fn delimiter_rows_need_dashes() {
        assert!(is_delimiter_row("|---|:---:|"));
        assert!(is_delimiter_row("| --- | --- |"));
        assert!(!is_delimiter_row("|   |   |"));
        assert!(is_separator_only("| : |"));
        assert!(!is_separator_only(""));
    }

    #[test]
    fn renders_rows() {
        assert_eq!(consense_row(&["a", "b"]).raw(), " a | b");
        assert_eq!(markdown_row(&["a", "b"]).raw(), "| a | b |");
        assert_eq!(markdown_delimiter(3).raw(), "| --- | --- | --- |");
    }
}
