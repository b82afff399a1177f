// Plain-text and markdown rendering of result tables
use shared::models::Table;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::EngineError;
use crate::format::pretty_string;

const PAD_LENGTH: usize = 4;

/// Lines up a grid of strings so every column is as wide as its widest
/// cell plus `pad` spaces.
pub fn pad(grid: &[Vec<String>], pad: usize) -> String {
    let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for row in grid {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.trim().chars().count());
        }
    }

    let mut out = String::new();
    for row in grid {
        for (col, cell) in row.iter().enumerate() {
            let cell = cell.trim();
            out.push_str(cell);
            out.push_str(&" ".repeat(widths[col] + pad - cell.chars().count()));
        }
        out.push('\n');
    }
    out
}

pub fn render_table(table: &Table, markdown: bool) -> String {
    if table.data.is_empty() {
        return String::new();
    }

    let sep = if markdown { "|" } else { "" };
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.row_count() + 1);

    // The header has no cell above the row names
    let mut header = vec![sep.to_string()];
    header.extend(table.col_names.iter().map(|name| format!("{}{}", name, sep)));
    grid.push(header);

    for row in 0..table.row_count() {
        let row_name = table.row_names.get(row).map_or("", String::as_str);
        let mut line = vec![format!("{}{}", row_name, sep)];
        line.extend((0..table.data.len()).map(|col| format!("{}{}", pretty_string(table.cell(col, row)), sep)));
        grid.push(line);
    }

    pad(&grid, PAD_LENGTH)
}

pub fn write_table(table: &Table, path: impl AsRef<Path>, markdown: bool) -> Result<(), EngineError> {
    let path = path.as_ref();
    fs::write(path, render_table(table, markdown))?;
    info!(path = %path.display(), rows = table.row_count(), markdown, "Wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Value;
    use tempfile::NamedTempFile;

    fn sample() -> Table {
        Table {
            row_names: vec!["1".into(), "2".into()],
            col_names: vec!["sym".into(), "volume".into()],
            data: vec![
                vec![Value::from("WINFUT"), Value::from("PETR4")],
                vec![Value::Int64(600822115), Value::Null],
            ],
        }
    }

    #[test]
    fn test_pad_aligns_columns() {
        let grid = vec![
            vec!["a".to_string(), "bb".to_string()],
            vec!["ccc".to_string(), " d ".to_string()],
        ];
        assert_eq!(pad(&grid, 1), "a   bb \nccc d  \n");
    }

    #[test]
    fn test_render_plain() {
        let out = render_table(&sample(), false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].trim_end(), "     sym       volume");
        assert_eq!(lines[1].trim_end(), "1    WINFUT    600,822,115");
        assert_eq!(lines[2].trim_end(), "2    PETR4");
    }

    #[test]
    fn test_render_markdown_uses_pipes() {
        let out = render_table(&sample(), true);
        assert!(out.lines().all(|line| line.contains('|')));
        assert!(out.contains("600,822,115|"));
    }

    #[test]
    fn test_render_uneven_columns() {
        let table = Table {
            row_names: vec!["1".into(), "2".into()],
            col_names: vec!["sym".into(), "volume".into()],
            data: vec![vec![Value::from("WINFUT"), Value::from("PETR4")], vec![Value::Int64(600822115)]],
        };
        assert_eq!(render_table(&table, false), render_table(&sample(), false));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_table(&Table::default(), false), "");
    }

    #[test]
    fn test_write_table() {
        let file = NamedTempFile::new().unwrap();
        write_table(&sample(), file.path(), false).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, render_table(&sample(), false));
    }
}
