//! Box-drawn text tables with display-width aware padding.

use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub align: Align,
}

impl Column {
    pub fn left(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
        }
    }

    pub fn right(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Right,
        }
    }
}

pub struct TableFormatter {
    columns: Vec<Column>,
    widths: Vec<usize>,
}

impl TableFormatter {
    /// Sizes every column to fit its header and the widest cell.
    pub fn new(columns: Vec<Column>, rows: &[Vec<String>]) -> Self {
        let widths = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                rows.iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(column.header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        Self { columns, widths }
    }

    pub fn write<W: Write>(&self, writer: &mut W, rows: &[Vec<String>]) -> io::Result<()> {
        self.write_rule(writer, '┌', '┬', '┐')?;

        write!(writer, "│")?;
        for (column, &width) in self.columns.iter().zip(&self.widths) {
            write!(writer, " {} │", pad(column.header, width, Align::Left))?;
        }
        writeln!(writer)?;

        self.write_rule(writer, '├', '┼', '┤')?;

        for row in rows {
            write!(writer, "│")?;
            for ((column, &width), cell) in self.columns.iter().zip(&self.widths).zip(row) {
                write!(writer, " {} │", pad(cell, width, column.align))?;
            }
            writeln!(writer)?;
        }

        self.write_rule(writer, '└', '┴', '┘')
    }

    fn write_rule<W: Write>(
        &self,
        writer: &mut W,
        left: char,
        middle: char,
        right: char,
    ) -> io::Result<()> {
        write!(writer, "{}", left)?;
        for (i, &width) in self.widths.iter().enumerate() {
            write!(writer, "{}", "─".repeat(width + 2))?;
            if i < self.widths.len() - 1 {
                write!(writer, "{}", middle)?;
            }
        }
        writeln!(writer, "{}", right)
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(columns: Vec<Column>, rows: &[Vec<String>]) -> String {
        let table = TableFormatter::new(columns, rows);
        let mut output = Vec::new();
        table.write(&mut output, rows).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_widths_use_display_width() {
        let rows = vec![vec!["59°20′".to_string(), "1.0".to_string()]];
        let table = TableFormatter::new(vec![Column::left("Input"), Column::right("X")], &rows);
        // "59°20′" is six columns wide but longer in bytes
        assert_eq!(table.widths, vec![6, 3]);
    }

    #[test]
    fn test_header_wider_than_cells() {
        let rows = vec![vec!["1".to_string()]];
        let table = TableFormatter::new(vec![Column::right("Latitude")], &rows);
        assert_eq!(table.widths, vec![8]);
    }

    #[test]
    fn test_render_layout() {
        let rows = vec![
            vec!["a".to_string(), "1.5".to_string()],
            vec!["bcd".to_string(), "-10.25".to_string()],
        ];
        let text = render(vec![Column::left("In"), Column::right("Value")], &rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "┌─────┬────────┐");
        assert_eq!(lines[1], "│ In  │ Value  │");
        assert_eq!(lines[3], "│ a   │    1.5 │");
        assert_eq!(lines[4], "│ bcd │ -10.25 │");
        assert_eq!(lines[5], "└─────┴────────┘");
    }

    #[test]
    fn test_empty_table_has_header_only() {
        let text = render(vec![Column::left("Input")], &[]);
        assert_eq!(text.lines().count(), 4);
    }
}
