//! Plain-text table rendering for the summary output.

/// Horizontal alignment of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Bordered text table with a header row.
///
/// Columns size themselves to their widest cell. Every cell gets one space
/// of padding on each side; centering puts the odd space on the right.
#[derive(Debug)]
pub struct TextTable {
    aligns: Vec<Align>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    /// One alignment per column; `header` labels the columns.
    #[must_use]
    pub fn new(aligns: &[Align], header: &[&str]) -> Self {
        debug_assert_eq!(aligns.len(), header.len());
        Self {
            aligns: aligns.to_vec(),
            header: header.iter().map(|s| (*s).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.aligns.len());
        self.rows.push(cells);
    }

    /// Render with a border around the table and a rule under the header.
    /// Every line ends in a newline, so tables can be written back to back.
    #[must_use]
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let rule = Self::rule(&widths);
        let mut out = String::new();
        out.push_str(&rule);
        out.push_str(&self.format_row(&self.header, &widths));
        out.push_str(&rule);
        for row in &self.rows {
            out.push_str(&self.format_row(row, &widths));
        }
        out.push_str(&rule);
        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(String::len).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }
        widths
    }

    fn rule(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for width in widths {
            line.push_str(&"-".repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    }

    fn format_row(&self, cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for ((cell, &width), align) in cells.iter().zip(widths).zip(&self.aligns) {
            let pad = width - cell.len();
            let (left, right) = match align {
                Align::Left => (0, pad),
                Align::Center => (pad / 2, pad - pad / 2),
            };
            line.push(' ');
            line.push_str(&" ".repeat(left));
            line.push_str(cell);
            line.push_str(&" ".repeat(right + 1));
            line.push('|');
        }
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_render_layout_is_stable() {
        let mut table = TextTable::new(&[Align::Left, Align::Center], &["Count", "Error Code"]);
        table.add_row(row(&["10", "4"]));
        table.add_row(row(&["2", "13"]));
        let expected = "\
+-------+------------+
| Count | Error Code |
+-------+------------+
| 10    |     4      |
| 2     |     13     |
+-------+------------+
";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_columns_grow_to_widest_cell() {
        let mut table = TextTable::new(&[Align::Left, Align::Left], &["Count", "Dso"]);
        table.add_row(row(&["1", "/system/lib64/libandroid_runtime.so"]));
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].contains("/system/lib64/libandroid_runtime.so"));
        // Border, header, data lines are all the same width.
        assert!(lines.iter().all(|l| l.len() == lines[0].len()));
    }

    #[test]
    fn test_empty_table_renders_header_only() {
        let table = TextTable::new(&[Align::Left], &["Count"]);
        let expected = "\
+-------+
| Count |
+-------+
+-------+
";
        assert_eq!(table.render(), expected);
    }
}
