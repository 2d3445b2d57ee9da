use crate::cli::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub align: Align,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Right,
        }
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Lines of the rendered table, without the title.
    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.widths();
        let format_row = |cells: &[String]| -> String {
            self.columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(idx, (column, width))| {
                    let cell = cells.get(idx).map(String::as_str).unwrap_or("");
                    match column.align {
                        Align::Left => format!("{:<width$}", cell, width = width),
                        Align::Right => format!("{:>width$}", cell, width = width),
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let header: Vec<String> = self.columns.iter().map(|col| col.header.clone()).collect();
        let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let mut lines = vec![format_row(&header), "-".repeat(total_width)];
        lines.extend(self.rows.iter().map(|row| format_row(row)));
        lines
    }
}

/// Renders [`Table`] instances using padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table) {
        if let Some(title) = &table.title {
            output::section(title);
        }
        let lines = table.render_lines();
        if let Some((header, rest)) = lines.split_first() {
            output::info(output::emphasize(header));
            for line in rest {
                output::info(line);
            }
        }
        if table.rows.is_empty() {
            output::hint("(no rows)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_widest_cell() {
        let mut table = Table::new(
            None::<String>,
            vec![TableColumn::left("Week"), TableColumn::right("Budget")],
        );
        table.add_row(vec!["1", "700 kr"]);
        table.add_row(vec!["2", "1.300 kr"]);

        let lines = table.render_lines();
        assert_eq!(lines[0], "Week    Budget");
        assert_eq!(lines[1], "-".repeat(14));
        assert_eq!(lines[2], "1       700 kr");
        assert_eq!(lines[3], "2     1.300 kr");
    }
}
