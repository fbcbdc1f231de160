use std::io::Write;

use console::{measure_text_width, Style};

use crate::utils::IntoDiagnosticShorthand;

const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub print_headers: bool,
    pub color: bool,
}

impl TableOptions {
    /// Headers and colour follow stdout unless headers are forced on.
    pub fn for_stdout(force_headers: bool) -> TableOptions {
        let term = console::Term::stdout();
        TableOptions {
            print_headers: force_headers || term.is_term(),
            color: console::colors_enabled(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Table
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn widths(&self, include_headers: bool) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).chain([self.headers.len()]).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        let headers = include_headers.then_some(&self.headers);
        for row in headers.into_iter().chain(&self.rows) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(measure_text_width(cell));
            }
        }
        widths
    }

    pub fn render(&self, mut out: impl Write, options: TableOptions) -> miette::Result<()> {
        let widths = self.widths(options.print_headers);
        let bold = Style::new().bold().force_styling(options.color);

        if options.print_headers {
            let line = format_row(&self.headers, &widths, |cell| bold.apply_to(cell).to_string());
            writeln!(out, "{line}").d()?;
        }
        for row in &self.rows {
            let line = format_row(row, &widths, str::to_string);
            writeln!(out, "{line}").d()?;
        }
        Ok(())
    }
}

// padding goes outside any styling and the final cell is never padded
fn format_row(row: &[String], widths: &[usize], paint: impl Fn(&str) -> String) -> String {
    let last = row.len().min(widths.len()).saturating_sub(1);
    let cells: Vec<String> = row
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let painted = paint(cell);
            if i == last {
                painted
            } else {
                let fill = width.saturating_sub(measure_text_width(cell));
                format!("{painted}{}", " ".repeat(fill))
            }
        })
        .collect();
    cells.join(COLUMN_GAP).trim_end().to_string()
}
