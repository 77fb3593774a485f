//! Textual table exports (LaTeX and Markdown) of a column-oriented view.

use std::fmt::Write;

/// Title used as the LaTeX caption and the Markdown heading.
pub const TITLE: &str = "Scalability Analysis Results";

/// LaTeX label of the exported table.
pub const LABEL: &str = "tab:scalability";

/// A single table cell. Integers print as-is, reals with two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Counts (workers, processes).
    Int(u64),
    /// Measurements and derived ratios.
    Real(f64),
}

impl ::std::fmt::Display for Cell {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        match *self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Real(v) => write!(f, "{:.2}", v),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header text (unescaped).
    pub name: &'static str,
    /// One cell per row.
    pub cells: Vec<Cell>,
}

impl Column {
    /// Creates a new `Column`.
    pub fn new(name: &'static str, cells: Vec<Cell>) -> Self {
        Column {
            name: name,
            cells: cells,
        }
    }
}

fn rows(columns: &[Column]) -> usize {
    columns.iter().map(|c| c.cells.len()).min().unwrap_or(0)
}

fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '_' | '%' | '&' | '#' | '$' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Renders a booktabs `table` float with caption and label.
pub fn to_latex(columns: &[Column]) -> String {
    let headers = columns
        .iter()
        .map(|c| escape_latex(c.name))
        .collect::<Vec<String>>();
    let cells = columns
        .iter()
        .map(|c| c.cells.iter().map(|v| v.to_string()).collect::<Vec<_>>())
        .collect::<Vec<Vec<String>>>();
    let widths = headers
        .iter()
        .zip(cells.iter())
        .map(|(h, col)| col.iter().map(|s| s.len()).fold(h.len(), ::std::cmp::max))
        .collect::<Vec<usize>>();

    let line = |items: Vec<&str>| {
        items
            .iter()
            .zip(widths.iter())
            .map(|(s, &w)| format!("{:>w$}", s, w = w))
            .collect::<Vec<String>>()
            .join(" & ") + " \\\\\n"
    };

    let mut out = String::new();
    out.push_str("\\begin{table}\n");
    out.push_str("\\centering\n");
    let _ = writeln!(out, "\\caption{{{}}}", TITLE);
    let _ = writeln!(out, "\\label{{{}}}", LABEL);
    let _ = writeln!(out, "\\begin{{tabular}}{{{}}}", "r".repeat(columns.len()));
    out.push_str("\\toprule\n");
    out.push_str(&line(headers.iter().map(|s| s.as_str()).collect()));
    out.push_str("\\midrule\n");
    for row in 0..rows(columns) {
        out.push_str(&line(cells.iter().map(|col| col[row].as_str()).collect()));
    }
    out.push_str("\\bottomrule\n");
    out.push_str("\\end{tabular}\n");
    out.push_str("\\end{table}\n");
    out
}

/// Renders a heading followed by a right-aligned pipe table.
pub fn to_markdown(columns: &[Column]) -> String {
    let cells = columns
        .iter()
        .map(|c| c.cells.iter().map(|v| v.to_string()).collect::<Vec<_>>())
        .collect::<Vec<Vec<String>>>();
    // headers get two extra spaces of padding, cells do not
    let widths = columns
        .iter()
        .zip(cells.iter())
        .map(|(c, col)| {
            col.iter()
                .map(|s| s.len())
                .fold(c.name.len() + 2, ::std::cmp::max)
        })
        .collect::<Vec<usize>>();

    let line = |items: Vec<&str>| {
        let inner = items
            .iter()
            .zip(widths.iter())
            .map(|(s, &w)| format!(" {:>w$} ", s, w = w))
            .collect::<Vec<String>>()
            .join("|");
        format!("|{}|\n", inner)
    };

    let mut out = String::new();
    let _ = write!(out, "# {}\n\n", TITLE);
    out.push_str(&line(columns.iter().map(|c| c.name).collect()));
    let rule = widths
        .iter()
        .map(|&w| format!("{}:", "-".repeat(w + 1)))
        .collect::<Vec<String>>()
        .join("|");
    let _ = writeln!(out, "|{}|", rule);
    for row in 0..rows(columns) {
        out.push_str(&line(cells.iter().map(|col| col[row].as_str()).collect()));
    }
    out
}
