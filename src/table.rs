use crate::book::BookRow;

/// Column headers of the book table, after the row number
pub const COLUMN_HEADERS: [&str; 3] = ["Title", "Author", "Status"];

/// Render `rows` as a plain-text table with a row-number column
///
/// Column widths are fitted to the widest cell. An empty slice renders the
/// header followed by `(no books)`.
#[must_use]
pub fn render_table(rows: &[BookRow]) -> String {
    let number_width = rows.len().saturating_sub(1).to_string().len().max(1);
    let mut widths = COLUMN_HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, "#", number_width, COLUMN_HEADERS, widths);

    let rule_len = widths.iter().fold(number_width, |acc, w| acc.saturating_add(w.saturating_add(2)));
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no books)\n");
    }
    for (index, row) in rows.iter().enumerate() {
        push_line(&mut out, &index.to_string(), number_width, cells(row), widths);
    }

    out
}

/// The three display cells of a row
fn cells(row: &BookRow) -> [&str; 3] {
    [row.title.as_str(), row.author.as_str(), row.status.as_str()]
}

/// Append one padded table line
fn push_line(out: &mut String, number: &str, number_width: usize, cells: [&str; 3], widths: [usize; 3]) {
    out.push_str(&format!("{number:>number_width$}"));
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!("  {cell:<width$}"));
    }
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}
