//! Minimal CSV reading and writing for the worksheet files.
//!
//! Tolerant on input (quoted fields, doubled-quote escapes, CRLF, a
//! trailing unterminated field) and conservative on output (quotes only
//! when a cell needs them). Comma-separated throughout; the worksheet
//! files never use another separator.

use std::io::{self, Write};
use std::mem::take;

/// Parses a whole CSV document into rows of cells. Blank lines are
/// dropped; everything else is kept as-is, including rows whose width
/// disagrees with the header.
#[must_use]
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row: Vec<String> = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if row.len() > 1 || !row[0].is_empty() {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush the trailing row even when the final newline (or a closing
    // quote) is missing.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}

/// Writes one row, terminated by a newline.
///
/// # Errors
///
/// Propagates write failures from `w`.
pub fn write_row<W: Write>(mut w: W, row: &[String]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, ",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Renders a header row plus data rows as one CSV string.
#[must_use]
pub fn to_csv_string(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let header: Vec<String> = header.iter().map(|&c| c.to_owned()).collect();
    let _ = write_row(&mut buf, &header);
    for row in rows {
        let _ = write_row(&mut buf, row);
    }
    String::from_utf8(buf).unwrap_or_default()
}
