//! Pipe tables.
//!
//! A table is a header row, a separator row of dashes with optional
//! alignment colons, and zero or more data rows. Each row is parsed
//! inside a bounded line so the cell grammar cannot run past it. Cell
//! contents stay raw tapes; inline re-parsing of cells is a future
//! extension.

use crate::ast::{Alignment, Block, Cell, Row, SeparatorCell, SeparatorRow, Table};
use crate::combinator::bound::bounded;
use crate::combinator::text::{and, newline, rest_of_line};
use crate::combinator::{Outcome, Parser};
use crate::tape::Tape;

/// One whole line, its newline included when present.
fn line_extract() -> Parser<Tape> {
    and(&rest_of_line(), &newline().optional()).map(|(line, nl)| match nl {
        Some(nl) => line.concat(&nl),
        None => line,
    })
}

/// Run `execute` over one bounded line, requiring it to consume the line
/// entirely.
fn bounded_line<T: Clone + 'static>(execute: &Parser<T>) -> Parser<T> {
    bounded(&line_extract(), execute).and_then(|(value, inner)| match value {
        Some(value) if inner.tape.is_empty() => Parser::pure(value),
        _ => Parser::fail(),
    })
}

/// Split one line into pipe-separated cells. Breaks unless the line holds
/// at least one pipe and nothing is left over.
fn row_cells() -> Parser<Row> {
    Parser::from_fn(|state| {
        let mut cells = Vec::new();
        let mut rest = state.tape.clone();
        let mut saw_pipe = false;
        loop {
            let pipe = match rest.split_prefix("|") {
                Some((pipe, tail)) => {
                    rest = tail;
                    saw_pipe = true;
                    Some(pipe)
                }
                None => None,
            };
            let n = rest
                .iter()
                .take_while(|c| c.value != '|' && !c.is_newline())
                .count();
            let (content, tail) = rest.split_at(n);
            rest = tail;
            if pipe.is_none() && content.is_empty() {
                break;
            }
            cells.push(Cell { pipe, content });
            if !rest.starts_with("|") {
                break;
            }
        }
        if !saw_pipe {
            return Outcome::Break(state);
        }
        let (nl, rest) = match rest.split_prefix("\n") {
            Some((nl, tail)) => (Some(nl), tail),
            None => (None, rest),
        };
        if !rest.is_empty() {
            return Outcome::Break(state);
        }
        Outcome::Continue(
            Row {
                cells,
                newline: nl,
            },
            state.with_tape(rest),
        )
    })
}

/// A data or header row: a bounded line of cells.
fn table_row() -> Parser<Row> {
    bounded_line(&row_cells())
}

/// Parse `:?---+:?` (three or more dashes) out of a separator cell.
fn separator_alignment(text: &str) -> Option<Alignment> {
    let trimmed = text.trim();
    let left = trimmed.starts_with(':');
    let right = trimmed.len() > 1 && trimmed.ends_with(':');
    let dashes = &trimmed[usize::from(left)..trimmed.len() - usize::from(right)];
    if dashes.len() < 3 || !dashes.chars().all(|c| c == '-') {
        return None;
    }
    Some(match (left, right) {
        (false, false) => Alignment::None,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (true, true) => Alignment::Center,
    })
}

/// Validate a row as a separator row.
///
/// Every cell must be a dash run with optional colons; only a trailing
/// empty cell (from a trailing pipe) is exempt.
fn to_separator(row: Row) -> Option<SeparatorRow> {
    let count = row.cells.len();
    let mut cells = Vec::with_capacity(count);
    for (i, cell) in row.cells.into_iter().enumerate() {
        let text = cell.content.text();
        if text.trim().is_empty() {
            if i + 1 != count {
                return None;
            }
            cells.push(SeparatorCell {
                pipe: cell.pipe,
                content: cell.content,
                alignment: Alignment::None,
            });
            continue;
        }
        let alignment = separator_alignment(&text)?;
        cells.push(SeparatorCell {
            pipe: cell.pipe,
            content: cell.content,
            alignment,
        });
    }
    Some(SeparatorRow {
        cells,
        newline: row.newline,
    })
}

/// The separator row under the header.
fn separator_row() -> Parser<SeparatorRow> {
    let validated = row_cells().and_then(|row| match to_separator(row) {
        Some(sep) => Parser::pure(sep),
        None => Parser::fail(),
    });
    bounded_line(&validated)
}

/// A whole pipe table.
pub(super) fn table() -> Parser<Block> {
    let header = table_row();
    let separator = separator_row();
    let rows = table_row().many();
    and(&header, &and(&separator, &rows)).map(|(header, (separator, rows))| {
        Block::Table(Table {
            header,
            separator,
            rows,
        })
    })
}
