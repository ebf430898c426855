//! List items: unordered, ordered, and task.
//!
//! A list item is a leader (bullet, number, or task header) ending in a
//! space, then a body of every following character that is whitespace or
//! sits at a column past the space. The body is de-indented line by line
//! and re-parsed as blocks, so items nest arbitrarily. The indentation
//! stripped from continuation lines is re-derived from the leader column
//! when the item is written back to source.

use crate::ast::{
    Block, InSquareBrackets, OrderedListItem, TaskListItem, UnorderedListItem,
};
use crate::combinator::bound::bounded;
use crate::combinator::text::{and, and2, char_if, space, take_while1, token};
use crate::combinator::{options, Outcome, Parser};
use crate::tape::Tape;

use super::{document, raw_paragraph};

/// Any of the three list item forms, unordered first.
pub(super) fn list_item() -> Parser<Block> {
    options(vec![unordered_item(), ordered_item(), task_item()])
}

/// Everything that belongs to an item body: whitespace, or characters
/// indented past `indent`.
fn indented_body(indent: usize) -> Parser<Tape> {
    Parser::from_fn(move |state| {
        let n = state
            .tape
            .iter()
            .take_while(|c| c.is_whitespace() || c.position.column > indent)
            .count();
        let (body, rest) = state.tape.split_at(n);
        Outcome::Continue(body, state.with_tape(rest))
    })
}

/// Strip the leading whitespace that sits at or before `indent` from each
/// line of a captured body.
fn dedent(indent: usize, body: &Tape) -> Tape {
    body.map_lines(|line| {
        let drop = line
            .iter()
            .take_while(|c| c.is_whitespace() && c.position.column <= indent)
            .count();
        line.split_at(drop).1
    })
}

/// Capture, de-indent, and re-parse an item body as blocks.
fn body_blocks(indent: usize) -> Parser<Vec<Block>> {
    let extract = indented_body(indent).map(move |body| dedent(indent, &body));
    let execute = document();
    bounded(&extract, &execute).map(|(blocks, leftover)| {
        let mut blocks = blocks.unwrap_or_default();
        if !leftover.tape.is_empty() {
            blocks.push(raw_paragraph(leftover.tape));
        }
        blocks
    })
}

/// The column that bounds an item body: the column of the space ending the
/// leader.
fn leader_indent(space: &Tape) -> usize {
    space.last().map_or(0, |c| c.position.column)
}

/// `- item` (also `*` and `+`).
fn unordered_item() -> Parser<Block> {
    let bullet = options(vec![token("-"), token("*"), token("+")]);
    let lead = and(&bullet, &space());
    lead.and_then(|(bullet, space)| {
        body_blocks(leader_indent(&space)).map(move |content| {
            Block::UnorderedListItem(UnorderedListItem {
                bullet: bullet.clone(),
                space: space.clone(),
                content,
            })
        })
    })
}

/// `1. item`.
fn ordered_item() -> Parser<Block> {
    let number = take_while1(|c| c.is_ascii_digit());
    let lead = and2(&number, &token("."), &space());
    lead.and_then(|(number, dot, space)| {
        body_blocks(leader_indent(&space)).map(move |content| {
            Block::OrderedListItem(OrderedListItem {
                number: number.clone(),
                dot: dot.clone(),
                space: space.clone(),
                content,
            })
        })
    })
}

/// `[ ] item`, `[x] item`, `[X] item`, `[-] item`.
fn task_item() -> Parser<Block> {
    let status = char_if(|c| matches!(c, ' ' | 'x' | 'X' | '-'));
    let header = and2(&token("["), &status.optional(), &token("]"));
    let lead = and(&header, &space());
    lead.and_then(|((open, status, close), space)| {
        body_blocks(leader_indent(&space)).map(move |content| {
            Block::TaskListItem(TaskListItem {
                header: InSquareBrackets {
                    open: open.clone(),
                    content: status,
                    close: close.clone(),
                },
                space: space.clone(),
                content,
            })
        })
    })
}
