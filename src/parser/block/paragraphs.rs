//! Paragraphs: the block fallback.
//!
//! A paragraph accumulates everything up to the next blank line (the
//! two-character `\n\n` lookahead) or the end of input, then re-parses the
//! chunk as inline content with line breaks enabled. Whatever the inline
//! grammar cannot place, for example a stray emphasis delimiter, survives
//! as a trailing raw node.

use crate::ast::{Block, Paragraph};
use crate::combinator::{Outcome, Parser};

use crate::parser::inline::inline_region;

/// The paragraph fallback.
pub(super) fn paragraph() -> Parser<Block> {
    Parser::from_fn(|state| {
        let tape = &state.tape;
        let mut split = tape.len();
        for (i, (a, b)) in tape.iter().zip(tape.iter().skip(1)).enumerate() {
            if a.is_newline() && b.is_newline() {
                split = i;
                break;
            }
        }
        let (chunk, rest) = tape.split_at(split);
        if chunk.is_empty() {
            return Outcome::Break(state.clone());
        }
        let content = inline_region(chunk, true);
        Outcome::Continue(
            Block::Paragraph(Paragraph { content }),
            state.with_tape(rest),
        )
    })
}
