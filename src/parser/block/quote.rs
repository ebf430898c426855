//! Blockquotes.
//!
//! A blockquote aggregates consecutive `> `-prefixed lines with the line
//! machinery: the leaders are captured per line, the de-leadered body is
//! re-parsed as blocks, and whatever trailing whitespace the aggregation
//! trimmed is put back for the blocks that follow.

use crate::ast::{Block, Blockquote};
use crate::combinator::bound::lines;
use crate::combinator::flow::{flip, wrap_try};
use crate::combinator::text::{and, space, token};
use crate::combinator::Parser;
use crate::tape::Tape;

use super::nested_blocks;

/// `> ` and the space after it, as one leader tape.
fn leader() -> Parser<Tape> {
    and(&token(">"), &space()).map(|(mark, sp)| mark.concat(&sp))
}

/// A `>`-prefixed blockquote.
pub(super) fn blockquote() -> Parser<Block> {
    let stop_at_blank = flip(&wrap_try(&token("\n\n")));
    lines(&leader(), &stop_at_blank, true).map(|(markers, content)| {
        Block::Blockquote(Blockquote {
            markers,
            content: nested_blocks(content),
        })
    })
}
