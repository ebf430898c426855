//! Fenced code blocks.
//!
//! A triple-backtick fence, an optional info string on the fence line,
//! verbatim content, and a closing fence alone on its line. An unclosed
//! fence is not a code block at all; the paragraph fallback picks the
//! text up instead, since failure is local and no partial tree is ever
//! produced.

use crate::ast::{Block, FencedCodeBlock};
use crate::combinator::{Outcome, Parser};

/// ```` ```info ```` ... ```` ``` ````.
pub(super) fn fenced_code_block() -> Parser<Block> {
    Parser::from_fn(|state| {
        let Some((open_fence, rest)) = state.tape.split_prefix("```") else {
            return Outcome::Break(state);
        };
        let info_len = rest.iter().take_while(|c| !c.is_newline()).count();
        let (info, rest) = rest.split_at(info_len);
        let info_string = if info.is_empty() { None } else { Some(info) };

        // Find the newline that starts the closing fence line: the fence
        // must be followed by a newline or the end of input.
        let values: Vec<char> = rest.iter().map(|c| c.value).collect();
        let mut close_at = None;
        let mut i = 0;
        while i < values.len() {
            if values[i] == '\n'
                && values[i + 1..].starts_with(&['`', '`', '`'])
                && matches!(values.get(i + 4).copied(), None | Some('\n'))
            {
                close_at = Some(i);
                break;
            }
            i += 1;
        }
        let Some(close_at) = close_at else {
            return Outcome::Break(state);
        };

        let (content, tail) = rest.split_at(close_at + 1);
        let (close_fence, remaining) = tail.split_at(3);
        Outcome::Continue(
            Block::FencedCodeBlock(FencedCodeBlock {
                open_fence,
                info_string,
                content,
                close_fence,
            }),
            state.with_tape(remaining),
        )
    })
}
