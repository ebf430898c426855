//! Horizontal rules.

use crate::ast::{Block, HorizontalRule};
use crate::combinator::{Outcome, Parser};

/// Three or more of `-`, `*`, or `_`, all the same character, ending the
/// line.
pub(super) fn horizontal_rule() -> Parser<Block> {
    Parser::from_fn(|state| {
        let Some(first) = state.tape.head() else {
            return Outcome::Break(state);
        };
        if !matches!(first.value, '-' | '*' | '_') {
            return Outcome::Break(state);
        }
        let n = state
            .tape
            .iter()
            .take_while(|c| c.value == first.value)
            .count();
        if n < 3 {
            return Outcome::Break(state);
        }
        let (run, rest) = state.tape.split_at(n);
        if rest.head().is_some_and(|c| !c.is_newline()) {
            return Outcome::Break(state);
        }
        Outcome::Continue(
            Block::HorizontalRule(HorizontalRule { tokens: run }),
            state.with_tape(rest),
        )
    })
}
