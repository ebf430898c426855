//! The Markdown grammar, composed from the combinator library.
//!
//! The grammar has two halves. The **inline grammar** is scope-aware: each
//! construct pushes a [`Scope`](crate::scope::Scope) before parsing its
//! content, and the content loop stops when the innermost scope's
//! terminator would match. The **block grammar** is indentation-aware: a
//! block carves its region out of the input first (by leader aggregation
//! or column capture) and re-parses the region in isolation.

pub(crate) mod block;
pub(crate) mod inline;

use crate::ast::{Block, Inline};
use crate::combinator::State;
use crate::scope::ScopeStack;

/// Parse a whole document into blocks.
///
/// Never panics. On success the blocks are returned together with the
/// final state; a non-empty `state.tape` means trailing input the grammar
/// could not place, and `state.trace` carries the grammar labels attempted
/// deepest into the parse.
#[must_use]
pub fn parse(source: &str) -> (Option<Vec<Block>>, State) {
    block::document().evaluate(source)
}

/// Parse a string as inline content, line breaks included.
#[must_use]
pub fn parse_inlines(source: &str) -> (Option<Vec<Inline>>, State) {
    let env = ScopeStack::new();
    inline::inline_with_breaks(&env).many().evaluate(source)
}
