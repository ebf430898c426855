//! The scope-aware inline grammar.
//!
//! [`inline`] is the single-node dispatcher. Its alternative order is a
//! contract: plain text first, then links, images, the emphasis family,
//! and inline code. The order decides ties (a `***` run is a triple
//! emphasis, never a nested single inside a double), so changing it
//! changes output trees.
//!
//! Every container pushes a [`Scope`] before parsing its content and
//! derives the content's terminator from the innermost scope only. Plain
//! text additionally stops at the characters that can open another inline
//! construct, handing the decision to the alternatives after it.

mod code;
mod link;
mod span;

use crate::ast::Inline;
use crate::combinator::text::{newline, token};
use crate::combinator::{options, Outcome, Parser, State};
use crate::scope::ScopeStack;
use crate::tape::Tape;

use code::inline_code;
use link::{image, link};
use span::{emphasis, highlight, strikethrough, subscript, superscript};

/// One inline node, in the dispatcher order that decides ties.
pub(crate) fn inline(env: &ScopeStack) -> Parser<Inline> {
    options(vec![
        plain_text(env).labelled("plain-text"),
        link(env).labelled("link"),
        image(env).labelled("image"),
        emphasis(env).labelled("emphasis"),
        highlight(env).labelled("highlight"),
        strikethrough(env).labelled("strikethrough"),
        subscript(env).labelled("sub"),
        superscript(env).labelled("sup"),
        inline_code().labelled("inline-code"),
    ])
}

/// [`inline`] plus a newline alternative, for paragraph content.
///
/// None of the nine dispatcher alternatives accepts a newline head, so
/// appending the line break cannot disturb their tie-breaking.
pub(crate) fn inline_with_breaks(env: &ScopeStack) -> Parser<Inline> {
    inline(env).or(&line_break())
}

/// A sequence of inline nodes, stopping before the innermost scope's
/// terminator would match.
pub(crate) fn inline_items(env: &ScopeStack, allow_empty: bool) -> Parser<Vec<Inline>> {
    let item = inline(env);
    match env.active_terminator() {
        Some(terminator) => {
            let stop = token(terminator);
            if allow_empty {
                item.many_unless(&stop).map(|(items, _)| items)
            } else {
                item.some_unless(&stop).map(|(items, _)| items)
            }
        }
        None => {
            if allow_empty {
                item.many()
            } else {
                item.some()
            }
        }
    }
}

/// Re-parse an isolated region as inline content.
///
/// Anything the inline grammar leaves unconsumed inside the region becomes
/// a trailing [`Inline::Raw`] node, so the region's characters all survive
/// into the tree.
pub(crate) fn inline_region(region: Tape, with_breaks: bool) -> Vec<Inline> {
    if region.is_empty() {
        return Vec::new();
    }
    let env = ScopeStack::new();
    let item = if with_breaks {
        inline_with_breaks(&env)
    } else {
        inline(&env)
    };
    match item.many().run(State::new(region)) {
        Outcome::Continue(mut items, state) => {
            if !state.tape.is_empty() {
                items.push(Inline::Raw(state.tape));
            }
            items
        }
        Outcome::Break(state) => vec![Inline::Raw(state.tape)],
    }
}

/// A newline as an inline node.
fn line_break() -> Parser<Inline> {
    newline().map(Inline::LineBreak).labelled("line-break")
}

/// Characters at which a plain-text run hands over to the alternatives
/// after it. `!` and `=` only stop text when they could actually open an
/// image or a highlight, so ordinary prose keeps them.
fn opens_construct(rest: &Tape, value: char) -> bool {
    match value {
        '*' | '_' | '~' | '^' | '[' | '`' => true,
        '!' => rest.starts_with("!["),
        '=' => rest.starts_with("=="),
        _ => false,
    }
}

/// A run of ordinary text.
///
/// Consumes characters while the head is not a newline, does not match the
/// innermost scope's terminator, and cannot open another inline construct.
/// A zero-length run is a successful parse only when the scope terminator
/// matches immediately; higher layers treat that as "no more inline
/// content" and their no-progress guard ends the loop.
fn plain_text(env: &ScopeStack) -> Parser<Inline> {
    let terminator = env.active_terminator();
    Parser::from_fn(move |state| {
        let mut taken = 0;
        let mut rest = state.tape.clone();
        while let Some(c) = rest.head() {
            if c.is_newline() {
                break;
            }
            if let Some(t) = &terminator {
                if rest.starts_with(t) {
                    break;
                }
            }
            if opens_construct(&rest, c.value) {
                break;
            }
            if let Some((_, tail)) = rest.uncons() {
                rest = tail;
                taken += 1;
            } else {
                break;
            }
        }
        if taken > 0 {
            let (text, remaining) = state.tape.split_at(taken);
            return Outcome::Continue(Inline::PlainText(text), state.with_tape(remaining));
        }
        let at_terminator = terminator
            .as_ref()
            .is_some_and(|t| state.tape.starts_with(t));
        if at_terminator {
            Outcome::Continue(Inline::PlainText(Tape::default()), state)
        } else {
            Outcome::Break(state)
        }
    })
}
