//! Delimiter-run spans: emphasis, highlight, strikethrough, sub, sup.
//!
//! All five share one shape: an opening delimiter run, inline content
//! parsed under the matching scope, and a closing run identical to the
//! opener. Emphasis tries its six variants longest-first, which is what
//! makes `***x***` a single triple emphasis rather than nested spans.

use crate::ast::{DelimitedRun, Inline};
use crate::combinator::text::{between_both, token};
use crate::combinator::{options, Parser};
use crate::scope::{Scope, ScopeStack};

use super::inline_items;

/// A span delimited by `scope`'s terminator run on both sides, with
/// content parsed under `scope`.
fn delimited_run(env: &ScopeStack, scope: Scope) -> Parser<DelimitedRun> {
    let child = env.with(scope);
    let delim = token(scope.terminator());
    let content = Parser::lazy(move || inline_items(&child, false));
    between_both(&content, &delim).map(|(open, content, close)| DelimitedRun {
        open,
        content,
        close,
    })
}

/// Emphasis: `***`, `**`, `*`, `___`, `__`, `_`, tried in that order.
pub(super) fn emphasis(env: &ScopeStack) -> Parser<Inline> {
    let variants = [
        ('*', 3),
        ('*', 2),
        ('*', 1),
        ('_', 3),
        ('_', 2),
        ('_', 1),
    ];
    let alternatives = variants
        .iter()
        .map(|&(delimiter, count)| delimited_run(env, Scope::Emphasis { delimiter, count }))
        .collect();
    options(alternatives).map(Inline::Emphasis)
}

/// `==highlight==`.
pub(super) fn highlight(env: &ScopeStack) -> Parser<Inline> {
    delimited_run(env, Scope::Highlight).map(Inline::Highlight)
}

/// `~~strikethrough~~`. Tried before subscript so a double tilde is never
/// read as two singles.
pub(super) fn strikethrough(env: &ScopeStack) -> Parser<Inline> {
    delimited_run(env, Scope::Strikethrough).map(Inline::Strikethrough)
}

/// `~subscript~`.
pub(super) fn subscript(env: &ScopeStack) -> Parser<Inline> {
    delimited_run(env, Scope::Subscript).map(Inline::Sub)
}

/// `^superscript^`.
pub(super) fn superscript(env: &ScopeStack) -> Parser<Inline> {
    delimited_run(env, Scope::Superscript).map(Inline::Sup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceText;

    fn top() -> ScopeStack {
        ScopeStack::new()
    }

    fn expect_run(node: Option<Inline>) -> DelimitedRun {
        match node {
            Some(
                Inline::Emphasis(run)
                | Inline::Highlight(run)
                | Inline::Strikethrough(run)
                | Inline::Sub(run)
                | Inline::Sup(run),
            ) => run,
            other => panic!("expected a delimited span, got {other:?}"),
        }
    }

    #[test]
    fn single_star_emphasis() {
        let (node, state) = emphasis(&top()).evaluate("*x* rest");
        let run = expect_run(node);
        assert_eq!(run.open.text(), "*");
        assert_eq!(run.close.text(), "*");
        assert_eq!(state.tape.text(), " rest");
    }

    #[test]
    fn triple_wins_over_nested() {
        let (node, state) = emphasis(&top()).evaluate("***x***");
        let run = expect_run(node);
        assert_eq!(run.open.text(), "***");
        assert_eq!(run.close.text(), "***");
        assert_eq!(run.content.len(), 1);
        assert!(state.tape.is_empty());
    }

    #[test]
    fn underscore_variants() {
        let (node, _) = emphasis(&top()).evaluate("__x__");
        let run = expect_run(node);
        assert_eq!(run.open.text(), "__");
    }

    #[test]
    fn delimiters_must_balance() {
        assert!(emphasis(&top()).evaluate("*x**").0.is_some());
        assert!(emphasis(&top()).evaluate("*x").0.is_none());
        assert!(emphasis(&top()).evaluate("**x*").0.is_none());
    }

    #[test]
    fn nested_emphasis_in_double() {
        let (node, _) = emphasis(&top()).evaluate("**a *b* c**");
        let run = expect_run(node);
        assert_eq!(run.open.text(), "**");
        assert_eq!(run.content.len(), 3);
        assert!(matches!(run.content[1], Inline::Emphasis(_)));
    }

    #[test]
    fn highlight_double_equals() {
        let (node, _) = highlight(&top()).evaluate("==mark==");
        let run = expect_run(node);
        assert_eq!(run.open.text(), "==");
        assert_eq!(run.source_text(), "==mark==");
    }

    #[test]
    fn strikethrough_and_sub_share_tilde() {
        let (node, _) = strikethrough(&top()).evaluate("~~gone~~");
        assert_eq!(expect_run(node).open.text(), "~~");
        let (node, _) = subscript(&top()).evaluate("~low~");
        assert_eq!(expect_run(node).open.text(), "~");
    }

    #[test]
    fn superscript_caret() {
        let (node, _) = superscript(&top()).evaluate("^up^");
        assert_eq!(expect_run(node).source_text(), "^up^");
    }

    #[test]
    fn empty_content_is_rejected() {
        assert!(emphasis(&top()).evaluate("**").0.is_none());
        assert!(highlight(&top()).evaluate("====").0.is_none());
    }
}
