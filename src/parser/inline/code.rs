//! Inline code spans.
//!
//! The opening delimiter is a run of one or more backticks; the closing
//! delimiter is the first later run of exactly the same length. Content
//! between the runs is verbatim, so shorter or longer backtick runs inside
//! the span are ordinary content.

use crate::ast::{Inline, InlineCode};
use crate::combinator::{Outcome, Parser};

/// `` `code` `` with run-length matched delimiters.
pub(super) fn inline_code() -> Parser<Inline> {
    Parser::from_fn(|state| {
        let open_len = state
            .tape
            .iter()
            .take_while(|c| c.value == '`')
            .count();
        if open_len == 0 {
            return Outcome::Break(state);
        }
        let (open, rest) = state.tape.split_at(open_len);

        let values: Vec<char> = rest.iter().map(|c| c.value).collect();
        let mut i = 0;
        while i < values.len() {
            if values[i] == '`' {
                let mut j = i;
                while j < values.len() && values[j] == '`' {
                    j += 1;
                }
                if j - i == open_len {
                    let (content, tail) = rest.split_at(i);
                    let (close, remaining) = tail.split_at(open_len);
                    let node = Inline::InlineCode(InlineCode {
                        open,
                        content,
                        close,
                    });
                    return Outcome::Continue(node, state.with_tape(remaining));
                }
                i = j;
            } else {
                i += 1;
            }
        }
        Outcome::Break(state)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceText;

    fn expect_code(node: Option<Inline>) -> InlineCode {
        match node {
            Some(Inline::InlineCode(code)) => code,
            other => panic!("expected inline code, got {other:?}"),
        }
    }

    #[test]
    fn single_backticks() {
        let (node, state) = inline_code().evaluate("`x` rest");
        let code = expect_code(node);
        assert_eq!(code.open.text(), "`");
        assert_eq!(code.content.text(), "x");
        assert_eq!(code.close.text(), "`");
        assert_eq!(state.tape.text(), " rest");
    }

    #[test]
    fn double_run_skips_lone_backtick() {
        let (node, state) = inline_code().evaluate("`` a ` b ``");
        let code = expect_code(node);
        assert_eq!(code.open.text(), "``");
        assert_eq!(code.content.text(), " a ` b ");
        assert_eq!(code.close.text(), "``");
        assert!(state.tape.is_empty());
    }

    #[test]
    fn longer_inner_run_is_not_a_close() {
        // A three-backtick run cannot close a two-backtick opener.
        assert!(inline_code().evaluate("``a```").0.is_none());
    }

    #[test]
    fn unclosed_run_breaks() {
        assert!(inline_code().evaluate("`abc").0.is_none());
        assert!(inline_code().evaluate("abc").0.is_none());
    }

    #[test]
    fn content_is_verbatim() {
        let (node, _) = inline_code().evaluate("`*not emphasis*`");
        let code = expect_code(node);
        assert_eq!(code.content.text(), "*not emphasis*");
        assert_eq!(
            Inline::InlineCode(code).source_text(),
            "`*not emphasis*`"
        );
    }
}
