//! Character- and text-level parsers plus tuple combinators.
//!
//! Token-valued parsers return [`Tape`]s rather than strings so that the
//! matched characters keep their source positions all the way into the
//! tree.

use super::{Outcome, Parser};
use crate::position::FatChar;
use crate::tape::Tape;

// ---------------------------------------------------------------------------
// Single characters
// ---------------------------------------------------------------------------

/// Consume any single character. Breaks on empty input.
#[must_use]
pub fn any_char() -> Parser<FatChar> {
    char_if(|_| true)
}

/// Consume one character satisfying `pred`.
pub fn char_if(pred: impl Fn(char) -> bool + 'static) -> Parser<FatChar> {
    Parser::from_fn(move |state| match state.tape.uncons() {
        Some((c, rest)) if pred(c.value) => Outcome::Continue(c, state.with_tape(rest)),
        _ => Outcome::Break(state),
    })
}

/// Consume exactly the character `expected`.
#[must_use]
pub fn chr(expected: char) -> Parser<FatChar> {
    char_if(move |c| c == expected)
}

/// Consume one decimal digit.
#[must_use]
pub fn digit() -> Parser<FatChar> {
    char_if(|c| c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Tokens and runs
// ---------------------------------------------------------------------------

/// Consume the exact string `literal` from the head of the tape.
pub fn token(literal: impl Into<String>) -> Parser<Tape> {
    let literal = literal.into();
    Parser::from_fn(move |state| match state.tape.split_prefix(&literal) {
        Some((matched, rest)) => Outcome::Continue(matched, state.with_tape(rest)),
        None => Outcome::Break(state),
    })
}

/// Consume the longest (possibly empty) run of characters satisfying `pred`.
pub fn take_while(pred: impl Fn(char) -> bool + 'static) -> Parser<Tape> {
    Parser::from_fn(move |state| {
        let n = state
            .tape
            .iter()
            .take_while(|c| pred(c.value))
            .count();
        let (run, rest) = state.tape.split_at(n);
        Outcome::Continue(run, state.with_tape(rest))
    })
}

/// Consume the longest run of characters satisfying `pred`; at least one.
pub fn take_while1(pred: impl Fn(char) -> bool + 'static) -> Parser<Tape> {
    let run = take_while(pred);
    Parser::from_fn(move |state| match run.run(state.clone()) {
        Outcome::Continue(tape, next) if !tape.is_empty() => Outcome::Continue(tape, next),
        _ => Outcome::Break(state),
    })
}

/// Zero or more spaces and tabs (never newlines).
#[must_use]
pub fn whitespace() -> Parser<Tape> {
    take_while(|c| c == ' ' || c == '\t')
}

/// One or more non-newline characters.
#[must_use]
pub fn rest_of_line() -> Parser<Tape> {
    take_while1(|c| c != '\n')
}

/// A single line feed.
#[must_use]
pub fn newline() -> Parser<Tape> {
    token("\n")
}

/// A single space.
#[must_use]
pub fn space() -> Parser<Tape> {
    token(" ")
}

// ---------------------------------------------------------------------------
// Tuple combinators
// ---------------------------------------------------------------------------

/// Run two parsers in sequence, producing a pair.
pub fn and<A: 'static, B: 'static>(p: &Parser<A>, q: &Parser<B>) -> Parser<(A, B)> {
    let p = p.clone();
    let q = q.clone();
    Parser::from_fn(move |state| match p.run(state) {
        Outcome::Continue(a, next) => q.run(next).map(|b| (a, b)),
        Outcome::Break(state) => Outcome::Break(state),
    })
}

/// Run three parsers in sequence, producing a triple.
pub fn and2<A: 'static, B: 'static, C: 'static>(
    p: &Parser<A>,
    q: &Parser<B>,
    r: &Parser<C>,
) -> Parser<(A, B, C)> {
    let pq = and(p, q);
    let paired = and(&pq, r);
    paired.map(|((a, b), c)| (a, b, c))
}

/// Run four parsers in sequence, producing a quadruple.
pub fn and3<A: 'static, B: 'static, C: 'static, D: 'static>(
    p: &Parser<A>,
    q: &Parser<B>,
    r: &Parser<C>,
    s: &Parser<D>,
) -> Parser<(A, B, C, D)> {
    let abc = and2(p, q, r);
    let paired = and(&abc, s);
    paired.map(|((a, b, c), d)| (a, b, c, d))
}

/// `open`, then `inner`, then `close`, returning the triple in source order.
pub fn between<O: 'static, A: 'static, C: 'static>(
    open: &Parser<O>,
    inner: &Parser<A>,
    close: &Parser<C>,
) -> Parser<(O, A, C)> {
    and2(open, inner, close)
}

/// Like [`between`], using the same parser for the open and close delimiters.
pub fn between_both<A: 'static>(inner: &Parser<A>, delim: &Parser<Tape>) -> Parser<(Tape, A, Tape)> {
    between(delim, inner, delim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_char_consumes_one() {
        let (value, state) = any_char().evaluate("ab");
        assert_eq!(value.unwrap().value, 'a');
        assert_eq!(state.tape.text(), "b");
    }

    #[test]
    fn any_char_breaks_on_empty() {
        assert_eq!(any_char().evaluate("").0, None);
    }

    #[test]
    fn chr_rejects_wrong_char() {
        assert!(chr('x').evaluate("y").0.is_none());
        assert!(chr('x').evaluate("x").0.is_some());
    }

    #[test]
    fn token_matches_prefix_only() {
        let (value, state) = token("ab").evaluate("abc");
        assert_eq!(value.unwrap().text(), "ab");
        assert_eq!(state.tape.text(), "c");
        assert!(token("abd").evaluate("abc").0.is_none());
    }

    #[test]
    fn take_while_can_be_empty() {
        let (value, state) = take_while(|c| c == 'x').evaluate("abc");
        assert!(value.unwrap().is_empty());
        assert_eq!(state.tape.text(), "abc");
    }

    #[test]
    fn take_while1_requires_one() {
        assert!(take_while1(|c| c == 'x').evaluate("abc").0.is_none());
        let (value, _) = take_while1(|c| c == 'x').evaluate("xxa");
        assert_eq!(value.unwrap().text(), "xx");
    }

    #[test]
    fn whitespace_excludes_newlines() {
        let (value, state) = whitespace().evaluate(" \t\nx");
        assert_eq!(value.unwrap().text(), " \t");
        assert_eq!(state.tape.text(), "\nx");
    }

    #[test]
    fn rest_of_line_stops_at_newline() {
        let (value, state) = rest_of_line().evaluate("ab\ncd");
        assert_eq!(value.unwrap().text(), "ab");
        assert_eq!(state.tape.text(), "\ncd");
        assert!(rest_of_line().evaluate("\nx").0.is_none());
    }

    #[test]
    fn and_pairs_in_order() {
        let p = and(&token("a"), &token("b"));
        let ((a, b), state) = match p.evaluate("abc") {
            (Some(pair), state) => (pair, state),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(a.text(), "a");
        assert_eq!(b.text(), "b");
        assert_eq!(state.tape.text(), "c");
    }

    #[test]
    fn and_backtracks_on_second_failure() {
        let p = and(&token("a"), &token("x"));
        let q = token("ab");
        let (value, _) = p.map(|(a, _)| a).or(&q).evaluate("abc");
        assert_eq!(value.unwrap().text(), "ab");
    }

    #[test]
    fn between_returns_source_order_triple() {
        let p = between(&token("("), &token("x"), &token(")"));
        let (value, _) = p.evaluate("(x)");
        let (open, inner, close) = value.unwrap();
        assert_eq!(open.text(), "(");
        assert_eq!(inner.text(), "x");
        assert_eq!(close.text(), ")");
    }

    #[test]
    fn between_both_uses_same_delimiter() {
        let p = between_both(&token("x"), &token("~~"));
        let (value, _) = p.evaluate("~~x~~");
        assert!(value.is_some());
        assert!(between_both(&token("x"), &token("~~")).evaluate("~~x~").0.is_none());
    }
}
