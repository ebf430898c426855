//! Control-flow parsers.
//!
//! A control-flow parser yields a two-state [`Flow`] value instead of
//! parsed data. The grammar uses them to express "stop this loop when the
//! following input would match": [`wrap_try`] turns any parser into a
//! zero-cost lookahead that never advances the input, and [`flip`] negates
//! the signal.

use super::{Outcome, Parser};

/// The verdict of a control-flow parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going (for loop terminators: the guarded input did not match).
    Continue,
    /// Stop.
    Break,
}

impl Flow {
    /// The opposite verdict.
    #[must_use]
    pub fn negate(self) -> Flow {
        match self {
            Flow::Continue => Flow::Break,
            Flow::Break => Flow::Continue,
        }
    }
}

/// A control-flow parser that always says [`Flow::Continue`].
#[must_use]
pub fn noop() -> Parser<Flow> {
    Parser::from_fn(|state| Outcome::Continue(Flow::Continue, state))
}

/// Lookahead: yields [`Flow::Continue`] iff `parser` would match here.
///
/// The input is never advanced, whatever `parser` consumes.
pub fn wrap_try<T: 'static>(parser: &Parser<T>) -> Parser<Flow> {
    let p = parser.clone();
    Parser::from_fn(move |state| {
        let flow = match p.run(state.clone()) {
            Outcome::Continue(..) => Flow::Continue,
            Outcome::Break(_) => Flow::Break,
        };
        Outcome::Continue(flow, state)
    })
}

/// Negate a control-flow parser's verdict.
pub fn flip(flow: &Parser<Flow>) -> Parser<Flow> {
    flow.map(Flow::negate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::text::token;

    #[test]
    fn wrap_try_never_consumes() {
        let p = wrap_try(&token("ab"));
        let (flow, state) = p.evaluate("abc");
        assert_eq!(flow, Some(Flow::Continue));
        assert_eq!(state.tape.text(), "abc");
    }

    #[test]
    fn wrap_try_signals_break_on_mismatch() {
        let p = wrap_try(&token("xy"));
        let (flow, state) = p.evaluate("abc");
        assert_eq!(flow, Some(Flow::Break));
        assert_eq!(state.tape.text(), "abc");
    }

    #[test]
    fn flip_negates() {
        let p = flip(&wrap_try(&token("ab")));
        assert_eq!(p.evaluate("abc").0, Some(Flow::Break));
        assert_eq!(p.evaluate("xyz").0, Some(Flow::Continue));
    }

    #[test]
    fn noop_always_continues() {
        assert_eq!(noop().evaluate("").0, Some(Flow::Continue));
    }
}
