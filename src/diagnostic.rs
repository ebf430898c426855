//! Structured diagnostics for grammar development.
//!
//! Parsing has exactly two outcomes and no error type; what a failed or
//! incomplete parse leaves behind is its final [`State`]. A [`ParseTrace`]
//! is a structured snapshot of that state: the deepest grammar labels
//! attempted, the position the parse stopped at, and a preview of the
//! unconsumed input. The crate does not render diagnostics; consumers
//! build their own reports from this data.

use crate::combinator::State;
use crate::position::Position;

/// How many characters of the unconsumed input a trace keeps.
const REMAINDER_PREVIEW: usize = 80;

/// A structured snapshot of where a parse stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTrace {
    /// The grammar labels on the state's trace, outermost first.
    pub labels: Vec<&'static str>,
    /// The position of the first unconsumed character, if any input
    /// remains.
    pub position: Option<Position>,
    /// A bounded preview of the unconsumed input.
    pub remainder: String,
    /// Whether the whole input was consumed.
    pub complete: bool,
}

impl ParseTrace {
    /// Snapshot a final parser state.
    #[must_use]
    pub fn from_state(state: &State) -> ParseTrace {
        ParseTrace {
            labels: state.trace.clone(),
            position: state.tape.position(),
            remainder: state.tape.take(REMAINDER_PREVIEW).text(),
            complete: state.tape.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::text::token;

    #[test]
    fn complete_parse_has_empty_remainder() {
        let (_, state) = token("ab").evaluate("ab");
        let trace = ParseTrace::from_state(&state);
        assert!(trace.complete);
        assert!(trace.remainder.is_empty());
        assert_eq!(trace.position, None);
    }

    #[test]
    fn failed_parse_keeps_labels_and_position() {
        let (_, state) = token("ab").labelled("pair").evaluate("xy");
        let trace = ParseTrace::from_state(&state);
        assert!(!trace.complete);
        assert_eq!(trace.labels, vec!["pair"]);
        assert_eq!(trace.remainder, "xy");
        assert_eq!(trace.position.map(|p| p.offset), Some(0));
    }
}
