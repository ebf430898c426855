//! Bounded sub-parsing and indentation-aware line aggregation.
//!
//! [`bounded`] isolates a region of the input (a line, an indented block, a
//! fenced span) and runs a parser on that region alone, so the inner
//! grammar cannot consume past it. [`lines`] aggregates consecutive lines
//! that share a leader at a fixed column, the way blockquotes carve their
//! bodies out of the surrounding document.

use tracing::warn;

use super::flow::Flow;
use super::repeat::ITERATION_CEILING;
use super::text::{newline, rest_of_line};
use super::{Outcome, Parser, State};
use crate::tape::Tape;

/// Run `extract` to carve a sub-tape out of the input, then run `execute`
/// on a fresh state holding exactly that sub-tape.
///
/// Returns the inner result (or `None` if `execute` broke) together with
/// the inner final state, so callers can see what was left unparsed inside
/// the region. The outer state is the post-extract state either way.
pub fn bounded<T: 'static>(
    extract: &Parser<Tape>,
    execute: &Parser<T>,
) -> Parser<(Option<T>, State)> {
    let extract = extract.clone();
    let execute = execute.clone();
    Parser::from_fn(move |state| match extract.run(state) {
        Outcome::Continue(region, outer) => {
            let inner = State::new(region);
            let (value, inner_final) = match execute.run(inner) {
                Outcome::Continue(value, inner_final) => (Some(value), inner_final),
                Outcome::Break(inner_final) => (None, inner_final),
            };
            Outcome::Continue((value, inner_final), outer)
        }
        Outcome::Break(state) => Outcome::Break(state),
    })
}

/// Aggregate consecutive lines that open with `line_start` at a fixed
/// column.
///
/// Each iteration runs `line_start`, then the (possibly empty) rest of the
/// line and its newline. The first iteration records the column of the
/// last character of the leader; any later line whose leader ends at a
/// different column terminates the loop without that line being consumed.
/// The loop also stops when `terminator` says [`Flow::Break`].
///
/// The accumulated content is the concatenation of the per-line trailing
/// portions (`trim = true`) or of the full lines including leaders
/// (`trim = false`). Trailing whitespace of the content, newlines
/// included, is stripped and put back in front of the remaining input.
///
/// Returns the per-line leader tapes and the cleaned content. Breaks if no
/// line matched at all.
pub fn lines(
    line_start: &Parser<Tape>,
    terminator: &Parser<Flow>,
    trim: bool,
) -> Parser<(Vec<Tape>, Tape)> {
    let line_start = line_start.clone();
    let terminator = terminator.clone();
    Parser::from_fn(move |state| {
        let origin = state.clone();
        let mut current = state;
        let mut leaders: Vec<Tape> = Vec::new();
        let mut content = Tape::default();
        let mut guard_column: Option<usize> = None;
        let mut iterations = 0;

        loop {
            if iterations >= ITERATION_CEILING {
                warn!(
                    iterations = ITERATION_CEILING,
                    "line aggregation ceiling reached; terminating loop"
                );
                break;
            }
            iterations += 1;

            if let Outcome::Continue(Flow::Break, _) = terminator.run(current.clone()) {
                break;
            }

            let (leader, after_leader) = match line_start.run(current.clone()) {
                Outcome::Continue(leader, next) => (leader, next),
                Outcome::Break(_) => break,
            };

            let column = leader.last().map(|c| c.position.column);
            match guard_column {
                None => guard_column = column,
                Some(expected) if column == Some(expected) => {}
                Some(_) => break,
            }

            let (rest, after_rest) = match rest_of_line().run(after_leader.clone()) {
                Outcome::Continue(rest, next) => (rest, next),
                Outcome::Break(_) => (Tape::default(), after_leader),
            };
            let (nl, after_line) = match newline().run(after_rest.clone()) {
                Outcome::Continue(nl, next) => (nl, next),
                Outcome::Break(_) => (Tape::default(), after_rest),
            };

            let line = if trim {
                rest.concat(&nl)
            } else {
                leader.concat(&rest).concat(&nl)
            };

            if after_line.tape.progress_key() == current.tape.progress_key() {
                break;
            }
            content = content.concat(&line);
            leaders.push(leader);
            current = after_line;
        }

        if leaders.is_empty() {
            return Outcome::Break(origin);
        }

        let (content, trailing) = content.trim_trailing_whitespace();
        let restored = current.with_tape(trailing.concat(&current.tape));
        Outcome::Continue((leaders, content), restored)
    })
}
