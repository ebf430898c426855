//! Bounded repetition.
//!
//! All repetition variants share one loop with three knobs: whether zero
//! iterations is a success, an optional terminator parser that ends the
//! loop when it would match, and whether a matching terminator is consumed
//! (`..._until_end`) or merely peeked at.
//!
//! Two guardrails keep every loop finite: a no-progress guard that stops
//! when an iteration leaves the tape semantically unchanged, and a hard
//! iteration ceiling. Reaching the ceiling indicates an upstream grammar
//! bug; it is surfaced as a `tracing` warning and the loop terminates with
//! whatever it has accumulated.

use tracing::warn;

use super::{Outcome, Parser, State};

/// Hard upper bound on iterations of any single repetition loop.
pub const ITERATION_CEILING: usize = 1000;

/// Whether a matched terminator is consumed or left on the tape.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TerminatorMode {
    /// Stop before the terminator, leaving it unconsumed.
    Peek,
    /// Consume the terminator and capture its value.
    Consume,
}

/// One pass of the shared repetition loop.
fn run_sequence<A: 'static, T: 'static>(
    item: &Parser<A>,
    terminator: Option<&Parser<T>>,
    mode: TerminatorMode,
    allow_empty: bool,
    state: State,
) -> Outcome<(Vec<A>, Option<T>)> {
    let origin = state.clone();
    let mut current = state;
    let mut items = Vec::new();
    let mut terminal = None;
    let mut iterations = 0;

    loop {
        if iterations >= ITERATION_CEILING {
            warn!(
                iterations = ITERATION_CEILING,
                "repetition ceiling reached; terminating loop"
            );
            break;
        }
        iterations += 1;

        if let Some(term) = terminator {
            if let Outcome::Continue(value, after) = term.run(current.clone()) {
                terminal = Some(value);
                if mode == TerminatorMode::Consume {
                    current = after;
                }
                break;
            }
        }

        let entry_key = current.tape.progress_key();
        match item.run(current.clone()) {
            Outcome::Continue(value, next) => {
                let stalled = next.tape.progress_key() == entry_key;
                items.push(value);
                current = next;
                if stalled {
                    break;
                }
            }
            Outcome::Break(_) => break,
        }
    }

    if !allow_empty && items.is_empty() {
        return Outcome::Break(origin);
    }
    if mode == TerminatorMode::Consume && terminal.is_none() {
        // The variant requires its terminator; without one the whole
        // repetition is a non-match.
        return Outcome::Break(origin);
    }
    Outcome::Continue((items, terminal), current)
}

impl<A: 'static> Parser<A> {
    fn sequence<T: 'static>(
        &self,
        allow_empty: bool,
        terminator: Option<Parser<T>>,
        mode: TerminatorMode,
    ) -> Parser<(Vec<A>, Option<T>)> {
        let item = self.clone();
        Parser::from_fn(move |state| {
            run_sequence(&item, terminator.as_ref(), mode, allow_empty, state)
        })
    }

    /// Zero or more repetitions.
    #[must_use]
    pub fn many(&self) -> Parser<Vec<A>> {
        self.sequence::<()>(true, None, TerminatorMode::Peek)
            .map(|(items, _)| items)
    }

    /// One or more repetitions.
    #[must_use]
    pub fn some(&self) -> Parser<Vec<A>> {
        self.sequence::<()>(false, None, TerminatorMode::Peek)
            .map(|(items, _)| items)
    }

    /// Zero or more repetitions, stopping before `terminator` would match.
    ///
    /// The terminator's value is captured but its input is not consumed.
    pub fn many_unless<T: 'static>(&self, terminator: &Parser<T>) -> Parser<(Vec<A>, Option<T>)> {
        self.sequence(true, Some(terminator.clone()), TerminatorMode::Peek)
    }

    /// One or more repetitions, stopping before `terminator` would match.
    pub fn some_unless<T: 'static>(&self, terminator: &Parser<T>) -> Parser<(Vec<A>, Option<T>)> {
        self.sequence(false, Some(terminator.clone()), TerminatorMode::Peek)
    }

    /// Zero or more repetitions, then a required, consumed terminator.
    pub fn many_until_end<T: 'static>(&self, terminator: &Parser<T>) -> Parser<(Vec<A>, T)> {
        require_terminal(self.sequence(true, Some(terminator.clone()), TerminatorMode::Consume))
    }

    /// One or more repetitions, then a required, consumed terminator.
    pub fn some_until_end<T: 'static>(&self, terminator: &Parser<T>) -> Parser<(Vec<A>, T)> {
        require_terminal(self.sequence(false, Some(terminator.clone()), TerminatorMode::Consume))
    }
}

/// The consume-mode loop breaks when its terminator never matched, so the
/// value is present on every `Continue`; an absent one is treated as a
/// non-match rather than a panic.
fn require_terminal<A: 'static, T: 'static>(
    seq: Parser<(Vec<A>, Option<T>)>,
) -> Parser<(Vec<A>, T)> {
    Parser::from_fn(move |state| match seq.run(state) {
        Outcome::Continue((items, Some(terminal)), next) => {
            Outcome::Continue((items, terminal), next)
        }
        Outcome::Continue((_, None), next) => Outcome::Break(next),
        Outcome::Break(state) => Outcome::Break(state),
    })
}
