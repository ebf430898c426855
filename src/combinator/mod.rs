//! The monadic parser core and its combinator library.
//!
//! A [`Parser<A>`] is an opaque value wrapping a function from a parser
//! [`State`] to an [`Outcome`]. Parsers compose with `and_then`, `map`,
//! alternation, and the repetition and sub-parsing combinators in the
//! sibling modules. Backtracking is unconditional and unlimited: `or`
//! re-runs the second alternative on the exact state the first one saw,
//! and no combinator ever commits.
//!
//! Sub-modules:
//!
//! - [`text`]: character- and text-level parsers plus tuple combinators
//! - [`repeat`]: bounded repetition with a no-progress guard
//! - [`flow`]: control-flow parsers used as loop terminators
//! - [`bound`]: bounded sub-parsing and indentation-aware line aggregation

pub mod bound;
pub mod flow;
pub mod repeat;
pub mod text;

use std::rc::Rc;

use crate::tape::Tape;

/// The parser's view of the unconsumed input plus diagnostic labels.
///
/// States are immutable in the monadic sense: combinators construct new
/// states rather than mutating old ones, which makes backtracking a matter
/// of reusing a value already in hand.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct State {
    /// The unconsumed input.
    pub tape: Tape,
    /// Ordered labels pushed by [`Parser::labelled`]; diagnostic only,
    /// never consulted by parsing decisions.
    pub trace: Vec<&'static str>,
}

impl State {
    /// A fresh state over `tape` with an empty trace.
    #[must_use]
    pub fn new(tape: Tape) -> State {
        State {
            tape,
            trace: Vec::new(),
        }
    }

    /// A fresh state over an annotated source string.
    #[must_use]
    pub fn of_source(source: &str) -> State {
        State::new(Tape::from_source(source))
    }

    /// This state with `label` appended to the trace.
    #[must_use]
    pub fn pushed(&self, label: &'static str) -> State {
        let mut trace = self.trace.clone();
        trace.push(label);
        State {
            tape: self.tape.clone(),
            trace,
        }
    }

    /// This state with its tape replaced.
    #[must_use]
    pub fn with_tape(&self, tape: Tape) -> State {
        State {
            tape,
            trace: self.trace.clone(),
        }
    }
}

/// The result of one parser invocation.
///
/// There is no distinguished error type: a parser either consumed input and
/// produced a value, or it could not match. The state inside a `Break` is
/// diagnostic only; alternation resumes from the state it held before the
/// failed branch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<A> {
    /// The parser matched, yielding a value and the advanced state.
    Continue(A, State),
    /// The parser could not match at the current state.
    Break(State),
}

impl<A> Outcome<A> {
    /// Returns `true` for [`Outcome::Continue`].
    #[must_use]
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue(..))
    }

    /// Transform the value inside a `Continue`.
    #[must_use]
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Outcome<B> {
        match self {
            Outcome::Continue(value, state) => Outcome::Continue(f(value), state),
            Outcome::Break(state) => Outcome::Break(state),
        }
    }
}

/// A tagged value from [`Parser::either_or`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Either<L, R> {
    /// The first alternative matched.
    Left(L),
    /// The second alternative matched.
    Right(R),
}

/// A composable parsing action producing an `A`.
///
/// Cloning a parser is cheap (it shares the underlying function), so
/// grammars freely hand parsers to combinators by reference and keep using
/// them afterwards.
pub struct Parser<A> {
    run: Rc<dyn Fn(State) -> Outcome<A>>,
}

impl<A> Clone for Parser<A> {
    fn clone(&self) -> Parser<A> {
        Parser {
            run: Rc::clone(&self.run),
        }
    }
}

impl<A: 'static> Parser<A> {
    /// Wrap a parsing function.
    pub fn from_fn(f: impl Fn(State) -> Outcome<A> + 'static) -> Parser<A> {
        Parser { run: Rc::new(f) }
    }

    /// Succeed with `value`, consuming nothing.
    pub fn pure(value: A) -> Parser<A>
    where
        A: Clone,
    {
        Parser::from_fn(move |state| Outcome::Continue(value.clone(), state))
    }

    /// Always break.
    #[must_use]
    pub fn fail() -> Parser<A> {
        Parser::from_fn(Outcome::Break)
    }

    /// Defer construction of a parser until it runs.
    ///
    /// Recursive grammars use this so that building a parser for a nested
    /// construct does not recurse at construction time.
    pub fn lazy(build: impl Fn() -> Parser<A> + 'static) -> Parser<A> {
        Parser::from_fn(move |state| build().run(state))
    }

    /// Run the parser on a state.
    pub fn run(&self, state: State) -> Outcome<A> {
        (self.run)(state)
    }

    /// Run the parser over a source string from the origin.
    ///
    /// Returns `(Some(value), final_state)` on success or
    /// `(None, failure_state)` on a root break. Never panics; the failure
    /// state carries the unconsumed tape and the deepest labels attempted.
    pub fn evaluate(&self, source: &str) -> (Option<A>, State) {
        match self.run(State::of_source(source)) {
            Outcome::Continue(value, state) => (Some(value), state),
            Outcome::Break(state) => (None, state),
        }
    }

    /// Run `self`, then feed its value to `f` to obtain the continuation.
    ///
    /// A break short-circuits: `f` is not consulted.
    pub fn and_then<B: 'static>(&self, f: impl Fn(A) -> Parser<B> + 'static) -> Parser<B> {
        let p = self.clone();
        Parser::from_fn(move |state| match p.run(state) {
            Outcome::Continue(value, next) => f(value).run(next),
            Outcome::Break(state) => Outcome::Break(state),
        })
    }

    /// Transform the parsed value.
    pub fn map<B: 'static>(&self, f: impl Fn(A) -> B + 'static) -> Parser<B> {
        let p = self.clone();
        Parser::from_fn(move |state| p.run(state).map(&f))
    }

    /// Try `self`; on a break, run `other` on the original state.
    #[must_use]
    pub fn or(&self, other: &Parser<A>) -> Parser<A> {
        let p = self.clone();
        let q = other.clone();
        Parser::from_fn(move |state| match p.run(state.clone()) {
            Outcome::Continue(value, next) => Outcome::Continue(value, next),
            Outcome::Break(_) => q.run(state),
        })
    }

    /// Like [`Parser::or`], but tags which alternative matched.
    pub fn either_or<B: 'static>(&self, other: &Parser<B>) -> Parser<Either<A, B>> {
        let p = self.clone();
        let q = other.clone();
        Parser::from_fn(move |state| match p.run(state.clone()) {
            Outcome::Continue(value, next) => Outcome::Continue(Either::Left(value), next),
            Outcome::Break(_) => q.run(state).map(Either::Right),
        })
    }

    /// Succeed with `None` instead of breaking, leaving the state unchanged.
    #[must_use]
    pub fn optional(&self) -> Parser<Option<A>> {
        let p = self.clone();
        Parser::from_fn(move |state| match p.run(state.clone()) {
            Outcome::Continue(value, next) => Outcome::Continue(Some(value), next),
            Outcome::Break(_) => Outcome::Continue(None, state),
        })
    }

    /// Push `label` onto the state's diagnostic trace for the duration of
    /// this parser, on both success and failure.
    #[must_use]
    pub fn labelled(&self, label: &'static str) -> Parser<A> {
        let p = self.clone();
        Parser::from_fn(move |state| p.run(state.pushed(label)))
    }
}

/// Left-to-right alternation over a sequence of parsers.
///
/// The first `Continue` wins; later alternatives are not evaluated. An
/// empty sequence always breaks.
pub fn options<A: 'static>(alternatives: Vec<Parser<A>>) -> Parser<A> {
    Parser::from_fn(move |state| {
        for parser in &alternatives {
            if let Outcome::Continue(value, next) = parser.run(state.clone()) {
                return Outcome::Continue(value, next);
            }
        }
        Outcome::Break(state)
    })
}

/// Prepend `tape` to the current input, then run `parser`.
pub fn put_back<A: 'static>(tape: Tape, parser: &Parser<A>) -> Parser<A> {
    let p = parser.clone();
    Parser::from_fn(move |state| {
        let restored = state.with_tape(tape.concat(&state.tape));
        p.run(restored)
    })
}
