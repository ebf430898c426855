//! The position-annotated character stream consumed by parsers.
//!
//! A [`Tape`] is a persistent sequence of [`FatChar`]s with structural
//! sharing: it holds a small vector of segments, each a sub-range of a
//! reference-counted character buffer. Sub-tape extraction (`uncons`,
//! `split_at`, `split_prefix`) shares the backing buffer, and `concat`
//! re-merges adjacent ranges of the same buffer, so putting a prefix back
//! in front of its own remainder does not grow the segment list.
//!
//! Positions inside a tape are monotonically non-decreasing in offset and
//! consistent with a left-to-right scan of the original source. A sub-tape
//! keeps its parent's positions; the indentation-aware block grammar
//! depends on this.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::position::{FatChar, Position};

/// A sub-range of a shared character buffer. Never empty.
#[derive(Clone)]
struct Segment {
    chars: Rc<[FatChar]>,
    start: usize,
    end: usize,
}

impl Segment {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn get(&self, i: usize) -> Option<FatChar> {
        self.chars.get(self.start + i).copied()
    }
}

/// A finite, immutable sequence of position-annotated characters.
///
/// All operations are non-destructive; they return new tapes that share
/// storage with the receiver.
#[derive(Clone, Default)]
pub struct Tape {
    segments: SmallVec<[Segment; 2]>,
    len: usize,
}

impl Tape {
    /// Annotate a source string with positions, starting at the origin.
    #[must_use]
    pub fn from_source(source: &str) -> Tape {
        let mut position = Position::ORIGIN;
        let mut chars = Vec::with_capacity(source.len());
        for value in source.chars() {
            chars.push(FatChar { value, position });
            position = position.advance(value);
        }
        Tape::from_chars(chars)
    }

    /// Build a tape from an explicit character sequence.
    ///
    /// The characters are expected to carry positions consistent with a
    /// left-to-right scan of some source.
    #[must_use]
    pub fn from_chars(chars: Vec<FatChar>) -> Tape {
        if chars.is_empty() {
            return Tape::default();
        }
        let len = chars.len();
        let segment = Segment {
            chars: Rc::from(chars),
            start: 0,
            end: len,
        };
        Tape {
            segments: SmallVec::from_iter([segment]),
            len,
        }
    }

    /// Returns `true` if the tape holds no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of characters on the tape.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The first character, if any.
    #[must_use]
    pub fn head(&self) -> Option<FatChar> {
        self.segments.first().and_then(|s| s.get(0))
    }

    /// The last character, if any.
    #[must_use]
    pub fn last(&self) -> Option<FatChar> {
        let seg = self.segments.last()?;
        seg.get(seg.len() - 1)
    }

    /// The character at index `i`, if any.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<FatChar> {
        let mut remaining = i;
        for seg in &self.segments {
            if remaining < seg.len() {
                return seg.get(remaining);
            }
            remaining -= seg.len();
        }
        None
    }

    /// The position of the first character, if any.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.head().map(|c| c.position)
    }

    /// Split off the first character, sharing storage with the remainder.
    #[must_use]
    pub fn uncons(&self) -> Option<(FatChar, Tape)> {
        let first = self.head()?;
        let mut segments = self.segments.clone();
        if let Some(seg) = segments.first_mut() {
            seg.start += 1;
            if seg.start == seg.end {
                segments.remove(0);
            }
        }
        Some((
            first,
            Tape {
                segments,
                len: self.len - 1,
            },
        ))
    }

    /// Split the tape at character index `n` into `(prefix, rest)`.
    ///
    /// `n` greater than the length yields `(self, empty)`.
    #[must_use]
    pub fn split_at(&self, n: usize) -> (Tape, Tape) {
        if n == 0 {
            return (Tape::default(), self.clone());
        }
        if n >= self.len {
            return (self.clone(), Tape::default());
        }
        let mut left = SmallVec::new();
        let mut right = SmallVec::new();
        let mut remaining = n;
        for seg in &self.segments {
            if remaining == 0 {
                right.push(seg.clone());
            } else if seg.len() <= remaining {
                remaining -= seg.len();
                left.push(seg.clone());
            } else {
                left.push(Segment {
                    chars: Rc::clone(&seg.chars),
                    start: seg.start,
                    end: seg.start + remaining,
                });
                right.push(Segment {
                    chars: Rc::clone(&seg.chars),
                    start: seg.start + remaining,
                    end: seg.end,
                });
                remaining = 0;
            }
        }
        (
            Tape {
                segments: left,
                len: n,
            },
            Tape {
                segments: right,
                len: self.len - n,
            },
        )
    }

    /// The first `n` characters (or the whole tape, if shorter).
    #[must_use]
    pub fn take(&self, n: usize) -> Tape {
        self.split_at(n).0
    }

    /// Returns `true` if the tape's character values begin with `literal`.
    #[must_use]
    pub fn starts_with(&self, literal: &str) -> bool {
        let mut chars = self.iter();
        literal
            .chars()
            .all(|expected| chars.next().is_some_and(|c| c.value == expected))
    }

    /// Match `literal` character-by-character at the head of the tape.
    ///
    /// On success returns `(matched_prefix, remainder)`; the prefix carries
    /// the original positions of the matched characters.
    #[must_use]
    pub fn split_prefix(&self, literal: &str) -> Option<(Tape, Tape)> {
        if self.starts_with(literal) {
            Some(self.split_at(literal.chars().count()))
        } else {
            None
        }
    }

    /// Concatenate two tapes, re-merging adjacent ranges of a shared buffer.
    #[must_use]
    pub fn concat(&self, other: &Tape) -> Tape {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        let mut segments = self.segments.clone();
        for seg in &other.segments {
            let merged = match segments.last_mut() {
                Some(last) if Rc::ptr_eq(&last.chars, &seg.chars) && last.end == seg.start => {
                    last.end = seg.end;
                    true
                }
                _ => false,
            };
            if !merged {
                segments.push(seg.clone());
            }
        }
        Tape {
            segments,
            len: self.len + other.len,
        }
    }

    /// Keep only the characters satisfying `pred`, preserving their positions.
    #[must_use]
    pub fn filter(&self, pred: impl Fn(&FatChar) -> bool) -> Tape {
        Tape::from_chars(self.iter().filter(pred).collect())
    }

    /// Split on newlines, apply `f` to each line tape, and rejoin with the
    /// original newline characters.
    ///
    /// The newline characters themselves are not passed to `f`.
    #[must_use]
    pub fn map_lines(&self, f: impl Fn(Tape) -> Tape) -> Tape {
        let mut result = Tape::default();
        let mut rest = self.clone();
        loop {
            let newline_pos = rest.iter().position(|c| c.is_newline());
            match newline_pos {
                Some(i) => {
                    let (line, tail) = rest.split_at(i);
                    let (newline, tail) = tail.split_at(1);
                    result = result.concat(&f(line)).concat(&newline);
                    rest = tail;
                }
                None => {
                    if !rest.is_empty() {
                        result = result.concat(&f(rest));
                    }
                    return result;
                }
            }
        }
    }

    /// Split into `(content, trailing)` where `trailing` is the maximal
    /// whitespace suffix (including newlines).
    #[must_use]
    pub fn trim_trailing_whitespace(&self) -> (Tape, Tape) {
        let mut last_non_ws = None;
        for (i, c) in self.iter().enumerate() {
            if !c.is_whitespace() {
                last_non_ws = Some(i);
            }
        }
        self.split_at(last_non_ws.map_or(0, |i| i + 1))
    }

    /// Iterate over the characters in order.
    pub fn iter(&self) -> impl Iterator<Item = FatChar> + '_ {
        self.segments
            .iter()
            .flat_map(|seg| seg.chars[seg.start..seg.end].iter().copied())
    }

    /// The character values as a `String`, positions discarded.
    #[must_use]
    pub fn text(&self) -> String {
        self.iter().map(|c| c.value).collect()
    }

    /// Semantic equality: same character values, positions ignored.
    ///
    /// Two sub-tapes are semantically equal iff they carry the same text.
    #[must_use]
    pub fn same_text(&self, other: &Tape) -> bool {
        self.len == other.len
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.value == b.value)
    }

    /// A cheap proxy for "has this tape changed": remaining length plus the
    /// head position's offset. Used by the repetition no-progress guard.
    #[must_use]
    pub fn progress_key(&self) -> (usize, Option<usize>) {
        (self.len, self.head().map(|c| c.position.offset))
    }
}

impl From<FatChar> for Tape {
    fn from(c: FatChar) -> Tape {
        Tape::from_chars(vec![c])
    }
}

impl PartialEq for Tape {
    fn eq(&self, other: &Tape) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for Tape {}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tape({:?})", self.text())
    }
}
