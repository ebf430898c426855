//! ATX-style headings.
//!
//! One to six `#` characters, inline content to the end of the line, and
//! an optional `{id}` trailer. Seven or more hashes are not a heading;
//! the paragraph fallback picks the line up instead.

use crate::ast::{Block, Heading, InBraces};
use crate::combinator::text::take_while1;
use crate::combinator::{Outcome, Parser};
use crate::tape::Tape;

use crate::parser::inline::inline_region;

/// `# content {id}`.
pub(super) fn heading() -> Parser<Block> {
    let hash_run = take_while1(|c| c == '#');
    Parser::from_fn(move |state| {
        let (hashes, after) = match hash_run.run(state.clone()) {
            Outcome::Continue(run, next) if run.len() <= 6 => (run, next),
            _ => return Outcome::Break(state),
        };
        let line_len = after.tape.iter().take_while(|c| !c.is_newline()).count();
        let (line, rest) = after.tape.split_at(line_len);
        let (content_region, id) = split_id_trailer(&line);
        let content = inline_region(content_region, false);
        Outcome::Continue(
            Block::Heading(Heading {
                hashes,
                content,
                id,
            }),
            after.with_tape(rest),
        )
    })
}

/// Split a heading line into its content and a trailing `{id}`, if the
/// line ends with one.
///
/// The id body may not contain braces; any other shape leaves the whole
/// line as content.
fn split_id_trailer(line: &Tape) -> (Tape, Option<InBraces<Tape>>) {
    let values: Vec<char> = line.iter().map(|c| c.value).collect();
    if values.last() != Some(&'}') {
        return (line.clone(), None);
    }
    let Some(open_idx) = values.iter().rposition(|&c| c == '{') else {
        return (line.clone(), None);
    };
    if values[open_idx + 1..values.len() - 1].contains(&'}') {
        return (line.clone(), None);
    }
    let (content, trailer) = line.split_at(open_idx);
    let (open, tail) = trailer.split_at(1);
    let (text, close) = tail.split_at(tail.len() - 1);
    (
        content,
        Some(InBraces {
            open,
            content: text,
            close,
        }),
    )
}
