//! The lossless inline and block tree produced by the grammar.
//!
//! Every node stores its delimiter tokens as [`Tape`]s, not as bare
//! characters, so each delimiter keeps the source position it was read
//! from. Concatenating the token and text fields of a tree in source order
//! reconstructs the input; [`reconstruct`] does exactly that, and
//! [`SourceText`] is the traversal it is built on.
//!
//! Two constructs bend byte-for-byte reconstruction: list item bodies are
//! de-indented before re-parsing (the stripped indentation is re-derived
//! from the leader column when writing source), and blockquote bodies are
//! stored de-leadered with the per-line leader tapes kept alongside.

use crate::position::FatChar;
use crate::tape::Tape;

// ---------------------------------------------------------------------------
// Source reconstruction
// ---------------------------------------------------------------------------

/// In-order traversal of the tapes stored in a tree.
///
/// `write_source` renders a node back to source text; the default
/// implementation concatenates the node's tapes, and nodes that reshuffle
/// their content (blockquotes, list items) override it.
pub trait SourceText {
    /// Append this node's tapes, in stored order, to `out`.
    fn push_tapes(&self, out: &mut Vec<Tape>);

    /// Append this node's source rendering to `out`.
    fn write_source(&self, out: &mut String) {
        let mut tapes = Vec::new();
        self.push_tapes(&mut tapes);
        for tape in tapes {
            out.push_str(&tape.text());
        }
    }

    /// This node's source rendering as a fresh string.
    fn source_text(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out);
        out
    }
}

impl SourceText for Tape {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        out.push(self.clone());
    }
}

impl SourceText for FatChar {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        out.push(Tape::from(*self));
    }

    fn write_source(&self, out: &mut String) {
        out.push(self.value);
    }
}

impl<T: SourceText> SourceText for Option<T> {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        if let Some(inner) = self {
            inner.push_tapes(out);
        }
    }

    fn write_source(&self, out: &mut String) {
        if let Some(inner) = self {
            inner.write_source(out);
        }
    }
}

impl<T: SourceText> SourceText for Vec<T> {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        for item in self {
            item.push_tapes(out);
        }
    }

    fn write_source(&self, out: &mut String) {
        for item in self {
            item.write_source(out);
        }
    }
}

/// Reconstruct the source text of a parsed document.
#[must_use]
pub fn reconstruct(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        block.write_source(&mut out);
    }
    out
}

// ---------------------------------------------------------------------------
// Delimiter wrappers
// ---------------------------------------------------------------------------

/// Content between `[` and `]`, with both brackets kept.
#[derive(Debug, Clone, PartialEq)]
pub struct InSquareBrackets<T> {
    /// The `[` token.
    pub open: Tape,
    /// The bracketed content.
    pub content: T,
    /// The `]` token.
    pub close: Tape,
}

/// Content between double quotes, with both quotes kept.
#[derive(Debug, Clone, PartialEq)]
pub struct InDoubleQuotes<T> {
    /// The opening `"` token.
    pub open: Tape,
    /// The quoted content.
    pub content: T,
    /// The closing `"` token.
    pub close: Tape,
}

/// Content between `{` and `}`, with both braces kept.
#[derive(Debug, Clone, PartialEq)]
pub struct InBraces<T> {
    /// The `{` token.
    pub open: Tape,
    /// The braced content.
    pub content: T,
    /// The `}` token.
    pub close: Tape,
}

macro_rules! wrapper_source_text {
    ($name:ident) => {
        impl<T: SourceText> SourceText for $name<T> {
            fn push_tapes(&self, out: &mut Vec<Tape>) {
                self.open.push_tapes(out);
                self.content.push_tapes(out);
                self.close.push_tapes(out);
            }

            fn write_source(&self, out: &mut String) {
                self.open.write_source(out);
                self.content.write_source(out);
                self.close.write_source(out);
            }
        }
    };
}

wrapper_source_text!(InSquareBrackets);
wrapper_source_text!(InDoubleQuotes);
wrapper_source_text!(InBraces);

// ---------------------------------------------------------------------------
// Inline nodes
// ---------------------------------------------------------------------------

/// An inline node.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    /// A run of ordinary text.
    PlainText(Tape),
    /// A `[label](destination "title")` link.
    Link(Link),
    /// A `![label](destination)` image.
    Image(Image),
    /// `*emphasis*` (or `_`, one to three delimiters).
    Emphasis(DelimitedRun),
    /// `==highlight==`.
    Highlight(DelimitedRun),
    /// `~~strikethrough~~`.
    Strikethrough(DelimitedRun),
    /// `~subscript~`.
    Sub(DelimitedRun),
    /// `^superscript^`.
    Sup(DelimitedRun),
    /// `` `inline code` `` with run-length matched backtick delimiters.
    InlineCode(InlineCode),
    /// A newline inside paragraph content.
    LineBreak(Tape),
    /// Unparsed remainder inside a bounded sub-parse, kept verbatim.
    Raw(Tape),
}

impl SourceText for Inline {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        match self {
            Inline::PlainText(t) | Inline::LineBreak(t) | Inline::Raw(t) => t.push_tapes(out),
            Inline::Link(link) => link.push_tapes(out),
            Inline::Image(image) => image.push_tapes(out),
            Inline::Emphasis(run)
            | Inline::Highlight(run)
            | Inline::Strikethrough(run)
            | Inline::Sub(run)
            | Inline::Sup(run) => run.push_tapes(out),
            Inline::InlineCode(code) => code.push_tapes(out),
        }
    }
}

/// An inline span delimited by identical open and close runs.
#[derive(Debug, Clone, PartialEq)]
pub struct DelimitedRun {
    /// The opening delimiter run.
    pub open: Tape,
    /// The enclosed inline content.
    pub content: Vec<Inline>,
    /// The closing delimiter run; same character and length as `open`.
    pub close: Tape,
}

impl SourceText for DelimitedRun {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.open.push_tapes(out);
        self.content.push_tapes(out);
        self.close.push_tapes(out);
    }
}

/// An inline code span. The content is verbatim; no inline recursion.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineCode {
    /// The opening backtick run.
    pub open: Tape,
    /// The verbatim content between the runs.
    pub content: Tape,
    /// The closing backtick run; exactly as long as `open`.
    pub close: Tape,
}

impl SourceText for InlineCode {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.open.push_tapes(out);
        self.content.push_tapes(out);
        self.close.push_tapes(out);
    }
}

/// A link: bracketed label, then parenthesised destination and optional
/// quoted title.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// The `[label]` part, inline content inside brackets.
    pub label: InSquareBrackets<Vec<Inline>>,
    /// The `(` token.
    pub open_paren: Tape,
    /// The destination text (everything up to the title or `)`).
    pub destination: Tape,
    /// The optional `"title"` part.
    pub title: Option<InDoubleQuotes<Tape>>,
    /// The `)` token.
    pub close_paren: Tape,
}

impl SourceText for Link {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.label.push_tapes(out);
        self.open_paren.push_tapes(out);
        self.destination.push_tapes(out);
        self.title.push_tapes(out);
        self.close_paren.push_tapes(out);
    }
}

/// An image: `!` followed by a link.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// The `!` token.
    pub bang: Tape,
    /// The link that provides label and destination.
    pub link: Link,
}

impl SourceText for Image {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.bang.push_tapes(out);
        self.link.push_tapes(out);
    }
}

// ---------------------------------------------------------------------------
// Block nodes
// ---------------------------------------------------------------------------

/// A block node. A document is a sequence of blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// An ATX-style heading with an optional `{id}` trailer.
    Heading(Heading),
    /// A paragraph of inline content.
    Paragraph(Paragraph),
    /// A `>`-prefixed blockquote.
    Blockquote(Blockquote),
    /// A `-`/`*`/`+` bulleted list item.
    UnorderedListItem(UnorderedListItem),
    /// A `1.`-numbered list item.
    OrderedListItem(OrderedListItem),
    /// A `[x]` task list item.
    TaskListItem(TaskListItem),
    /// A triple-backtick fenced code block.
    FencedCodeBlock(FencedCodeBlock),
    /// A horizontal rule of three or more identical characters.
    HorizontalRule(HorizontalRule),
    /// A pipe table.
    Table(Table),
    /// A newline between blocks, kept for losslessness.
    Newline(Tape),
}

impl SourceText for Block {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        match self {
            Block::Heading(b) => b.push_tapes(out),
            Block::Paragraph(b) => b.push_tapes(out),
            Block::Blockquote(b) => b.push_tapes(out),
            Block::UnorderedListItem(b) => b.push_tapes(out),
            Block::OrderedListItem(b) => b.push_tapes(out),
            Block::TaskListItem(b) => b.push_tapes(out),
            Block::FencedCodeBlock(b) => b.push_tapes(out),
            Block::HorizontalRule(b) => b.push_tapes(out),
            Block::Table(b) => b.push_tapes(out),
            Block::Newline(t) => t.push_tapes(out),
        }
    }

    fn write_source(&self, out: &mut String) {
        match self {
            Block::Heading(b) => b.write_source(out),
            Block::Paragraph(b) => b.write_source(out),
            Block::Blockquote(b) => b.write_source(out),
            Block::UnorderedListItem(b) => b.write_source(out),
            Block::OrderedListItem(b) => b.write_source(out),
            Block::TaskListItem(b) => b.write_source(out),
            Block::FencedCodeBlock(b) => b.write_source(out),
            Block::HorizontalRule(b) => b.write_source(out),
            Block::Table(b) => b.write_source(out),
            Block::Newline(t) => t.write_source(out),
        }
    }
}

/// A heading: 1 to 6 `#` characters, inline content, optional `{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// The `#` run.
    pub hashes: Tape,
    /// The heading's inline content, leading space included.
    pub content: Vec<Inline>,
    /// The optional `{id}` trailer.
    pub id: Option<InBraces<Tape>>,
}

impl SourceText for Heading {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.hashes.push_tapes(out);
        self.content.push_tapes(out);
        self.id.push_tapes(out);
    }
}

/// A paragraph: the fallback block, inline content up to a blank line.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// The paragraph's inline content, interior newlines included.
    pub content: Vec<Inline>,
}

impl SourceText for Paragraph {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.content.push_tapes(out);
    }
}

/// A blockquote. The body is stored de-leadered; the per-line `> ` leader
/// tapes are kept alongside so the source can be re-interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct Blockquote {
    /// One leader tape per aggregated line, in order.
    pub markers: Vec<Tape>,
    /// The re-parsed body.
    pub content: Vec<Block>,
}

impl SourceText for Blockquote {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.markers.push_tapes(out);
        self.content.push_tapes(out);
    }

    fn write_source(&self, out: &mut String) {
        let mut body = String::new();
        for block in &self.content {
            block.write_source(&mut body);
        }
        let lines: Vec<&str> = body.split('\n').collect();
        for (i, marker) in self.markers.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&marker.text());
            if let Some(line) = lines.get(i) {
                out.push_str(line);
            }
        }
        for line in lines.iter().skip(self.markers.len()) {
            out.push('\n');
            out.push_str(line);
        }
    }
}

/// Append `content` with continuation lines re-indented to `indent` columns.
///
/// The first line follows the item's leader directly; later non-empty lines
/// get the indentation that the body capture stripped. Blank lines stay
/// blank.
fn write_indented_body(content: &[Block], indent: usize, out: &mut String) {
    let mut body = String::new();
    for block in content {
        block.write_source(&mut body);
    }
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                for _ in 0..indent {
                    out.push(' ');
                }
            }
        }
        out.push_str(line);
    }
}

/// An unordered list item: bullet, space, indented body.
#[derive(Debug, Clone, PartialEq)]
pub struct UnorderedListItem {
    /// The bullet token: one of `-`, `*`, `+`.
    pub bullet: Tape,
    /// The space after the bullet; its column bounds the body.
    pub space: Tape,
    /// The re-parsed, de-indented body.
    pub content: Vec<Block>,
}

impl UnorderedListItem {
    fn indent(&self) -> usize {
        self.space.last().map_or(0, |c| c.position.column + 1)
    }
}

impl SourceText for UnorderedListItem {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.bullet.push_tapes(out);
        self.space.push_tapes(out);
        self.content.push_tapes(out);
    }

    fn write_source(&self, out: &mut String) {
        self.bullet.write_source(out);
        self.space.write_source(out);
        write_indented_body(&self.content, self.indent(), out);
    }
}

/// An ordered list item: number, dot, space, indented body.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedListItem {
    /// The digit run.
    pub number: Tape,
    /// The `.` token.
    pub dot: Tape,
    /// The space after the dot; its column bounds the body.
    pub space: Tape,
    /// The re-parsed, de-indented body.
    pub content: Vec<Block>,
}

impl OrderedListItem {
    fn indent(&self) -> usize {
        self.space.last().map_or(0, |c| c.position.column + 1)
    }
}

impl SourceText for OrderedListItem {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.number.push_tapes(out);
        self.dot.push_tapes(out);
        self.space.push_tapes(out);
        self.content.push_tapes(out);
    }

    fn write_source(&self, out: &mut String) {
        self.number.write_source(out);
        self.dot.write_source(out);
        self.space.write_source(out);
        write_indented_body(&self.content, self.indent(), out);
    }
}

/// A task list item: `[ ]`, `[x]`, `[X]`, or `[-]` header, space, body.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskListItem {
    /// The bracketed status character, absent for `[]`.
    pub header: InSquareBrackets<Option<FatChar>>,
    /// The space after the header; its column bounds the body.
    pub space: Tape,
    /// The re-parsed, de-indented body.
    pub content: Vec<Block>,
}

impl TaskListItem {
    fn indent(&self) -> usize {
        self.space.last().map_or(0, |c| c.position.column + 1)
    }
}

impl SourceText for TaskListItem {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.header.push_tapes(out);
        self.space.push_tapes(out);
        self.content.push_tapes(out);
    }

    fn write_source(&self, out: &mut String) {
        self.header.write_source(out);
        self.space.write_source(out);
        write_indented_body(&self.content, self.indent(), out);
    }
}

/// A fenced code block with verbatim content.
#[derive(Debug, Clone, PartialEq)]
pub struct FencedCodeBlock {
    /// The opening ``` fence.
    pub open_fence: Tape,
    /// The info string on the fence line, if any.
    pub info_string: Option<Tape>,
    /// The verbatim content, surrounding newlines included.
    pub content: Tape,
    /// The closing ``` fence.
    pub close_fence: Tape,
}

impl SourceText for FencedCodeBlock {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.open_fence.push_tapes(out);
        self.info_string.push_tapes(out);
        self.content.push_tapes(out);
        self.close_fence.push_tapes(out);
    }
}

/// A horizontal rule: three or more of `-`, `*`, or `_`, all the same.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalRule {
    /// The delimiter run.
    pub tokens: Tape,
}

impl SourceText for HorizontalRule {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.tokens.push_tapes(out);
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// A pipe table: header row, separator row, data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// The header row.
    pub header: Row,
    /// The separator row under the header.
    pub separator: SeparatorRow,
    /// Zero or more data rows.
    pub rows: Vec<Row>,
}

impl SourceText for Table {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.header.push_tapes(out);
        self.separator.push_tapes(out);
        self.rows.push_tapes(out);
    }
}

/// One table row, bounded by the rest of its line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The row's cells; a trailing pipe shows up as a final empty cell.
    pub cells: Vec<Cell>,
    /// The newline ending the row, absent at end of input.
    pub newline: Option<Tape>,
}

impl SourceText for Row {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.cells.push_tapes(out);
        self.newline.push_tapes(out);
    }
}

/// One table cell: an optional leading pipe and the raw cell content.
///
/// Cell content is kept as a raw tape; inline re-parsing of cells is a
/// future extension.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// The `|` before this cell; absent for a first cell with no leading
    /// pipe.
    pub pipe: Option<Tape>,
    /// The raw cell content, surrounding spaces included.
    pub content: Tape,
}

impl SourceText for Cell {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.pipe.push_tapes(out);
        self.content.push_tapes(out);
    }
}

/// The separator row under a table header.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorRow {
    /// The separator cells.
    pub cells: Vec<SeparatorCell>,
    /// The newline ending the row, absent at end of input.
    pub newline: Option<Tape>,
}

impl SourceText for SeparatorRow {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.cells.push_tapes(out);
        self.newline.push_tapes(out);
    }
}

/// One cell of a separator row: dashes with optional alignment colons.
#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorCell {
    /// The `|` before this cell, as in [`Cell`].
    pub pipe: Option<Tape>,
    /// The raw cell content (`:?---+:?` with surrounding spaces).
    pub content: Tape,
    /// The alignment the colons encode.
    pub alignment: Alignment,
}

impl SourceText for SeparatorCell {
    fn push_tapes(&self, out: &mut Vec<Tape>) {
        self.pipe.push_tapes(out);
        self.content.push_tapes(out);
    }
}

/// Column alignment encoded by a separator cell's colons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// No colons.
    None,
    /// A leading colon.
    Left,
    /// A trailing colon.
    Right,
    /// Colons on both sides.
    Center,
}
