//! The inline scope environment.
//!
//! A [`Scope`] describes the syntactic context an inline parser is running
//! inside and, crucially, the literal token that is forbidden as a
//! continuation there: seeing it means the enclosing construct is closing.
//! Scopes form an immutable stack; pushing returns a new stack, so sibling
//! parsers never observe each other's contexts.
//!
//! Only the innermost scope's terminator is active. Outer terminators are
//! not propagated; a `]` inside an emphasis inside a link label closes
//! nothing until the emphasis itself is closed.

use smallvec::SmallVec;

/// The syntactic context an inline parser is nested inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Inside a double-quoted string, e.g. a link title.
    Quoted,
    /// Inside the square-bracketed label of a link.
    LinkLabel,
    /// Inside the round-bracketed destination of a link.
    LinkTarget,
    /// Inside an emphasis span. The delimiter character (`*` or `_`) is
    /// repeated `count` times (1, 2, or 3).
    Emphasis {
        /// The delimiter character.
        delimiter: char,
        /// How many times the delimiter is repeated.
        count: usize,
    },
    /// Inside a `==`-delimited highlight span.
    Highlight,
    /// Inside a `~~`-delimited strikethrough span.
    Strikethrough,
    /// Inside a `~`-delimited subscript span.
    Subscript,
    /// Inside a `^`-delimited superscript span.
    Superscript,
    /// Inside an inline code span opened by a backtick run of this length.
    InlineCode {
        /// The length of the opening backtick run.
        count: usize,
    },
    /// Inside a LaTeX span. Declared for a future grammar revision; no
    /// inline rule produces it yet.
    Latex {
        /// The delimiter character.
        delimiter: char,
        /// How many times the delimiter is repeated.
        count: usize,
    },
}

impl Scope {
    /// The literal token that terminates this scope when seen inside it.
    #[must_use]
    pub fn terminator(&self) -> String {
        match self {
            Scope::Quoted => "\"".to_string(),
            Scope::LinkLabel => "]".to_string(),
            Scope::LinkTarget => ")".to_string(),
            Scope::Emphasis { delimiter, count } | Scope::Latex { delimiter, count } => {
                delimiter.to_string().repeat(*count)
            }
            Scope::Highlight => "==".to_string(),
            Scope::Strikethrough => "~~".to_string(),
            Scope::Subscript => "~".to_string(),
            Scope::Superscript => "^".to_string(),
            Scope::InlineCode { count } => "`".repeat(*count),
        }
    }
}

/// An immutable stack of scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeStack {
    scopes: SmallVec<[Scope; 4]>,
}

impl ScopeStack {
    /// The empty environment.
    #[must_use]
    pub fn new() -> ScopeStack {
        ScopeStack::default()
    }

    /// A new stack with `scope` pushed innermost.
    #[must_use]
    pub fn with(&self, scope: Scope) -> ScopeStack {
        let mut scopes = self.scopes.clone();
        scopes.push(scope);
        ScopeStack { scopes }
    }

    /// The innermost scope, if any.
    #[must_use]
    pub fn innermost(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    /// The active terminator token: the innermost scope's, or none at the
    /// top level.
    #[must_use]
    pub fn active_terminator(&self) -> Option<String> {
        self.innermost().map(Scope::terminator)
    }

    /// How deeply nested the environment is.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
