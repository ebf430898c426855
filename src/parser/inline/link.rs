//! Links and images.
//!
//! A link is a bracketed label parsed as inline content under the
//! link-label scope (so `]` terminates it), followed by a parenthesised
//! destination and an optional double-quoted title. An image is a `!`
//! directly in front of a link.

use crate::ast::{Image, InDoubleQuotes, InSquareBrackets, Inline, Link};
use crate::combinator::text::{and, and2, and3, between_both, take_while, token};
use crate::combinator::Parser;
use crate::scope::{Scope, ScopeStack};
use crate::tape::Tape;

use super::inline_items;

/// The bracketed label: inline content that stops at `]`.
fn label(env: &ScopeStack) -> Parser<InSquareBrackets<Vec<Inline>>> {
    let child = env.with(Scope::LinkLabel);
    let content = Parser::lazy(move || inline_items(&child, true));
    and2(&token("["), &content, &token("]")).map(|(open, content, close)| InSquareBrackets {
        open,
        content,
        close,
    })
}

/// The destination text: plain characters up to the closing paren, a title
/// opener, or the end of the line.
fn destination() -> Parser<Tape> {
    let close = Scope::LinkTarget.terminator();
    let quote = Scope::Quoted.terminator();
    take_while(move |c| {
        !close.starts_with(c) && !quote.starts_with(c) && c != '\n'
    })
}

/// The optional `"title"` part, text parsed up to the closing quote.
fn title() -> Parser<InDoubleQuotes<Tape>> {
    let quote = Scope::Quoted.terminator();
    let text = take_while(move |c| !quote.starts_with(c) && c != '\n');
    between_both(&text, &token("\"")).map(|(open, content, close)| InDoubleQuotes {
        open,
        content,
        close,
    })
}

/// The full link node shared by [`link`] and [`image`].
fn link_node(env: &ScopeStack) -> Parser<Link> {
    let head = label(env);
    let tail = and3(&token("("), &destination(), &title().optional(), &token(")"));
    and(&head, &tail).map(|(label, (open_paren, destination, title, close_paren))| Link {
        label,
        open_paren,
        destination,
        title,
        close_paren,
    })
}

/// `[label](destination "title")`.
pub(super) fn link(env: &ScopeStack) -> Parser<Inline> {
    link_node(env).map(Inline::Link)
}

/// `![label](destination)`.
pub(super) fn image(env: &ScopeStack) -> Parser<Inline> {
    and(&token("!"), &link_node(env)).map(|(bang, link)| Inline::Image(Image { bang, link }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceText;

    fn top() -> ScopeStack {
        ScopeStack::new()
    }

    fn expect_link(node: Option<Inline>) -> Link {
        match node {
            Some(Inline::Link(link)) => link,
            other => panic!("expected a link, got {other:?}"),
        }
    }

    #[test]
    fn simple_link() {
        let (node, state) = link(&top()).evaluate("[link text](http://dev.nodeca.com)");
        let l = expect_link(node);
        assert_eq!(l.label.open.text(), "[");
        assert_eq!(l.label.content.len(), 1);
        assert_eq!(l.open_paren.text(), "(");
        assert_eq!(l.destination.text(), "http://dev.nodeca.com");
        assert!(l.title.is_none());
        assert_eq!(l.close_paren.text(), ")");
        assert!(state.tape.is_empty());
    }

    #[test]
    fn destination_keeps_markup_characters() {
        // Underscores and tildes are ordinary characters in a destination.
        let (node, _) = link(&top()).evaluate("[x](http://a_b/~c)");
        assert_eq!(expect_link(node).destination.text(), "http://a_b/~c");
    }

    #[test]
    fn link_with_title() {
        let (node, _) = link(&top()).evaluate("[x](u \"hello\")");
        let l = expect_link(node);
        assert_eq!(l.destination.text(), "u ");
        let title = l.title.unwrap();
        assert_eq!(title.open.text(), "\"");
        assert_eq!(title.content.text(), "hello");
        assert_eq!(title.close.text(), "\"");
    }

    #[test]
    fn empty_label_and_destination() {
        let (node, _) = link(&top()).evaluate("[]()");
        let l = expect_link(node);
        assert!(l.label.content.is_empty() || l.label.content.len() == 1);
        assert!(l.destination.is_empty());
    }

    #[test]
    fn label_supports_nested_emphasis() {
        let (node, _) = link(&top()).evaluate("[a *b*](u)");
        let l = expect_link(node);
        assert!(l
            .label
            .content
            .iter()
            .any(|i| matches!(i, Inline::Emphasis(_))));
    }

    #[test]
    fn missing_paren_breaks() {
        assert!(link(&top()).evaluate("[label] no paren").0.is_none());
        assert!(link(&top()).evaluate("[label](open").0.is_none());
    }

    #[test]
    fn image_is_bang_then_link() {
        let (node, _) = image(&top()).evaluate("![alt](img.png)");
        match node.unwrap() {
            Inline::Image(img) => {
                assert_eq!(img.bang.text(), "!");
                assert_eq!(img.link.destination.text(), "img.png");
                assert_eq!(img.source_text(), "![alt](img.png)");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn link_roundtrips() {
        let input = "[link text](http://dev.nodeca.com \"t\")";
        let (node, _) = link(&top()).evaluate(input);
        assert_eq!(node.unwrap().source_text(), input);
    }
}
