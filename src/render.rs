//! The tree-render protocol.
//!
//! The crate does not pretty-print trees itself. Instead every AST node
//! reports a label and a list of keyed children or raw-string leaves,
//! which is enough for an external renderer to lay the tree out however it
//! likes. [`TreeNode`] serializes with `serde`, so a renderer or a test
//! harness can also snapshot trees as JSON.

use serde::Serialize;

use crate::ast::{
    Block, Blockquote, Cell, DelimitedRun, FencedCodeBlock, Heading, HorizontalRule, Image, Inline,
    InlineCode, Link, OrderedListItem, Paragraph, Row, SeparatorRow, Table, TaskListItem,
    UnorderedListItem,
};
use crate::tape::Tape;

/// A renderable view of one tree node: a label plus keyed entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    /// What kind of node this is, e.g. `"emphasis"`.
    pub label: &'static str,
    /// The node's children, in source order.
    pub entries: Vec<TreeEntry>,
}

/// One keyed entry of a [`TreeNode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TreeEntry {
    /// A nested renderable node.
    Tree {
        /// The field name, e.g. `"content"`.
        key: &'static str,
        /// The nested node.
        node: TreeNode,
    },
    /// A raw-string leaf.
    Text {
        /// The field name, e.g. `"open"`.
        key: &'static str,
        /// The leaf text.
        value: String,
    },
}

impl TreeNode {
    fn new(label: &'static str) -> TreeNode {
        TreeNode {
            label,
            entries: Vec::new(),
        }
    }

    fn text(mut self, key: &'static str, tape: &Tape) -> TreeNode {
        self.entries.push(TreeEntry::Text {
            key,
            value: tape.text(),
        });
        self
    }

    fn maybe_text(mut self, key: &'static str, tape: Option<&Tape>) -> TreeNode {
        if let Some(tape) = tape {
            self.entries.push(TreeEntry::Text {
                key,
                value: tape.text(),
            });
        }
        self
    }

    fn child(mut self, key: &'static str, node: TreeNode) -> TreeNode {
        self.entries.push(TreeEntry::Tree { key, node });
        self
    }

    fn children<'a, T: ToTree + 'a>(
        mut self,
        key: &'static str,
        items: impl IntoIterator<Item = &'a T>,
    ) -> TreeNode {
        for item in items {
            self.entries.push(TreeEntry::Tree {
                key,
                node: item.to_tree(),
            });
        }
        self
    }
}

/// Conversion into the renderable view. Implemented by every AST node.
pub trait ToTree {
    /// This node as a [`TreeNode`].
    fn to_tree(&self) -> TreeNode;
}

impl ToTree for Inline {
    fn to_tree(&self) -> TreeNode {
        match self {
            Inline::PlainText(t) => TreeNode::new("plain-text").text("text", t),
            Inline::Link(link) => link.to_tree(),
            Inline::Image(image) => image.to_tree(),
            Inline::Emphasis(run) => run_tree("emphasis", run),
            Inline::Highlight(run) => run_tree("highlight", run),
            Inline::Strikethrough(run) => run_tree("strikethrough", run),
            Inline::Sub(run) => run_tree("sub", run),
            Inline::Sup(run) => run_tree("sup", run),
            Inline::InlineCode(code) => code.to_tree(),
            Inline::LineBreak(t) => TreeNode::new("line-break").text("newline", t),
            Inline::Raw(t) => TreeNode::new("raw").text("text", t),
        }
    }
}

fn run_tree(label: &'static str, run: &DelimitedRun) -> TreeNode {
    TreeNode::new(label)
        .text("open", &run.open)
        .children("content", &run.content)
        .text("close", &run.close)
}

impl ToTree for InlineCode {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("inline-code")
            .text("open", &self.open)
            .text("content", &self.content)
            .text("close", &self.close)
    }
}

impl ToTree for Link {
    fn to_tree(&self) -> TreeNode {
        let mut node = TreeNode::new("link")
            .text("open-bracket", &self.label.open)
            .children("label", &self.label.content)
            .text("close-bracket", &self.label.close)
            .text("open-paren", &self.open_paren)
            .text("destination", &self.destination);
        if let Some(title) = &self.title {
            node = node
                .text("title-open", &title.open)
                .text("title", &title.content)
                .text("title-close", &title.close);
        }
        node.text("close-paren", &self.close_paren)
    }
}

impl ToTree for Image {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("image")
            .text("bang", &self.bang)
            .child("link", self.link.to_tree())
    }
}

impl ToTree for Block {
    fn to_tree(&self) -> TreeNode {
        match self {
            Block::Heading(b) => b.to_tree(),
            Block::Paragraph(b) => b.to_tree(),
            Block::Blockquote(b) => b.to_tree(),
            Block::UnorderedListItem(b) => b.to_tree(),
            Block::OrderedListItem(b) => b.to_tree(),
            Block::TaskListItem(b) => b.to_tree(),
            Block::FencedCodeBlock(b) => b.to_tree(),
            Block::HorizontalRule(b) => b.to_tree(),
            Block::Table(b) => b.to_tree(),
            Block::Newline(t) => TreeNode::new("newline").text("char", t),
        }
    }
}

impl ToTree for Heading {
    fn to_tree(&self) -> TreeNode {
        let mut node = TreeNode::new("heading")
            .text("hashes", &self.hashes)
            .children("content", &self.content);
        if let Some(id) = &self.id {
            node = node
                .text("id-open", &id.open)
                .text("id", &id.content)
                .text("id-close", &id.close);
        }
        node
    }
}

impl ToTree for Paragraph {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("paragraph").children("content", &self.content)
    }
}

impl ToTree for Blockquote {
    fn to_tree(&self) -> TreeNode {
        let mut node = TreeNode::new("blockquote");
        for marker in &self.markers {
            node = node.text("marker", marker);
        }
        node.children("content", &self.content)
    }
}

impl ToTree for UnorderedListItem {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("unordered-list-item")
            .text("bullet", &self.bullet)
            .text("space", &self.space)
            .children("content", &self.content)
    }
}

impl ToTree for OrderedListItem {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("ordered-list-item")
            .text("number", &self.number)
            .text("dot", &self.dot)
            .text("space", &self.space)
            .children("content", &self.content)
    }
}

impl ToTree for TaskListItem {
    fn to_tree(&self) -> TreeNode {
        let status: String = self.header.content.iter().map(|c| c.value).collect();
        let mut node = TreeNode::new("task-list-item").text("open-bracket", &self.header.open);
        node.entries.push(TreeEntry::Text {
            key: "status",
            value: status,
        });
        node.text("close-bracket", &self.header.close)
            .text("space", &self.space)
            .children("content", &self.content)
    }
}

impl ToTree for FencedCodeBlock {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("fenced-code-block")
            .text("open-fence", &self.open_fence)
            .maybe_text("info-string", self.info_string.as_ref())
            .text("content", &self.content)
            .text("close-fence", &self.close_fence)
    }
}

impl ToTree for HorizontalRule {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("horizontal-rule").text("tokens", &self.tokens)
    }
}

impl ToTree for Table {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("table")
            .child("header", self.header.to_tree())
            .child("separator", self.separator.to_tree())
            .children("row", &self.rows)
    }
}

impl ToTree for Row {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("row")
            .children("cell", &self.cells)
            .maybe_text("newline", self.newline.as_ref())
    }
}

impl ToTree for Cell {
    fn to_tree(&self) -> TreeNode {
        TreeNode::new("cell")
            .maybe_text("pipe", self.pipe.as_ref())
            .text("content", &self.content)
    }
}

impl ToTree for SeparatorRow {
    fn to_tree(&self) -> TreeNode {
        let mut node = TreeNode::new("separator-row");
        for cell in &self.cells {
            let alignment = match cell.alignment {
                crate::ast::Alignment::None => "none",
                crate::ast::Alignment::Left => "left",
                crate::ast::Alignment::Right => "right",
                crate::ast::Alignment::Center => "center",
            };
            let mut child = TreeNode::new("separator-cell")
                .maybe_text("pipe", cell.pipe.as_ref())
                .text("content", &cell.content);
            child.entries.push(TreeEntry::Text {
                key: "alignment",
                value: alignment.to_string(),
            });
            node = node.child("cell", child);
        }
        node.maybe_text("newline", self.newline.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Tape;

    #[test]
    fn plain_text_renders_label_and_leaf() {
        let node = Inline::PlainText(Tape::from_source("hi")).to_tree();
        assert_eq!(node.label, "plain-text");
        assert_eq!(
            node.entries,
            vec![TreeEntry::Text {
                key: "text",
                value: "hi".to_string()
            }]
        );
    }

    #[test]
    fn emphasis_renders_delimiters_and_children() {
        let t = Tape::from_source("*x*");
        let node = Inline::Emphasis(crate::ast::DelimitedRun {
            open: t.take(1),
            content: vec![Inline::PlainText(t.split_at(1).1.take(1))],
            close: t.split_at(2).1,
        })
        .to_tree();
        assert_eq!(node.label, "emphasis");
        assert_eq!(node.entries.len(), 3);
    }

    #[test]
    fn tree_serializes_to_json() {
        let node = Inline::PlainText(Tape::from_source("a")).to_tree();
        let json = serde_json::to_value(&node).expect("serializable");
        assert_eq!(json["label"], "plain-text");
    }
}
