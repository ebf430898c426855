//! End-to-end grammar scenarios.

use marktape::ast::{Block, Inline, SourceText};
use marktape::{parse, parse_inlines};

fn parse_complete(input: &str) -> Vec<Block> {
    let (blocks, state) = parse(input);
    assert!(
        state.tape.is_empty(),
        "unparsed trailing input: {:?}",
        state.tape
    );
    blocks.expect("document parse succeeded")
}

fn parse_inlines_complete(input: &str) -> Vec<Inline> {
    let (inlines, state) = parse_inlines(input);
    assert!(
        state.tape.is_empty(),
        "unparsed trailing input: {:?}",
        state.tape
    );
    inlines.expect("inline parse succeeded")
}

// ── links ────────────────────────────────────────────────────────────

#[test]
fn link_structure() {
    let inlines = parse_inlines_complete("[link text](http://dev.nodeca.com)");
    assert_eq!(inlines.len(), 1);
    let link = match &inlines[0] {
        Inline::Link(link) => link,
        other => panic!("expected a link, got {other:?}"),
    };
    let label_text: String = link
        .label
        .content
        .iter()
        .map(SourceText::source_text)
        .collect();
    assert_eq!(label_text, "link text");
    assert_eq!(link.open_paren.text(), "(");
    assert_eq!(link.destination.text(), "http://dev.nodeca.com");
    assert!(link.title.is_none());
    assert_eq!(link.close_paren.text(), ")");
}

#[test]
fn link_label_never_holds_a_bracket() {
    for input in [
        "[link text](u)",
        "[a *b* c](u)",
        "[`code`](u)",
        "[![img](i)](u)",
    ] {
        let inlines = parse_inlines_complete(input);
        let link = match &inlines[0] {
            Inline::Link(link) => link,
            Inline::Image(image) => &image.link,
            other => panic!("expected a link, got {other:?}"),
        };
        for item in &link.label.content {
            if let Inline::PlainText(t) = item {
                assert!(!t.text().contains(']'), "bracket inside label: {input}");
            }
        }
        assert!(!link.destination.text().contains(')'));
    }
}

// ── emphasis family ──────────────────────────────────────────────────

#[test]
fn emphasis_splits_surrounding_text() {
    let inlines = parse_inlines_complete("Alpha *Beta Gamma* Delta");
    assert_eq!(inlines.len(), 3);
    match &inlines[0] {
        Inline::PlainText(t) => assert_eq!(t.text(), "Alpha "),
        other => panic!("unexpected {other:?}"),
    }
    match &inlines[1] {
        Inline::Emphasis(run) => {
            assert_eq!(run.open.text(), "*");
            assert_eq!(run.close.text(), "*");
            assert_eq!(run.content.len(), 1);
            match &run.content[0] {
                Inline::PlainText(t) => assert_eq!(t.text(), "Beta Gamma"),
                other => panic!("unexpected {other:?}"),
            }
        }
        other => panic!("unexpected {other:?}"),
    }
    match &inlines[2] {
        Inline::PlainText(t) => assert_eq!(t.text(), " Delta"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn triple_run_is_one_emphasis() {
    let inlines = parse_inlines_complete("***x***");
    assert_eq!(inlines.len(), 1);
    match &inlines[0] {
        Inline::Emphasis(run) => {
            assert_eq!(run.open.text(), "***");
            assert_eq!(run.close.text(), "***");
            assert_eq!(run.content.len(), 1);
            assert!(matches!(&run.content[0], Inline::PlainText(_)));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn balanced_delimiters_across_the_family() {
    let inlines = parse_inlines_complete("*a* **b** ==c== ~~d~~ ~e~ ^f^ `g`");
    for item in &inlines {
        match item {
            Inline::Emphasis(run)
            | Inline::Highlight(run)
            | Inline::Strikethrough(run)
            | Inline::Sub(run)
            | Inline::Sup(run) => {
                assert_eq!(run.open.len(), run.close.len());
                assert!(run.open.same_text(&run.close));
            }
            Inline::InlineCode(code) => {
                assert_eq!(code.open.len(), code.close.len());
                assert!(code.open.same_text(&code.close));
            }
            Inline::PlainText(_) => {}
            other => panic!("unexpected {other:?}"),
        }
    }
}

// ── inline code ──────────────────────────────────────────────────────

#[test]
fn inline_code_run_length_matching() {
    let inlines = parse_inlines_complete("`` a ` b ``");
    assert_eq!(inlines.len(), 1);
    match &inlines[0] {
        Inline::InlineCode(code) => {
            assert_eq!(code.open.text(), "``");
            assert_eq!(code.content.text(), " a ` b ");
            assert_eq!(code.close.text(), "``");
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ── blockquotes ──────────────────────────────────────────────────────

#[test]
fn blockquote_aggregation_and_put_back() {
    let input = "> A1 Red\n> A2 Blue\n> A3 Green\n\n> B1 Alpha";
    let blocks = parse_complete(input);
    assert_eq!(blocks.len(), 4);
    match &blocks[0] {
        Block::Blockquote(q) => {
            assert_eq!(q.markers.len(), 3);
            let body: String = q.content.iter().map(SourceText::source_text).collect();
            assert_eq!(body, "A1 Red\nA2 Blue\nA3 Green");
        }
        other => panic!("unexpected {other:?}"),
    }
    // The trimmed trailing newline was put back: two newline blocks follow.
    assert!(matches!(blocks[1], Block::Newline(_)));
    assert!(matches!(blocks[2], Block::Newline(_)));
    match &blocks[3] {
        Block::Blockquote(q) => {
            let body: String = q.content.iter().map(SourceText::source_text).collect();
            assert_eq!(body, "B1 Alpha");
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ── list items ───────────────────────────────────────────────────────

#[test]
fn list_item_body_capture() {
    let input = "- A1 Red\n  A2 Blue\n  A3 Green\n- B1 Alpha";
    let blocks = parse_complete(input);
    assert_eq!(blocks.len(), 2);
    match &blocks[0] {
        Block::UnorderedListItem(item) => {
            let body: String = item.content.iter().map(SourceText::source_text).collect();
            assert_eq!(body, "A1 Red\nA2 Blue\nA3 Green\n");
        }
        other => panic!("unexpected {other:?}"),
    }
    match &blocks[1] {
        Block::UnorderedListItem(item) => {
            let body: String = item.content.iter().map(SourceText::source_text).collect();
            assert_eq!(body, "B1 Alpha");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn ordered_and_task_items() {
    let blocks = parse_complete("1. first\n2. second\n");
    assert!(blocks
        .iter()
        .all(|b| matches!(b, Block::OrderedListItem(_))));

    let blocks = parse_complete("[x] ship it\n[ ] later\n");
    match &blocks[0] {
        Block::TaskListItem(item) => {
            assert_eq!(item.header.content.map(|c| c.value), Some('x'));
        }
        other => panic!("unexpected {other:?}"),
    }
    match &blocks[1] {
        Block::TaskListItem(item) => {
            assert_eq!(item.header.content.map(|c| c.value), Some(' '));
        }
        other => panic!("unexpected {other:?}"),
    }
}

// ── remaining blocks ─────────────────────────────────────────────────

#[test]
fn heading_levels_and_ids() {
    let blocks = parse_complete("# one\n## two {id-2}\n");
    match &blocks[0] {
        Block::Heading(h) => {
            assert_eq!(h.hashes.len(), 1);
            assert!(h.id.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
    match &blocks[2] {
        Block::Heading(h) => {
            assert_eq!(h.hashes.len(), 2);
            assert_eq!(h.id.as_ref().unwrap().content.text(), "id-2");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn fenced_code_is_verbatim() {
    let blocks = parse_complete("```rust\nlet x = \"*no emphasis*\";\n```");
    match &blocks[0] {
        Block::FencedCodeBlock(f) => {
            assert_eq!(f.info_string.as_ref().unwrap().text(), "rust");
            assert_eq!(f.content.text(), "\nlet x = \"*no emphasis*\";\n");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn horizontal_rule_variants() {
    for input in ["---", "****", "___"] {
        let blocks = parse_complete(input);
        assert!(
            matches!(blocks[0], Block::HorizontalRule(_)),
            "not a rule: {input}"
        );
    }
}

#[test]
fn table_with_rows() {
    let blocks = parse_complete("| h1 | h2 |\n|----|----|\n| a | b |\n");
    match &blocks[0] {
        Block::Table(t) => {
            assert_eq!(t.rows.len(), 1);
            assert_eq!(t.header.cells[0].content.text(), " h1 ");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn paragraph_is_the_fallback() {
    let blocks = parse_complete("just ordinary text with a ] bracket");
    assert!(matches!(blocks[0], Block::Paragraph(_)));
}

// ── failure is local ─────────────────────────────────────────────────

#[test]
fn unclosed_constructs_degrade_to_text() {
    for input in [
        "*unclosed emphasis",
        "`unclosed code",
        "[label without paren]",
        "```\nunclosed fence",
    ] {
        let blocks = parse_complete(input);
        assert!(!blocks.is_empty(), "nothing parsed for {input:?}");
        let text: String = blocks.iter().map(SourceText::source_text).collect();
        assert_eq!(text, input);
    }
}
