//! Driver-level tests: segmentation, recursion and the invariants that tie
//! them together.


use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;
use textile_config::Config;

use crate::models::Node;
use crate::parsing::{Category, Parser, Segment};

/// Indented outline of a tree: `tag` for containers, `tag "text"` for leaves.
fn outline(node: &Node, indent: usize) -> String {
    let prefix = "  ".repeat(indent);
    let tag = if node.tag.is_empty() { "_" } else { &node.tag };
    let mut result = if node.is_leaf() {
        format!("{prefix}{tag} {:?}\n", node.text)
    } else {
        format!("{prefix}{tag}\n")
    };
    for child in &node.children {
        result.push_str(&outline(child, indent + 1));
    }
    result
}

fn block(text: &str) -> Node {
    Parser::default()
        .parse(text, "", Category::DOCUMENT)
        .unwrap()
}

// Invariant tests

#[rstest]
#[case("p. paragraph")]
#[case("plain text with no markup")]
#[case("_emphasis_ __italic__ *strong* **bold** ^sup^ ~sub~")]
#[case("e[_m_]phasis i[__t__]alic s[*t*]rong b[**o**]ld s[^u^]p s[~u~]b")]
#[case("*strong strong* *stron*g strong* strong*")]
#[case("@code code@ c@o@de @cod@e code@ code@")]
#[case("??cite1??\n??cite2??\n-- Author")]
#[case("- name1 := definition1\n- name2 := definition2\nline2 =:")]
#[case("* list1\n** list1.1\n** list1.2\n* list2")]
#[case("|a|b|\n|c|d|")]
#[case("###. hidden\nline")]
#[case("h1. title\nwith\"a link\":http://example.com here x!i.png!y")]
#[case("unicode café *naïve* text\n")]
fn decomposition_is_lossless(#[case] text: &str) {
    invariants::check(&Parser::default(), text, Category::DOCUMENT);
    invariants::check(&Parser::default(), text, Category::PHRASE);
}

#[test]
fn parsing_is_deterministic() {
    let text = "- a := _b_\n- c := d =:\n";
    assert_eq!(block(text), block(text));
}

// Segmentation

#[test]
fn gap_before_match_is_literal() {
    let segments = Parser::default().segments("ab ??c??", Category::PHRASE);
    assert_eq!(segments.len(), 2);
    assert!(matches!(segments[0], Segment::Literal(ref r) if *r == (0..3)));
    match &segments[1] {
        Segment::Construct {
            rule,
            consumed,
            group,
        } => {
            assert_eq!(rule.tag, "cite");
            assert_eq!(*consumed, 3..8);
            assert_eq!(group.as_deref(), Some("c"));
        }
        other => panic!("expected construct, got {other:?}"),
    }
}

#[test]
fn negative_end_offset_re_exposes_terminator() {
    let segments = Parser::default().segments("*ab* c", Category::PHRASE);
    // The strong match ends with the space, which is handed back as text.
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].range(), 0..4);
    assert!(matches!(segments[1], Segment::Literal(ref r) if *r == (4..6)));
}

#[test]
fn empty_span_has_no_segments() {
    assert!(Parser::default().segments("", Category::DOCUMENT).is_empty());
}

#[test]
fn no_allowed_categories_yields_one_literal() {
    let segments = Parser::default().segments("p. *x*", Category::OPAQUE);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].range(), 0..6);
}

// Tree shape

#[test]
fn nested_phrases_recurse() {
    assert_snapshot!(outline(&block("p. a [**b _c_ d**] e"), 0), @r#"
    _
      p
        _ "a "
        b
          _ "b "
          em
            _ "c"
          _ " d"
        _ " e"
    "#);
}

#[test]
fn definition_list_shape() {
    assert_snapshot!(outline(&block("- x := y\n- z := w"), 0), @r#"
    _
      dl
        dt
          _ "x"
        dd
          _ "y"
        dt
          _ "z"
        dd
          _ "w"
    "#);
}

#[test]
fn suppressed_comment_is_an_empty_untagged_node() {
    let node = block("###. gone");
    assert_eq!(node.children, vec![Node::new("")]);
}

#[test]
fn code_block_content_is_opaque() {
    let node = block("bc. *not strong* ");
    assert_eq!(node.children, vec![Node::leaf("pre+code", "*not strong* ")]);
}

#[test]
fn link_keeps_quoted_text_only() {
    let node = block("see\"docs\":http://example.com now");
    let paragraph = &node.children[0];
    assert_eq!(
        paragraph.children,
        vec![
            Node::text("see"),
            Node::leaf("a", "docs"),
            Node::text("://example.com now"),
        ]
    );
}

#[test]
fn link_needs_a_word_before_the_quote() {
    let node = block("see \"docs\":http://example.com");
    assert_eq!(node.children[0].children, vec![Node::text("see \"docs\":http://example.com")]);
}

#[test]
fn image_between_words_is_bare() {
    let node = block("x!img.png!y");
    assert_eq!(
        node.children[0].children,
        vec![Node::text("x"), Node::new("img"), Node::text("y")]
    );
}

#[test]
fn nesting_limit_keeps_deep_span_as_text() {
    let parser = Parser::new(&Config {
        max_nesting_depth: 0,
        ..Config::default()
    });
    let node = parser
        .parse("[_a [**b**] c_]", "", Category::PHRASE)
        .unwrap();
    assert_eq!(node.to_html(), "<em>a [**b**] c</em>");
}

#[test]
fn document_keeps_one_child_per_block() {
    let document = Parser::default()
        .parse_document("p. one\n\nh1. two\n\n")
        .unwrap();
    let html: Vec<_> = document.children.iter().map(Node::to_html).collect();
    assert_eq!(html, vec!["<p>one</p>", "<h1>two</h1>", ""]);
}
