//! # Pattern Registry
//!
//! The fixed, ordered catalogue of rules the dispatcher chooses from. It is
//! compiled once on first use and never mutated afterwards, so it can be
//! shared freely between threads.
//!
//! Order only matters as a tie-breaker: when several allowed rules match at
//! the same offset, the one registered first wins. That is what makes `[**o**]`
//! bold rather than strong, and a list block a list rather than a paragraph.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::category::Category;
use super::kinds::{DefinitionList, List, Table};
use super::{ParseError, Parser};
use crate::models::Node;

/// A custom parser taking a rule's first capture group and tag.
///
/// The trailing argument is the current recursion depth, to be passed on to
/// [`Parser::parse_nested`].
pub type SubParser = fn(&Parser, &str, &str, usize) -> Result<Node, ParseError>;

/// What happens to a rule's captured group.
#[derive(Clone, Copy)]
pub enum Action {
    /// Parse the group with the generic driver under the rule's child categories.
    Recurse,
    /// Hand the group to a dedicated sub-parser.
    SubParser(SubParser),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Recurse => f.write_str("Recurse"),
            Action::SubParser(_) => f.write_str("SubParser"),
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    pub pattern: Regex,
    /// The same pattern, only matching at the start of the text.
    pub anchored: Regex,
    /// Output tag; may be composite (`pre+code`) or empty for suppressed constructs.
    pub tag: &'static str,
    pub category: Category,
    /// Categories allowed inside the captured group. Empty means opaque text.
    pub children: &'static [Category],
    /// Adjustment to the consumed length, negative to re-expose a terminator.
    pub end_offset: isize,
    pub action: Action,
}

impl Rule {
    /// Compile `src` dot-matches-newline and ungreedy, like every registry pattern.
    pub fn new(
        src: &str,
        tag: &'static str,
        category: Category,
        children: &'static [Category],
    ) -> Self {
        let pattern = Regex::new(&format!("(?Us){src}")).expect("invalid registry pattern");
        let anchored = Regex::new(&format!("(?Us)^(?:{src})")).expect("invalid registry pattern");
        Self {
            pattern,
            anchored,
            tag,
            category,
            children,
            end_offset: 0,
            action: Action::Recurse,
        }
    }

    pub fn with_end_offset(mut self, end_offset: isize) -> Self {
        self.end_offset = end_offset;
        self
    }

    pub fn with_sub_parser(mut self, sub_parser: SubParser) -> Self {
        self.action = Action::SubParser(sub_parser);
        self
    }

    pub fn has_capture(&self) -> bool {
        self.pattern.captures_len() > 1
    }
}

/// The process-wide registry, in tie-breaking order.
pub fn registry() -> &'static [Rule] {
    static REGISTRY: OnceLock<Vec<Rule>> = OnceLock::new();
    REGISTRY.get_or_init(build)
}

fn build() -> Vec<Rule> {
    use Category::{Block, List as ListCategory, Phrase};

    let mut rules = vec![
        Rule::new(r"p. (.*)\n*$", "p", Block, Category::PHRASE),
        Rule::new(r"h1. (.*)\n*$", "h1", Block, Category::PHRASE),
        Rule::new(r"(\*+ .*)\n*$", List::BULLETED_TAG, ListCategory, Category::OPAQUE)
            .with_sub_parser(List::parse),
        Rule::new(r"(#+ .*)\n*$", List::NUMBERED_TAG, ListCategory, Category::OPAQUE)
            .with_sub_parser(List::parse),
    ];
    rules.extend(DefinitionList::rules());
    rules.extend([
        Rule::new(r"bc. (.*)\n*$", "pre+code", Block, Category::OPAQUE),
        Rule::new(r"pre. (.*)\n*$", "pre", Block, Category::OPAQUE),
        Rule::new(r"###. .*$", "", Block, Category::OPAQUE),
        Rule::new(r"(\|.*\|)\n*$", Table::TAG, Block, Category::OPAQUE)
            .with_sub_parser(Table::parse),
        Rule::new(r"(.*)\n*$", "p", Block, Category::PHRASE),
        Rule::new(r"\n", "br", Phrase, Category::OPAQUE),
        // The URL stops at its first word boundary.
        Rule::new(r#"\b"([^"]+)":[^\s]+\b"#, "a", Phrase, Category::OPAQUE),
        Rule::new(r"\b![^\s!]+!\b", "img", Phrase, Category::OPAQUE),
        Rule::new(r"\B\*\*(.+)\*\*\B", "b", Phrase, Category::PHRASE),
        Rule::new(r"\[\*\*(.+)\*\*\]", "b", Phrase, Category::PHRASE),
        // The trailing whitespace keeps `foo*bar*baz` out, and is handed back.
        Rule::new(r"\B\*(.+[^*])\*[\t\n\f\r ]", "strong", Phrase, Category::PHRASE)
            .with_end_offset(-1),
        Rule::new(r"\[\*(.+)\*\]", "strong", Phrase, Category::PHRASE),
        Rule::new(r"\b__(.+)__\b", "i", Phrase, Category::PHRASE),
        Rule::new(r"\[__(.+)__\]", "i", Phrase, Category::PHRASE),
        Rule::new(r"\b_(.+)_\b", "em", Phrase, Category::PHRASE),
        Rule::new(r"\[_(.+)_\]", "em", Phrase, Category::PHRASE),
        Rule::new(r"\B~(.+)~\B", "sub", Phrase, Category::PHRASE),
        Rule::new(r"\[~(.+)~\]", "sub", Phrase, Category::PHRASE),
        Rule::new(r"\B\^(.+)\^\B", "sup", Phrase, Category::PHRASE),
        Rule::new(r"\[\^(.+)\^\]", "sup", Phrase, Category::PHRASE),
        Rule::new(r"\B\+(.+)\+\B", "ins", Phrase, Category::PHRASE),
        Rule::new(r"\[\+(.+)\+\]", "ins", Phrase, Category::PHRASE),
        Rule::new(r"\B-(.+)-\B", "del", Phrase, Category::PHRASE),
        Rule::new(r"\[-(.+)-\]", "del", Phrase, Category::PHRASE),
        Rule::new(r"\B@(.+)@\B", "code", Phrase, Category::PHRASE),
        Rule::new(r"\?\?(.+)\?\?", "cite", Phrase, Category::PHRASE),
    ]);
    rules
}
