//! # Parsing
//!
//! Recognition-and-recursion over a registry of textual patterns.
//!
//! ## Data Flow
//!
//! ```text
//! text → blocks (split on blank lines) → driver at document categories
//!      → driver recursion through list / phrase categories → Node tree
//! ```
//!
//! ## Modules
//!
//! - **`category`**: `Category`, the syntactic class of a rule
//! - **`registry`**: the ordered, process-wide `Rule` table
//! - **`dispatch`**: earliest-match selection among the allowed rules
//! - **`kinds`**: sub-parsers and tags for lists, definition lists and tables
//!
//! ## Key Invariants
//!
//! - Unrecognised text is never an error; it becomes literal text
//! - The segments of one driver call are contiguous and cover the whole span
//! - Identical input always yields an identical tree

pub mod category;
pub mod dispatch;
pub mod kinds;
pub mod registry;

#[cfg(test)]
mod tests;

use std::ops::Range;

use textile_config::Config;

use crate::models::Node;
pub use category::Category;
use dispatch::Dispatcher;
use registry::{Action, Rule};

/// Blocks are separated by one blank line.
pub const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid list pattern for marker {marker:?} at level {level}: {source}")]
    ListPattern {
        marker: char,
        level: usize,
        source: regex::Error,
    },
}

/// One step of a driver call over a span.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Text no allowed rule recognised.
    Literal(Range<usize>),
    /// A recognised construct.
    Construct {
        rule: &'static Rule,
        /// The part of the span this construct used up, after its end offset.
        consumed: Range<usize>,
        /// The rule's first capture group, if it has one.
        group: Option<String>,
    },
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        match self {
            Segment::Literal(range) => range.clone(),
            Segment::Construct { consumed, .. } => consumed.clone(),
        }
    }
}

/// The recursive descent driver.
#[derive(Debug, Clone)]
pub struct Parser {
    max_nesting_depth: usize,
    max_list_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Parser {
    pub fn new(config: &Config) -> Self {
        Self {
            max_nesting_depth: config.max_nesting_depth,
            max_list_depth: config.max_list_depth,
        }
    }

    pub fn max_list_depth(&self) -> usize {
        self.max_list_depth
    }

    /// Parse each blank-line separated block at the document categories.
    ///
    /// The returned node is an untagged fragment with one untagged child per
    /// block, in order.
    pub fn parse_document(&self, text: &str) -> Result<Node, ParseError> {
        let mut document = Node::new("");
        for block in text.split(BLOCK_SEPARATOR) {
            document.push(self.parse(block, "", Category::DOCUMENT)?);
        }
        Ok(document)
    }

    /// Parse `span` into a node tagged `tag`, recognising only rules whose
    /// category is in `allowed`.
    pub fn parse(&self, span: &str, tag: &str, allowed: &[Category]) -> Result<Node, ParseError> {
        self.parse_nested(span, tag, allowed, 0)
    }

    /// [`Parser::parse`] at a given recursion depth, for sub-parsers.
    pub fn parse_nested(
        &self,
        span: &str,
        tag: &str,
        allowed: &[Category],
        depth: usize,
    ) -> Result<Node, ParseError> {
        let mut node = Node::new(tag);
        if depth > self.max_nesting_depth {
            log::debug!(
                "nesting depth {depth} exceeds {}, keeping {} bytes as text",
                self.max_nesting_depth,
                span.len()
            );
            if !span.is_empty() {
                node.push(Node::text(span));
            }
            return Ok(node);
        }

        for segment in self.segments(span, allowed) {
            let child = match segment {
                Segment::Literal(range) => Node::text(&span[range]),
                Segment::Construct {
                    rule, group: None, ..
                } => Node::new(rule.tag),
                Segment::Construct {
                    rule,
                    group: Some(group),
                    ..
                } => match rule.action {
                    Action::SubParser(sub_parser) => sub_parser(self, &group, rule.tag, depth + 1)?,
                    Action::Recurse if rule.children.is_empty() => Node::leaf(rule.tag, group),
                    Action::Recurse => {
                        self.parse_nested(&group, rule.tag, rule.children, depth + 1)?
                    }
                },
            };
            node.push(child);
        }
        Ok(node)
    }

    /// Decompose `span` into literal gaps and recognised constructs.
    ///
    /// Each cycle asks the dispatcher for the earliest match in the remaining
    /// text. A gap before it becomes a literal segment, and the cursor moves
    /// past the match plus the rule's end offset. When nothing matches, the
    /// rest of the span is one literal segment.
    pub fn segments(&self, span: &str, allowed: &[Category]) -> Vec<Segment> {
        let mut segments = Vec::new();
        let haystack = format!("{span}\n");
        let mut dispatcher = Dispatcher::new(&haystack, span.len(), allowed);
        let mut cursor = 0;

        while cursor < span.len() {
            let Some(selection) = dispatcher.select_from(cursor) else {
                segments.push(Segment::Literal(cursor..span.len()));
                break;
            };

            if selection.start > 0 {
                segments.push(Segment::Literal(cursor..cursor + selection.start));
            }

            let advance = selection
                .end
                .checked_add_signed(selection.rule.end_offset)
                .filter(|&advance| advance > selection.start)
                .unwrap_or(selection.end);
            let next = (cursor + advance).min(span.len());
            debug_assert!(span.is_char_boundary(next));

            segments.push(Segment::Construct {
                rule: selection.rule,
                consumed: cursor + selection.start..next,
                group: selection
                    .group
                    .map(|group| haystack[cursor + group.start..cursor + group.end].to_string()),
            });
            cursor = next;
        }

        segments
    }
}
