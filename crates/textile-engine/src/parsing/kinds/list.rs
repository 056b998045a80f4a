use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;

use crate::models::Node;
use crate::parsing::{Category, ParseError, Parser};

/// Nested bulleted and numbered lists.
///
/// The nesting level of an item is the number of times its marker character
/// is repeated (`*`, `**`, `***` ...). Each level is scanned by its own call,
/// so a deeper run opens a nested list inside the current item and a shallower
/// one returns control to the enclosing level.
pub struct List;

impl List {
    pub const BULLETED_TAG: &'static str = "ul";
    pub const NUMBERED_TAG: &'static str = "ol";
    pub const ITEM_TAG: &'static str = "li";

    /// Parse a whole list; the marker is the first character of `span`.
    pub fn parse(parser: &Parser, span: &str, tag: &str, depth: usize) -> Result<Node, ParseError> {
        let Some(marker) = span.chars().next() else {
            return Ok(Node::new(tag));
        };
        let (list, _) = Self::parse_level(parser, span, tag, marker, 1, depth)?;
        Ok(list)
    }

    /// Compiled level patterns, keyed by marker and level.
    fn level_patterns() -> &'static Mutex<HashMap<(char, usize), Regex>> {
        static PATTERNS: OnceLock<Mutex<HashMap<(char, usize), Regex>>> = OnceLock::new();
        PATTERNS.get_or_init(Default::default)
    }

    /// Matches, at the start of the text, an optional item at exactly `level`
    /// (marker run, space, text up to the next marker) followed by the marker
    /// run that opens the next line.
    fn level_pattern(marker: char, level: usize) -> Result<Regex, ParseError> {
        let mut patterns = Self::level_patterns()
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pattern) = patterns.get(&(marker, level)) {
            return Ok(pattern.clone());
        }

        let m = regex::escape(marker.encode_utf8(&mut [0; 4]));
        let src = format!("(?s)(({m}{{{level}}}) ([^{m}]+)\n*)?({m}+)?");
        let pattern = Regex::new(&src).map_err(|source| ParseError::ListPattern {
            marker,
            level,
            source,
        })?;
        patterns.insert((marker, level), pattern.clone());
        Ok(pattern)
    }

    /// Returns the list node for this level and how many bytes it consumed.
    fn parse_level(
        parser: &Parser,
        text: &str,
        tag: &str,
        marker: char,
        level: usize,
        depth: usize,
    ) -> Result<(Node, usize), ParseError> {
        let line = Self::level_pattern(marker, level)?;
        let mut list = Node::new(tag);
        let mut parsed = 0;

        while parsed < text.len() {
            let Some(caps) = line.captures(&text[parsed..]) else {
                break;
            };
            let item_len = caps.get(1).map_or(0, |m| m.len());
            let content = caps.get(3).map_or("", |m| m.as_str()).trim_matches('\n');
            let next_level = caps.get(4).map_or(0, |m| m.as_str().chars().count());

            // An item without text of its own still hosts the nested list.
            let mut item =
                parser.parse_nested(content, Self::ITEM_TAG, Category::PHRASE, depth + 1)?;
            parsed += item_len;

            let mut nested_len = 0;
            if next_level > level {
                if level < parser.max_list_depth() {
                    let (nested, consumed) = Self::parse_level(
                        parser,
                        &text[parsed..],
                        tag,
                        marker,
                        level + 1,
                        depth + 1,
                    )?;
                    if !nested.children.is_empty() {
                        item.push(nested);
                    }
                    parsed += consumed;
                    nested_len = consumed;
                } else {
                    log::warn!(
                        "list nesting of {next_level} exceeds the limit of {}",
                        parser.max_list_depth()
                    );
                }
            }

            // Nothing consumed: either a shallower line handing control back,
            // or a marker run this level cannot read.
            if item_len == 0 && nested_len == 0 {
                if next_level >= level && parsed < text.len() {
                    log::warn!(
                        "unrecognised list line at level {level}, dropping {} bytes",
                        text.len() - parsed
                    );
                }
                break;
            }

            list.push(item);
            if next_level < level {
                break;
            }
        }

        Ok((list, parsed))
    }
}
