use std::sync::OnceLock;

use regex::Regex;

use crate::models::Node;
use crate::parsing::{Category, ParseError, Parser};

/// Pipe-delimited tables, one row per line.
pub struct Table;

impl Table {
    pub const TAG: &'static str = "table";
    pub const ROW_TAG: &'static str = "tr";
    pub const CELL_TAG: &'static str = "td";
    pub const DELIMITER: char = '|';

    /// A whole line `|...|`, anchored at the start of the remaining text.
    fn row_pattern() -> &'static Regex {
        static ROW: OnceLock<Regex> = OnceLock::new();
        ROW.get_or_init(|| Regex::new(r"(?U)^\|(.*)\|\n").expect("invalid table row pattern"))
    }

    /// Parse rows until the first line that is not a row.
    ///
    /// Whatever follows that line is dropped, not rendered.
    pub fn parse(parser: &Parser, span: &str, tag: &str, depth: usize) -> Result<Node, ParseError> {
        let mut table = Node::new(tag);
        let haystack = format!("{span}\n");
        let mut parsed = 0;

        while parsed < span.len() {
            let Some(caps) = Self::row_pattern().captures(&haystack[parsed..]) else {
                log::warn!(
                    "malformed table row, dropping {} trailing bytes",
                    span.len() - parsed
                );
                break;
            };

            let mut row = Node::new(Self::ROW_TAG);
            for cell in caps[1].split(Self::DELIMITER) {
                row.push(parser.parse_nested(cell, Self::CELL_TAG, Category::PHRASE, depth + 1)?);
            }
            table.push(row);
            parsed += caps[0].len();
        }

        Ok(table)
    }
}
