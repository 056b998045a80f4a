use textile_config::Config;

use crate::models::Node;
use crate::parsing::{ParseError, Parser};
use crate::render;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Input is {len} bytes, above the limit of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Text to HTML conversion under a set of limits.
#[derive(Debug, Clone)]
pub struct Converter {
    max_input_bytes: usize,
    parser: Parser,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Converter {
    pub fn new(config: &Config) -> Self {
        Self {
            max_input_bytes: config.max_input_bytes,
            parser: Parser::new(config),
        }
    }

    pub fn parse_document(&self, text: &str) -> Result<Node, ConvertError> {
        if text.len() > self.max_input_bytes {
            log::debug!(
                "rejecting {} byte document (limit {})",
                text.len(),
                self.max_input_bytes
            );
            return Err(ConvertError::InputTooLarge {
                len: text.len(),
                limit: self.max_input_bytes,
            });
        }
        Ok(self.parser.parse_document(text)?)
    }

    /// Blocks render back to back, with no separator between them.
    pub fn convert(&self, text: &str) -> Result<String, ConvertError> {
        let document = self.parse_document(text)?;
        Ok(render::to_html(&document))
    }
}

/// Parse with the default limits.
pub fn parse_document(text: &str) -> Result<Node, ConvertError> {
    Converter::default().parse_document(text)
}

/// Convert with the default limits.
pub fn convert(text: &str) -> Result<String, ConvertError> {
    Converter::default().convert(text)
}
