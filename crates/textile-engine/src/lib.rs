pub mod convert;
pub mod models;
pub mod parsing;
pub mod render;

// Re-export key types for easier usage
pub use convert::{ConvertError, Converter, convert, parse_document};
pub use models::Node;
pub use parsing::{Category, ParseError, Parser};
pub use textile_config::Config;
