pub mod node;

pub use node::{Node, TAG_SEPARATOR};
