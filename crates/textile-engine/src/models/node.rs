use std::collections::BTreeMap;

use crate::render;

/// Separator between the components of a composite tag such as `pre+code`.
pub const TAG_SEPARATOR: char = '+';

/// The universal element of the output tree.
///
/// A node is either a container (non-empty `children`, whose renderings are
/// concatenated) or a leaf (renders its escaped `text`). An empty `tag` makes
/// the node a transparent fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Element name, possibly composite (`pre+code`), applied outermost first.
    pub tag: String,
    /// Raw literal content; ignored once the node has children.
    pub text: String,
    /// Reserved for collaborators; the parser never fills it in.
    pub attributes: BTreeMap<String, String>,
    /// Owned children in rendering order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty node wrapping its future children in `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Create an untagged literal-text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a tagged leaf holding opaque text.
    pub fn leaf(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Components of the tag, outermost first. Empty for a transparent fragment.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag
            .split(TAG_SEPARATOR)
            .filter(|component| !component.is_empty())
    }

    pub fn to_html(&self) -> String {
        render::to_html(self)
    }
}
