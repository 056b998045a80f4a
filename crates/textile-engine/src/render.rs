//! # HTML Rendering
//!
//! Order-preserving concatenation of a [`Node`] tree:
//!
//! - containers render their children in order, leaves render escaped text
//! - an empty tag renders the inner content unwrapped
//! - a tagged node with empty content renders a single unpaired opening tag
//!   (`<br>`, `<img>`); for a composite tag only the outermost one
//! - a composite tag (`pre+code`) nests one open/close pair per component,
//!   outermost first

use std::borrow::Cow;

use crate::models::Node;

/// Render a node and its subtree to HTML.
pub fn to_html(node: &Node) -> String {
    let inner = if node.is_leaf() {
        escape_text(&node.text).into_owned()
    } else {
        node.children.iter().map(to_html).collect()
    };

    let tags: Vec<&str> = node.tags().collect();
    let Some(outermost) = tags.first() else {
        return inner;
    };

    let mut out = String::with_capacity(inner.len() + 16 * tags.len());
    if inner.is_empty() {
        open_tag(&mut out, outermost, node);
        return out;
    }

    for (i, tag) in tags.iter().enumerate() {
        if i == 0 {
            open_tag(&mut out, tag, node);
        } else {
            out.push('<');
            out.push_str(tag);
            out.push('>');
        }
    }
    out.push_str(&inner);
    for tag in tags.iter().rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out
}

/// Attributes are written on the outermost tag only.
fn open_tag(out: &mut String, tag: &str, node: &Node) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in &node.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_text(value));
        out.push('"');
    }
    out.push('>');
}

/// Escape `&`, `<`, `>` plus both quote characters using numeric references.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let escaped = html_escape::encode_text(text);
    if !escaped.contains(['"', '\'']) {
        return escaped;
    }
    Cow::Owned(escaped.replace('"', "&#34;").replace('\'', "&#39;"))
}
