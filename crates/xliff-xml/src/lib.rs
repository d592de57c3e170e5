//! Error-tolerant, position-annotated XML trees for XLIFF files.
//!
//! This crate wraps [`quick-xml`] in a strict, recovering SAX-style
//! tokenizer and builds an immutable, parent-linked [`Tree`] from its
//! events. Every element records its span and every name, text and error
//! leaf records where it starts. Malformed input never aborts a parse;
//! problems become `Error` nodes where they were found.
//!
//! # Overview
//!
//! - [`parse`]: text to [`Tree`]
//! - [`SaxReader`] / [`SaxHandler`]: the event stream, for custom consumers
//! - [`TreeBuilder`]: the handler that assembles trees
//! - [`Pattern`]: structural patterns with variable capture
//! - [`Tree::collect_top_down`], [`Tree::collect_matches`],
//!   [`Tree::for_each_match`], [`Tree::element_at`]: queries
//!
//! # Example
//!
//! ```rust
//! use xliff_xml::{parse, Pattern};
//!
//! let tree = parse(r#"<trans-unit id="greeting"><source>Hello</source></trans-unit>"#);
//! let pattern: Pattern = r#"Attr("id", id)"#.parse().unwrap();
//! let matches = tree.collect_matches(tree.root(), &pattern);
//! assert_eq!(matches[0].1.str("id"), Some("greeting"));
//! ```
//!
//! Only direct text of `source` and `target` elements is kept; other text
//! is dropped after its position has been accounted for.

pub mod builder;
pub mod error;
pub mod parser;
pub mod pattern;
pub mod position;
mod query;
pub mod sax;
pub mod tree;

pub use builder::TreeBuilder;
pub use error::{PatternError, SyntaxError};
pub use parser::parse;
pub use pattern::{Binding, Bindings, Cons, Pattern};
pub use position::{NodePos, Pos, Span};
pub use sax::{Attribute, OpenTag, SaxHandler, SaxReader};
pub use tree::{Node, NodeId, NodeKind, Tree};

/// Indented text rendering of a tree, one node per line.
pub fn dump(tree: &Tree) -> String {
    let mut out = String::new();
    dump_node(tree, tree.root(), 0, &mut out);
    out
}

fn dump_node(tree: &Tree, id: NodeId, depth: usize, out: &mut String) {
    use std::fmt::Write;

    let indent = "  ".repeat(depth);
    let pos = match tree.pos(id) {
        Some(NodePos::Span(span)) => format!(
            " {}:{}-{}:{}",
            span.start.line, span.start.col, span.end.line, span.end.col
        ),
        Some(NodePos::Point(p)) => format!(" @{}:{}", p.line, p.col),
        None => String::new(),
    };
    let label = match tree.kind(id) {
        NodeKind::Name(s) | NodeKind::Text(s) | NodeKind::Error(s) => {
            format!("{} {:?}", tree.kind(id).cons(), s)
        }
        NodeKind::Attr { name, value } => format!("Attr {name}={value:?}"),
        kind => kind.cons().to_string(),
    };
    let _ = writeln!(out, "{indent}{label}{pos}");
    for &child in tree.children(id) {
        dump_node(tree, child, depth + 1, out);
    }
}
