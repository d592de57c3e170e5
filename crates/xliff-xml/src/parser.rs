//! Entry point tying the tokenizer to the tree builder.

use crate::builder::TreeBuilder;
use crate::sax::SaxReader;
use crate::tree::Tree;

/// Parse XML text into a position-annotated tree.
///
/// Parsing never fails: malformed input yields a tree containing `Error`
/// nodes where the problems were found.
///
/// # Example
///
/// ```rust
/// use xliff_xml::parse;
///
/// let tree = parse(r#"<file original="a.properties"><body/></file>"#);
/// let file = tree.children(tree.root())[0];
/// assert_eq!(tree.element_name(file), Some("file"));
/// assert_eq!(tree.attributes(file), vec![("original", "a.properties")]);
/// ```
pub fn parse(content: &str) -> Tree {
    let mut builder = TreeBuilder::new();
    SaxReader::new(content).run(&mut builder);
    let tree = builder.into_tree();
    tracing::debug!(nodes = tree.len(), "parsed XML tree");
    tree
}
