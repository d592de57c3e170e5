//! Structural lookups over XLIFF trees.
//!
//! Everything here is built on the pattern engine in `xliff-xml`, so the
//! element shape (Name, Attributes, content) is checked in one place.

use xliff_xml::{NodeId, NodeKind, Pattern, Tree};

/// All elements named `tag` under `root`, in document order.
///
/// Nested matches are included: a `trans-unit` inside a `group` inside a
/// `file` is still found from the document root.
pub fn get_elements(tree: &Tree, root: NodeId, tag: &str) -> Vec<NodeId> {
    let pattern = Pattern::element(tag);
    tree.collect_top_down(root, |t, id| t.match_node(id, &pattern).is_some())
}

/// Value of attribute `name` on `element`.
///
/// Only the element's own attribute list is searched, so an inline
/// `<x id="..."/>` inside a unit's source never stands in for the unit's
/// `id`, nor a descendant's `target-language` for the file's. A subtree-wide
/// search would pick those up. With duplicate attributes the last one wins.
pub fn attribute<'t>(tree: &'t Tree, element: NodeId, name: &str) -> Option<&'t str> {
    let attributes = tree.attributes_node(element)?;
    let pattern = Pattern::attr(name, Pattern::var("value"));
    let mut value = None;
    tree.for_each_match(attributes, &pattern, |bindings, _| {
        value = bindings.str("value");
    });
    value
}

/// Concatenated text captured directly inside `element`.
///
/// `None` when the element holds no text at all.
pub fn text_content(tree: &Tree, element: NodeId) -> Option<String> {
    let mut texts = tree
        .content(element)
        .iter()
        .filter_map(|&child| match tree.kind(child) {
            NodeKind::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .peekable();
    texts.peek()?;
    Some(texts.collect())
}

/// Nearest ancestor of `node` that is an element named `tag`.
pub fn enclosing(tree: &Tree, node: NodeId, tag: &str) -> Option<NodeId> {
    tree.ancestors(node)
        .find(|&ancestor| tree.element_name(ancestor) == Some(tag))
}

/// First direct child element of `element` named `tag`.
pub fn child_element(tree: &Tree, element: NodeId, tag: &str) -> Option<NodeId> {
    tree.content(element)
        .iter()
        .copied()
        .find(|&child| tree.element_name(child) == Some(tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use xliff_xml::parse;

    const DOC: &str = r#"<xliff version="1.2">
  <file original="a.properties" target-language="fr">
    <body>
      <group>
        <trans-unit id="k1"><source>Hello</source><target>Bonjour</target></trans-unit>
      </group>
      <trans-unit id="k2" id="k2b"><source>Bye <!-- x -->now</source></trans-unit>
    </body>
  </file>
</xliff>"#;

    #[test]
    fn test_get_elements_in_document_order() {
        let tree = parse(DOC);
        let units = get_elements(&tree, tree.root(), "trans-unit");
        let ids: Vec<_> = units
            .iter()
            .map(|&u| attribute(&tree, u, "id").unwrap())
            .collect();
        assert_eq!(ids, vec!["k1", "k2b"]);
        assert!(get_elements(&tree, tree.root(), "alt-trans").is_empty());
    }

    #[test]
    fn test_get_elements_includes_start_node() {
        let tree = parse(DOC);
        let file = get_elements(&tree, tree.root(), "file")[0];
        assert_eq!(get_elements(&tree, file, "file"), vec![file]);
    }

    #[test]
    fn test_attribute_is_scoped_to_element() {
        let tree = parse(DOC);
        let file = get_elements(&tree, tree.root(), "file")[0];
        assert_eq!(attribute(&tree, file, "target-language"), Some("fr"));
        // `id` only appears on descendants
        assert_eq!(attribute(&tree, file, "id"), None);
    }

    #[test]
    fn test_inline_attributes_do_not_leak_to_unit() {
        let tree = parse(
            r#"<file><trans-unit><source>a <x id="inline"/> b</source></trans-unit></file>"#,
        );
        let unit = get_elements(&tree, tree.root(), "trans-unit")[0];
        assert_eq!(attribute(&tree, unit, "id"), None);
        let inline = get_elements(&tree, unit, "x")[0];
        assert_eq!(attribute(&tree, inline, "id"), Some("inline"));
    }

    #[test]
    fn test_attribute_list_round_trip() {
        let tree = parse(r#"<file original="m.po" source-language="en" datatype="po" target-language="fr"/>"#);
        let file = get_elements(&tree, tree.root(), "file")[0];
        let pairs: Vec<(String, String)> = tree
            .attributes(file)
            .into_iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        let names: Vec<_> = pairs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["original", "source-language", "datatype", "target-language"]);
        for (name, value) in &pairs {
            assert_eq!(attribute(&tree, file, name), Some(value.as_str()));
        }
    }

    #[test]
    fn test_text_content_and_child_element() {
        let tree = parse(DOC);
        let units = get_elements(&tree, tree.root(), "trans-unit");

        let source = child_element(&tree, units[0], "source").unwrap();
        assert_eq!(text_content(&tree, source).as_deref(), Some("Hello"));

        // Text split by a comment is joined
        let source = child_element(&tree, units[1], "source").unwrap();
        assert_eq!(text_content(&tree, source).as_deref(), Some("Bye now"));

        assert_eq!(child_element(&tree, units[1], "target"), None);
    }

    #[test]
    fn test_text_content_empty_element() {
        let tree = parse("<target></target>");
        let target = get_elements(&tree, tree.root(), "target")[0];
        assert_eq!(text_content(&tree, target), None);
    }

    #[test]
    fn test_enclosing_skips_intermediate_elements() {
        let tree = parse(DOC);
        let target = get_elements(&tree, tree.root(), "target")[0];
        let unit = enclosing(&tree, target, "trans-unit").unwrap();
        assert_eq!(attribute(&tree, unit, "id"), Some("k1"));
        let file = enclosing(&tree, unit, "file").unwrap();
        assert_eq!(attribute(&tree, file, "original"), Some("a.properties"));
        assert_eq!(enclosing(&tree, file, "trans-unit"), None);
    }
}
