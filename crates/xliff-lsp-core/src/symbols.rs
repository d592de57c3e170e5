//! Document outline for navigation.
//!
//! Each `<file>` becomes a package labelled by its `original` attribute,
//! with one method entry per `<trans-unit>` it contains, labelled by `id`.

use crate::extract::{attribute, get_elements};
use crate::types::{Outline, Range, Symbol, SymbolKind};
use xliff_xml::Tree;

/// Build the outline of a parsed document.
///
/// Files and units appear in document order. Units nested in `group`
/// elements are listed directly under their file. Missing labels are kept
/// as `None`.
pub fn outline(tree: &Tree) -> Outline {
    let items = get_elements(tree, tree.root(), "file")
        .into_iter()
        .map(|file| {
            let units = get_elements(tree, file, "trans-unit").into_iter().map(|unit| {
                Symbol::new(
                    attribute(tree, unit, "id").map(str::to_string),
                    SymbolKind::Method,
                    Range::of_node(tree, unit),
                )
            });
            Symbol::new(
                attribute(tree, file, "original").map(str::to_string),
                SymbolKind::Package,
                Range::of_node(tree, file),
            )
            .with_children(units)
        })
        .collect();
    Outline { items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xliff_xml::parse;

    fn render(outline: &Outline) -> String {
        fn line(symbol: &Symbol, depth: usize, out: &mut String) {
            let r = symbol.range;
            out.push_str(&format!(
                "{}{:?} {} {}:{}-{}:{}\n",
                "  ".repeat(depth),
                symbol.kind,
                symbol.name.as_deref().unwrap_or("<none>"),
                r.start.line,
                r.start.character,
                r.end.line,
                r.end.character,
            ));
            for child in &symbol.children {
                line(child, depth + 1, out);
            }
        }
        let mut out = String::new();
        for item in &outline.items {
            line(item, 0, &mut out);
        }
        out
    }

    const TWO_FILES: &str = r#"<xliff>
  <file original="a.properties">
    <body>
      <trans-unit id="k1"><source>a</source></trans-unit>
      <trans-unit id="k2"><source>b</source></trans-unit>
    </body>
  </file>
  <file original="b.properties">
    <trans-unit id="k3"><source>c</source></trans-unit>
  </file>
</xliff>"#;

    #[test]
    fn test_two_file_outline() {
        let outline = outline(&parse(TWO_FILES));
        insta::assert_snapshot!(render(&outline), @r"
        Package a.properties 1:2-6:9
          Method k1 3:6-3:57
          Method k2 4:6-4:57
        Package b.properties 7:2-9:9
          Method k3 8:4-8:55
        ");
    }

    #[test]
    fn test_missing_labels_are_none() {
        let tree = parse(r#"<file><trans-unit><source>x</source></trans-unit></file>"#);
        let outline = outline(&tree);
        assert_eq!(outline.items.len(), 1);
        assert_eq!(outline.items[0].name, None);
        assert_eq!(outline.items[0].children[0].name, None);
        assert_eq!(outline.items[0].children[0].kind, SymbolKind::Method);
    }

    #[test]
    fn test_units_outside_files_are_not_listed() {
        let tree = parse(r#"<xliff><trans-unit id="stray"/></xliff>"#);
        assert!(outline(&tree).items.is_empty());
    }

    #[test]
    fn test_selection_range_is_tag_start() {
        let outline = outline(&parse(TWO_FILES));
        let unit = &outline.items[1].children[0];
        assert_eq!(unit.selection_range, Range::point(unit.range.start));
        assert_eq!(unit.selection_range.start, unit.selection_range.end);
    }
}
