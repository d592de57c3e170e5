//! Structural checks on XLIFF documents.
//!
//! Two XLIFF rules are checked per `<file>`, followed by one diagnostic per
//! syntax error recorded in the tree:
//!
//! 1. a file must declare `target-language`;
//! 2. a trans-unit must contain exactly one `target`.

use crate::extract::{attribute, get_elements};
use crate::types::{Diagnostic, Range};
use xliff_xml::{Cons, Pattern, Tree};

pub const MISSING_TARGET_LANGUAGE: &str = "<file> needs target-language attribute";
pub const TARGET_COUNT: &str = "<trans-unit> needs one target element";

/// Diagnostics for a parsed document.
///
/// For each file in document order: the file's own diagnostic, then those of
/// its units. Syntax errors come last. `minimal` is accepted for hosts that
/// request a cheaper pass and currently changes nothing.
pub fn analyze(tree: &Tree, _minimal: bool) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for file in get_elements(tree, tree.root(), "file") {
        if attribute(tree, file, "target-language").is_none() {
            diagnostics.push(
                Diagnostic::error(Range::of_node(tree, file), MISSING_TARGET_LANGUAGE)
                    .with_code("XLIFF-1"),
            );
        }
        for unit in get_elements(tree, file, "trans-unit") {
            if get_elements(tree, unit, "target").len() != 1 {
                diagnostics.push(
                    Diagnostic::error(Range::of_node(tree, unit), TARGET_COUNT)
                        .with_code("XLIFF-2"),
                );
            }
        }
    }

    let errors = Pattern::Cons(Cons::Error, vec![Pattern::var("message")]);
    for (id, bindings) in tree.collect_matches(tree.root(), &errors) {
        if let Some(message) = bindings.str("message") {
            diagnostics
                .push(Diagnostic::error(Range::of_node(tree, id), message).with_code("XLIFF-XML"));
        }
    }

    tracing::debug!(count = diagnostics.len(), "analyzed document");
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiagnosticSeverity;
    use xliff_xml::parse;

    fn render(diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|d| {
                format!(
                    "{}:{}-{}:{} {}\n",
                    d.range.start.line,
                    d.range.start.character,
                    d.range.end.line,
                    d.range.end.character,
                    d.message
                )
            })
            .collect()
    }

    fn unit_with_targets(targets: usize) -> String {
        format!(
            r#"<xliff><file original="a" target-language="de"><trans-unit id="1"><source>s</source>{}</trans-unit></file></xliff>"#,
            "<target>t</target>".repeat(targets)
        )
    }

    #[test]
    fn test_target_count() {
        for (targets, expected) in [(0, 1), (1, 0), (2, 1)] {
            let diagnostics = analyze(&parse(&unit_with_targets(targets)), false);
            assert_eq!(diagnostics.len(), expected, "{targets} targets");
            if let Some(d) = diagnostics.first() {
                assert_eq!(d.message, TARGET_COUNT);
                assert_eq!(d.severity, DiagnosticSeverity::Error);
                assert_eq!(d.code.as_deref(), Some("XLIFF-2"));
            }
        }
    }

    #[test]
    fn test_missing_target_language_spans_file() {
        let tree = parse(
            "<xliff>\n  <file original=\"a\">\n    <trans-unit id=\"1\"><target>t</target></trans-unit>\n  </file>\n</xliff>",
        );
        let diagnostics = analyze(&tree, false);
        insta::assert_snapshot!(render(&diagnostics), @"1:2-3:9 <file> needs target-language attribute");
    }

    #[test]
    fn test_order_files_then_errors() {
        let text = r#"<xliff>
  <file original="a">
    <trans-unit id="1"></trans-unit>
  </file>
  <file original="b" target-language="fr">
    <trans-unit id="2"><target/><target/></trans-unit>
  </file></wrong>
</xliff>"#;
        let diagnostics = analyze(&parse(text), true);
        insta::assert_snapshot!(render(&diagnostics), @r"
        1:2-3:9 <file> needs target-language attribute
        2:4-2:36 <trans-unit> needs one target element
        5:4-5:54 <trans-unit> needs one target element
        6:9-6:9 Unmatched closing tag: </wrong>
        ");
    }

    #[test]
    fn test_minimal_flag_is_ignored() {
        let tree = parse(&unit_with_targets(0));
        assert_eq!(analyze(&tree, true), analyze(&tree, false));
    }

    #[test]
    fn test_well_formed_document_has_no_diagnostics() {
        assert!(analyze(&parse(&unit_with_targets(1)), false).is_empty());
    }
}
