//! Core types for LSP-like functionality.
//!
//! These types are:
//! - Transport-agnostic (no LSP protocol dependencies)
//! - Serializable to JSON
//! - Easily convertible to `lsp-types` (see `xliff-lsp`)
//!
//! All positions use 0-based line and character indices, as LSP does.

use serde::{Deserialize, Serialize};
use xliff_xml::{NodePos, Pos, Span, Tree};

/// A position in a text document, expressed as zero-based line and character offset.
///
/// Characters are counted as Unicode scalar values, the same unit the
/// parser uses for columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based character offset.
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// The same point as a tree position.
    pub fn to_pos(self) -> Pos {
        Pos::new(self.line as usize, self.character as usize)
    }
}

impl From<Pos> for Position {
    fn from(pos: Pos) -> Self {
        Self::new(
            u32::try_from(pos.line).unwrap_or(u32::MAX),
            u32::try_from(pos.col).unwrap_or(u32::MAX),
        )
    }
}

/// A range in a text document, expressed as start and end positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Range {
    /// The range's start position (inclusive).
    pub start: Position,
    /// The range's end position (exclusive).
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a range spanning a single position (zero-width).
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Range of a tree node: its span for elements, a point for leaves,
    /// and the document start for nodes without a position.
    pub fn of_node(tree: &Tree, id: xliff_xml::NodeId) -> Self {
        match tree.pos(id) {
            Some(NodePos::Span(span)) => span.into(),
            Some(NodePos::Point(pos)) => Range::point(pos.into()),
            None => Range::default(),
        }
    }
}

impl From<Span> for Range {
    fn from(span: Span) -> Self {
        Range::new(span.start.into(), span.end.into())
    }
}

/// Diagnostic severity levels, matching LSP DiagnosticSeverity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
    Hint = 4,
}

/// A diagnostic message, such as a structural error or a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The range at which the diagnostic applies.
    pub range: Range,
    pub severity: DiagnosticSeverity,
    /// The diagnostic's code, which might appear in the user interface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// A human-readable string describing the source of this diagnostic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            code: None,
            source: Some("xliff".to_string()),
            message: message.into(),
        }
    }

    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Error, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Symbol kinds used by the outline, matching LSP SymbolKind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// A `<file>` element.
    Package = 4,
    /// A `<trans-unit>` element.
    Method = 6,
}

/// An outline entry.
///
/// Corresponds to LSP's DocumentSymbol. The name is the label taken from
/// an attribute and is absent when the attribute is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: SymbolKind,
    /// The whole element.
    pub range: Range,
    /// The start of the element's opening tag.
    pub selection_range: Range,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn new(name: Option<String>, kind: SymbolKind, range: Range) -> Self {
        Self {
            name,
            kind,
            range,
            selection_range: Range::point(range.start),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Symbol>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Hierarchical outline of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub items: Vec<Symbol>,
}

/// A completion suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionItem {
    pub label: String,
    pub insert_text: String,
    /// Short annotation shown next to the label, e.g. `TM: 95`.
    pub meta: String,
    /// Higher sorts first.
    pub priority: f64,
}
