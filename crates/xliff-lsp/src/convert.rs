//! Conversion between xliff-lsp-core types and tower_lsp::lsp_types.
//!
//! Core positions count characters. Clients count UTF-16 code units unless
//! they agree to UTF-32, so every position crossing the boundary goes
//! through a [`LineIndex`] over the document text.

use tower_lsp::lsp_types::{
    CompletionItem as LspCompletionItem, CompletionItemKind, Diagnostic as LspDiagnostic,
    DiagnosticSeverity as LspSeverity, DocumentSymbol as LspDocumentSymbol, NumberOrString,
    Position as LspPosition, PositionEncodingKind, Range as LspRange,
    SymbolKind as LspSymbolKind,
};

use xliff_lsp_core::types::{
    CompletionItem, Diagnostic, DiagnosticSeverity, Position, Range, Symbol, SymbolKind,
};

/// Shown for outline entries whose label attribute is missing.
const UNNAMED: &str = "(unnamed)";

/// Unit of `character` in positions exchanged with the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// The LSP default.
    #[default]
    Utf16,
    /// Characters, the unit the parser counts in.
    Utf32,
}

impl Encoding {
    /// UTF-32 when the client offers it, UTF-16 otherwise.
    pub fn negotiate(offered: Option<&[PositionEncodingKind]>) -> Self {
        if offered.is_some_and(|kinds| kinds.contains(&PositionEncodingKind::UTF32)) {
            Encoding::Utf32
        } else {
            Encoding::Utf16
        }
    }

    pub fn kind(self) -> PositionEncodingKind {
        match self {
            Encoding::Utf16 => PositionEncodingKind::UTF16,
            Encoding::Utf32 => PositionEncodingKind::UTF32,
        }
    }
}

/// Line starts of a document, for column conversion.
///
/// Lines break on `\n` only, matching the parser.
pub struct LineIndex<'a> {
    text: &'a str,
    starts: Vec<usize>,
    encoding: Encoding,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str, encoding: Encoding) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            text,
            starts,
            encoding,
        }
    }

    fn line(&self, line: u32) -> &'a str {
        let line = line as usize;
        let Some(&start) = self.starts.get(line) else {
            return "";
        };
        let end = self
            .starts
            .get(line + 1)
            .map_or(self.text.len(), |next| next - 1);
        self.text.get(start..end).unwrap_or_default()
    }

    pub fn position_to_lsp(&self, pos: &Position) -> LspPosition {
        let character = match self.encoding {
            Encoding::Utf32 => pos.character,
            Encoding::Utf16 => {
                let mut units = 0;
                let mut taken = 0;
                for ch in self.line(pos.line).chars().take(pos.character as usize) {
                    units += ch.len_utf16() as u32;
                    taken += 1;
                }
                units + (pos.character - taken)
            }
        };
        LspPosition {
            line: pos.line,
            character,
        }
    }

    /// A column inside a surrogate pair resolves to the character after it.
    pub fn position_from_lsp(&self, pos: &LspPosition) -> Position {
        let character = match self.encoding {
            Encoding::Utf32 => pos.character,
            Encoding::Utf16 => {
                let mut units = 0;
                let mut chars = 0;
                for ch in self.line(pos.line).chars() {
                    if units >= pos.character {
                        break;
                    }
                    units += ch.len_utf16() as u32;
                    chars += 1;
                }
                chars + pos.character.saturating_sub(units)
            }
        };
        Position::new(pos.line, character)
    }

    pub fn range_to_lsp(&self, range: &Range) -> LspRange {
        LspRange {
            start: self.position_to_lsp(&range.start),
            end: self.position_to_lsp(&range.end),
        }
    }
}

pub fn severity_to_lsp(severity: &DiagnosticSeverity) -> LspSeverity {
    match severity {
        DiagnosticSeverity::Error => LspSeverity::ERROR,
        DiagnosticSeverity::Warning => LspSeverity::WARNING,
        DiagnosticSeverity::Information => LspSeverity::INFORMATION,
        DiagnosticSeverity::Hint => LspSeverity::HINT,
    }
}

pub fn diagnostic_to_lsp(diag: &Diagnostic, lines: &LineIndex<'_>) -> LspDiagnostic {
    LspDiagnostic {
        range: lines.range_to_lsp(&diag.range),
        severity: Some(severity_to_lsp(&diag.severity)),
        code: diag.code.clone().map(NumberOrString::String),
        code_description: None,
        source: diag.source.clone(),
        message: diag.message.clone(),
        related_information: None,
        tags: None,
        data: None,
    }
}

pub fn symbol_kind_to_lsp(kind: &SymbolKind) -> LspSymbolKind {
    match kind {
        SymbolKind::Package => LspSymbolKind::PACKAGE,
        SymbolKind::Method => LspSymbolKind::METHOD,
    }
}

/// LSP requires a non-empty name, so unlabelled entries get a placeholder.
pub fn symbol_to_lsp(symbol: &Symbol, lines: &LineIndex<'_>) -> LspDocumentSymbol {
    #[allow(deprecated)]
    LspDocumentSymbol {
        name: symbol
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNNAMED.to_string()),
        detail: None,
        kind: symbol_kind_to_lsp(&symbol.kind),
        tags: None,
        deprecated: None,
        range: lines.range_to_lsp(&symbol.range),
        selection_range: lines.range_to_lsp(&symbol.selection_range),
        children: if symbol.children.is_empty() {
            None
        } else {
            Some(
                symbol
                    .children
                    .iter()
                    .map(|child| symbol_to_lsp(child, lines))
                    .collect(),
            )
        },
    }
}

/// Clients sort ascending by `sort_text`, so higher priorities get smaller keys.
pub fn completion_item_to_lsp(item: &CompletionItem) -> LspCompletionItem {
    let rank = (1000.0 - item.priority).clamp(0.0, 9999.0);
    LspCompletionItem {
        label: item.label.clone(),
        kind: Some(CompletionItemKind::TEXT),
        detail: Some(item.meta.clone()),
        insert_text: Some(item.insert_text.clone()),
        sort_text: Some(format!("{rank:08.3}")),
        ..Default::default()
    }
}
