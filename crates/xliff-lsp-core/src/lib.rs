//! Transport-agnostic language support for XLIFF translation files.
//!
//! This crate provides outline, diagnostics and translation-memory completion
//! on top of the trees built by `xliff-xml`, without any LSP protocol
//! dependencies.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         xliff-lsp-core                          │
//! │   (outline, diagnostics, completion, translation memory)        │
//! └─────────────────────────────────────────────────────────────────┘
//!             │                                    │
//!             ▼                                    ▼
//! ┌───────────────────────┐          ┌─────────────────────────────┐
//! │      xliff-xml        │          │         xliff-lsp           │
//! │  (parser, queries)    │          │   (Native LSP server)       │
//! └───────────────────────┘          └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use xliff_lsp_core::{diagnostics, symbols};
//!
//! let tree = xliff_xml::parse(
//!     r#"<xliff><file original="app.po" target-language="fr"></file></xliff>"#,
//! );
//!
//! // One parse serves both outline and diagnostics
//! let outline = symbols::outline(&tree);
//! assert_eq!(outline.items[0].name.as_deref(), Some("app.po"));
//! assert!(diagnostics::analyze(&tree, false).is_empty());
//! ```

pub mod completion;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod extract;
pub mod handler;
pub mod symbols;
pub mod tm;
pub mod types;

pub use completion::{CompletionProvider, LookupKey};
pub use config::{ConfigError, TranslationMemoryConfig, XliffConfig};
pub use document::{Document, DocumentStore};
pub use handler::{REGISTRATION, Registration, XliffHandler};
pub use tm::{HttpTranslationMemory, LookupError, TmMatch, TranslationMemory};
pub use types::{
    CompletionItem, Diagnostic, DiagnosticSeverity, Outline, Position, Range, Symbol, SymbolKind,
};
