//! LSP capability negotiation.

use tower_lsp::lsp_types::{
    CompletionOptions, OneOf, ServerCapabilities, TextDocumentSyncCapability,
    TextDocumentSyncKind, TextDocumentSyncOptions,
};

use crate::convert::Encoding;

/// Get the server capabilities to report to the client.
pub fn server_capabilities(encoding: Encoding) -> ServerCapabilities {
    ServerCapabilities {
        position_encoding: Some(encoding.kind()),

        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                // Full document sync: every change re-parses the whole file
                change: Some(TextDocumentSyncKind::FULL),
                will_save: None,
                will_save_wait_until: None,
                save: None,
            },
        )),

        // Outline of files and translation units
        document_symbol_provider: Some(OneOf::Left(true)),

        // Translation-memory suggestions inside <target>
        completion_provider: Some(CompletionOptions {
            resolve_provider: Some(false),
            ..Default::default()
        }),

        ..Default::default()
    }
}
