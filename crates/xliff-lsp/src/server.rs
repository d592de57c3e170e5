//! LSP server implementation using tower-lsp.

use std::sync::{Arc, OnceLock};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

use xliff_lsp_core::document::DocumentStore;
use xliff_lsp_core::{XliffConfig, XliffHandler};

use crate::capabilities::server_capabilities;
use crate::convert::{self, Encoding, LineIndex};

/// The XLIFF language server.
pub struct XliffLanguageServer {
    /// The LSP client for sending notifications.
    client: Client,
    /// Open XLIFF documents. Other documents are never stored.
    documents: Arc<RwLock<DocumentStore>>,
    /// Replaced when the client sends `initializationOptions`.
    handler: RwLock<Arc<XliffHandler>>,
    /// Column unit agreed in `initialize`.
    encoding: OnceLock<Encoding>,
}

impl XliffLanguageServer {
    pub fn new(client: Client, handler: Arc<XliffHandler>) -> Self {
        Self {
            client,
            documents: Arc::new(RwLock::new(DocumentStore::new())),
            handler: RwLock::new(handler),
            encoding: OnceLock::new(),
        }
    }

    fn encoding(&self) -> Encoding {
        self.encoding.get().copied().unwrap_or_default()
    }

    async fn handler(&self) -> Arc<XliffHandler> {
        self.handler.read().await.clone()
    }

    /// Rebuild the handler from client-supplied settings.
    ///
    /// Invalid settings are reported and the current handler is kept.
    async fn configure(&self, options: serde_json::Value) {
        let handler = XliffConfig::from_json(options)
            .map(XliffConfig::with_env_overrides)
            .map_err(|err| err.to_string())
            .and_then(|config| XliffHandler::from_config(&config).map_err(|err| err.to_string()));
        match handler {
            Ok(handler) => *self.handler.write().await = Arc::new(handler),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring initialization options");
                self.client
                    .log_message(
                        MessageType::WARNING,
                        format!("Ignoring initialization options: {err}"),
                    )
                    .await;
            }
        }
    }

    /// Publish diagnostics for a document.
    async fn publish_diagnostics(&self, uri: Url) {
        let (text, version) = {
            let documents = self.documents.read().await;
            match documents.get(uri.as_str()) {
                Some(doc) => (doc.content().to_string(), doc.version()),
                None => return,
            }
        };

        let handler = self.handler().await;
        let tree = handler.parse(&text);
        let lines = LineIndex::new(&text, self.encoding());
        let diagnostics: Vec<Diagnostic> = handler
            .analyze(&tree, false)
            .iter()
            .map(|diag| convert::diagnostic_to_lsp(diag, &lines))
            .collect();

        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for XliffLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(options) = params.initialization_options {
            self.configure(options).await;
        }
        let offered = params
            .capabilities
            .general
            .as_ref()
            .and_then(|general| general.position_encodings.as_deref());
        let encoding = *self.encoding.get_or_init(|| Encoding::negotiate(offered));
        Ok(InitializeResult {
            capabilities: server_capabilities(encoding),
            server_info: Some(ServerInfo {
                name: "xliff-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "XLIFF language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let document = params.text_document;
        if !XliffHandler::handles_language(&document.language_id, document.uri.path()) {
            tracing::debug!(uri = %document.uri, language = %document.language_id, "not an XLIFF document");
            return;
        }

        {
            let mut documents = self.documents.write().await;
            documents.open(document.uri.as_str(), document.text, document.version);
        }

        self.publish_diagnostics(document.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        // Full document sync, so the last change holds the whole text
        if let Some(change) = params.content_changes.into_iter().last() {
            {
                let mut documents = self.documents.write().await;
                documents.change(uri.as_str(), change.text, version);
            }

            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        let was_open = self.documents.write().await.close(uri.as_str());

        if was_open {
            self.client.publish_diagnostics(uri, Vec::new(), None).await;
        }
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;
        let documents = self.documents.read().await;

        let Some(doc) = documents.get(uri.as_str()) else {
            return Ok(None);
        };
        let handler = self.handler().await;
        let outline = handler.outline(&handler.parse(doc.content()));
        let lines = LineIndex::new(doc.content(), self.encoding());
        let symbols: Vec<DocumentSymbol> = outline
            .items
            .iter()
            .map(|symbol| convert::symbol_to_lsp(symbol, &lines))
            .collect();
        Ok(Some(DocumentSymbolResponse::Nested(symbols)))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let position = params.text_document_position;
        let text = {
            let documents = self.documents.read().await;
            match documents.get(position.text_document.uri.as_str()) {
                Some(doc) => doc.content().to_string(),
                None => return Ok(None),
            }
        };

        let handler = self.handler().await;
        let tree = handler.parse(&text);
        let cursor = LineIndex::new(&text, self.encoding()).position_from_lsp(&position.position);
        let items = handler.complete(&tree, cursor, None).await;
        Ok(Some(CompletionResponse::Array(
            items.iter().map(convert::completion_item_to_lsp).collect(),
        )))
    }
}

/// Run the LSP server over stdio.
pub async fn run_server(config: XliffConfig) -> anyhow::Result<()> {
    let handler = Arc::new(XliffHandler::from_config(&config)?);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(move |client| XliffLanguageServer::new(client, handler.clone()));
    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}
