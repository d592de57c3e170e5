//! Open documents, keyed by URI.
//!
//! The store only holds text and the editor's version number; trees are
//! rebuilt from the text on demand.

use std::collections::HashMap;

/// Text of an open document as last sent by the editor.
#[derive(Debug, Clone)]
pub struct Document {
    content: String,
    version: i32,
}

impl Document {
    pub fn new(content: impl Into<String>, version: i32) -> Self {
        Self {
            content: content.into(),
            version,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Version the content belongs to, echoed back with diagnostics.
    pub fn version(&self) -> i32 {
        self.version
    }
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or replace a document.
    pub fn open(&mut self, uri: impl Into<String>, content: impl Into<String>, version: i32) {
        self.documents
            .insert(uri.into(), Document::new(content, version));
    }

    /// Replace a document's text. Unknown URIs are ignored.
    pub fn change(&mut self, uri: &str, content: impl Into<String>, version: i32) {
        if let Some(doc) = self.documents.get_mut(uri) {
            *doc = Document::new(content, version);
        }
    }

    /// Forget a document, returning whether it was open.
    pub fn close(&mut self, uri: &str) -> bool {
        self.documents.remove(uri).is_some()
    }

    pub fn get(&self, uri: &str) -> Option<&Document> {
        self.documents.get(uri)
    }
}
