//! The language handler a host talks to.
//!
//! The handler bundles parsing, outline, analysis and completion behind one
//! value. It owns the completion cache, so hosts keep one handler for the
//! whole session.

use crate::completion::CompletionProvider;
use crate::config::XliffConfig;
use crate::diagnostics;
use crate::symbols;
use crate::tm::{HttpTranslationMemory, LookupError, TranslationMemory};
use crate::types::{CompletionItem, Diagnostic, Outline, Position};
use std::sync::Arc;
use xliff_xml::{NodeId, Tree};

/// How a host recognises documents for this handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    /// Host language id.
    pub language: &'static str,
    /// File name pattern.
    pub pattern: &'static str,
}

pub const REGISTRATION: Registration = Registration {
    language: "xml",
    pattern: "*.xliff",
};

#[derive(Debug)]
pub struct XliffHandler {
    completion: CompletionProvider,
}

impl XliffHandler {
    pub fn new(memory: Arc<dyn TranslationMemory>) -> Self {
        Self {
            completion: CompletionProvider::new(memory),
        }
    }

    /// Handler backed by the HTTP translation memory from `config`.
    pub fn from_config(config: &XliffConfig) -> Result<Self, LookupError> {
        let memory = HttpTranslationMemory::new(config.translation_memory.clone())?;
        Ok(Self::new(Arc::new(memory)))
    }

    /// Whether a document with this host language and path is XLIFF.
    ///
    /// The language must be XML and the path must end in `.xliff`.
    pub fn handles_language(language: &str, path: &str) -> bool {
        language == REGISTRATION.language && path.ends_with(".xliff")
    }

    pub fn parse(&self, text: &str) -> Tree {
        xliff_xml::parse(text)
    }

    pub fn outline(&self, tree: &Tree) -> Outline {
        symbols::outline(tree)
    }

    pub fn analyze(&self, tree: &Tree, minimal: bool) -> Vec<Diagnostic> {
        diagnostics::analyze(tree, minimal)
    }

    pub async fn complete(
        &self,
        tree: &Tree,
        cursor: Position,
        node: Option<NodeId>,
    ) -> Vec<CompletionItem> {
        self.completion.complete(tree, cursor, node).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tm::TmMatch;
    use async_trait::async_trait;

    struct Offline;

    #[async_trait]
    impl TranslationMemory for Offline {
        async fn lookup(&self, _: &str, _: &str) -> Result<Vec<TmMatch>, LookupError> {
            Err(LookupError::Other("offline".into()))
        }
    }

    #[test]
    fn test_handles_language() {
        assert!(XliffHandler::handles_language("xml", "/work/messages.xliff"));
        assert!(XliffHandler::handles_language("xml", "file:///a/b.fr.xliff"));
        assert!(!XliffHandler::handles_language("xml", "/work/pom.xml"));
        assert!(!XliffHandler::handles_language("json", "/work/messages.xliff"));
        assert!(!XliffHandler::handles_language("xml", "/work/messages.xliff.bak"));
    }

    #[test]
    fn test_parse_outline_analyze() {
        let handler = XliffHandler::new(Arc::new(Offline));
        let tree = handler.parse(
            r#"<xliff><file original="a.po"><trans-unit id="x"><source>s</source></trans-unit></file></xliff>"#,
        );
        let outline = handler.outline(&tree);
        assert_eq!(outline.items[0].name.as_deref(), Some("a.po"));
        assert_eq!(outline.items[0].children[0].name.as_deref(), Some("x"));

        let messages: Vec<_> = handler
            .analyze(&tree, false)
            .into_iter()
            .map(|d| d.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "<file> needs target-language attribute",
                "<trans-unit> needs one target element"
            ]
        );
    }

    #[tokio::test]
    async fn test_complete_without_translation_memory() {
        let handler = XliffHandler::new(Arc::new(Offline));
        let tree = handler.parse(
            r#"<file target-language="fr"><trans-unit><source>s</source><target>t</target></trans-unit></file>"#,
        );
        let items = handler.complete(&tree, Position::new(0, 70), None).await;
        assert!(items.is_empty());
    }

    #[test]
    fn test_from_default_config() {
        assert!(XliffHandler::from_config(&XliffConfig::default()).is_ok());
    }
}
